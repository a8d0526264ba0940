//! SQLite persistence for imported genealogical graphs.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Each import run is written as a
//! whole, in one transaction, under its own run id.

mod encode;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{RunInfo, SqliteStore, TimelineEntry};
