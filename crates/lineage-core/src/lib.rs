//! Data model of the genealogical graph.
//!
//! Personas, events, characteristics, sources, places and repositories, the
//! assertions that attach facts to personas, and the [`GraphSink`] trait an
//! import run writes through. Free of I/O; `lineage-store-sqlite` persists a
//! finished [`MemoryGraph`].

pub mod assertion;
pub mod error;
pub mod ids;
pub mod memory;
pub mod model;
pub mod sink;
pub mod vocab;

pub use error::{Error, Result};
pub use memory::{GraphStats, MemoryGraph};
pub use sink::{GraphSink, LeafBatch};
