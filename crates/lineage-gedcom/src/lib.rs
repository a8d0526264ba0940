//! Reader for GEDCOM 5.5 files.
//!
//! A file becomes a tree of [`Record`]s with continuation lines folded in.
//! The reader knows nothing about what the tags mean; that is left to the
//! importer.

pub mod error;
mod parse;
pub mod record;

pub use error::{Error, Result};
pub use parse::{parse_file, parse_str};
pub use record::{Field, GedcomFile, Location, Record, is_pointer};
