//! Error types for the GEDCOM reader.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The file cannot be turned into a record tree at all. Importing stops.
  #[error("{file}:{line}: invalid GEDCOM: {reason}")]
  InvalidFormat {
    file:   String,
    line:   usize,
    reason: String,
  },

  #[error("cannot read {path}: {source}")]
  Io {
    path:   String,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
