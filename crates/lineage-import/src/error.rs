//! Error types for the importer.
//!
//! Data-quality problems are never errors: they go to the
//! [`Reporter`](crate::report::Reporter) and the run continues.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The file could not be read as a record tree. Nothing was imported.
  #[error(transparent)]
  Gedcom(#[from] lineage_gedcom::Error),

  #[error(transparent)]
  Model(#[from] lineage_core::Error),

  /// The destination refused a row. The run is abandoned.
  #[error("graph sink failed: {0}")]
  Sink(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn sink(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Error::Sink(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
