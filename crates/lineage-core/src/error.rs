//! Error types for `lineage-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind} {id} does not exist")]
  UnknownId { kind: &'static str, id: u32 },

  #[error("too many {0} for a single graph")]
  ArenaFull(&'static str),

  #[error("a surety scheme needs at least one level")]
  EmptySuretyScheme,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
