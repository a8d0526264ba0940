//! Typed identifiers.
//!
//! Every entity lives in a per-kind arena owned by the graph being built; its
//! id is its index there. Ids of different kinds cannot be mixed up, and a
//! self-reference such as a source's higher source is just another id.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! arena_id {
  ($($(#[$meta:meta])* $name:ident;)*) => {$(
    $(#[$meta])*
    #[derive(
      Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
      Deserialize,
    )]
    #[serde(transparent)]
    pub struct $name(pub u32);

    impl $name {
      pub fn index(self) -> usize { self.0 as usize }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
      }
    }
  )*};
}

arena_id! {
  ResearcherId;
  ProjectId;
  PersonaId;
  EventTypeId;
  EventId;
  CharacteristicPartTypeId;
  CharacteristicId;
  SourceId;
  CitationPartTypeId;
  PlaceId;
  PlacePartTypeId;
  RepositoryId;
  RepresentationId;
  /// Kind of a persona-to-persona relation ("same as", "godfather", ...).
  P2PTypeId;
}
