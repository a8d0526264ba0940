//! The `GraphSink` trait: where an import run sends what it creates.
//!
//! Entities that other rows refer to are created one at a time and their id
//! is usable immediately. High-volume leaf rows (parts and assertions) are
//! collected by the caller and handed over once in a [`LeafBatch`].

use crate::{
  assertion::{P2C, P2E, P2P},
  ids::{
    CharacteristicId, CharacteristicPartTypeId, CitationPartTypeId, EventId,
    EventTypeId, P2PTypeId, PersonaId, PlaceId, PlacePartTypeId, ProjectId,
    RepositoryId, RepresentationId, ResearcherId, SourceId,
  },
  model::{
    Characteristic, CharacteristicPart, CharacteristicPartType, CitationPart,
    CitationPartType, Event, EventType, P2PType, Persona, Place, PlacePart,
    PlacePartType, Project, Repository, RepositorySource, Representation,
    Researcher, Source,
  },
};

// ─── Batch ───────────────────────────────────────────────────────────────────

/// Leaf rows accumulated during a run and inserted together at its end.
#[derive(Debug, Clone, Default)]
pub struct LeafBatch {
  pub place_parts:          Vec<PlacePart>,
  pub citation_parts:       Vec<CitationPart>,
  pub characteristic_parts: Vec<CharacteristicPart>,
  pub p2e:                  Vec<P2E>,
  pub p2c:                  Vec<P2C>,
  pub p2p:                  Vec<P2P>,
}

impl LeafBatch {
  pub fn len(&self) -> usize {
    self.place_parts.len()
      + self.citation_parts.len()
      + self.characteristic_parts.len()
      + self.p2e.len()
      + self.p2c.len()
      + self.p2p.len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Destination of one import run.
///
/// A run calls this from a single thread and assumes it is the only writer.
/// Whether the rows become durable all at once is up to the implementation;
/// callers never flush a partial [`LeafBatch`].
pub trait GraphSink {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Provenance ────────────────────────────────────────────────────────

  fn create_researcher(
    &mut self,
    researcher: Researcher,
  ) -> Result<ResearcherId, Self::Error>;

  fn create_project(&mut self, project: Project)
  -> Result<ProjectId, Self::Error>;

  // ── Vocabularies ──────────────────────────────────────────────────────

  fn create_event_type(
    &mut self,
    event_type: EventType,
  ) -> Result<EventTypeId, Self::Error>;

  fn create_characteristic_part_type(
    &mut self,
    part_type: CharacteristicPartType,
  ) -> Result<CharacteristicPartTypeId, Self::Error>;

  fn create_citation_part_type(
    &mut self,
    part_type: CitationPartType,
  ) -> Result<CitationPartTypeId, Self::Error>;

  fn create_place_part_type(
    &mut self,
    part_type: PlacePartType,
  ) -> Result<PlacePartTypeId, Self::Error>;

  fn create_p2p_type(
    &mut self,
    p2p_type: P2PType,
  ) -> Result<P2PTypeId, Self::Error>;

  // ── Referenceable entities ────────────────────────────────────────────

  fn create_persona(&mut self, persona: Persona)
  -> Result<PersonaId, Self::Error>;

  fn create_event(&mut self, event: Event) -> Result<EventId, Self::Error>;

  fn create_characteristic(
    &mut self,
    characteristic: Characteristic,
  ) -> Result<CharacteristicId, Self::Error>;

  fn create_source(&mut self, source: Source) -> Result<SourceId, Self::Error>;

  fn create_place(&mut self, place: Place) -> Result<PlaceId, Self::Error>;

  fn create_repository(
    &mut self,
    repository: Repository,
  ) -> Result<RepositoryId, Self::Error>;

  fn create_repository_source(
    &mut self,
    link: RepositorySource,
  ) -> Result<(), Self::Error>;

  fn create_representation(
    &mut self,
    representation: Representation,
  ) -> Result<RepresentationId, Self::Error>;

  /// Append to the comments of a source created earlier in the same run.
  fn append_source_comment(
    &mut self,
    source: SourceId,
    comment: &str,
  ) -> Result<(), Self::Error>;

  // ── Leaves ────────────────────────────────────────────────────────────

  fn bulk_insert(&mut self, batch: LeafBatch) -> Result<(), Self::Error>;
}
