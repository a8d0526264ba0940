//! `MemoryGraph`: an in-memory [`GraphSink`].
//!
//! Each entity kind lives in its own `Vec`; an id is the index into it. An
//! import builds a complete `MemoryGraph` first, so a persistent store can
//! write the whole run in one transaction or not at all.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
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
  sink::{GraphSink, LeafBatch},
  vocab::SAME_AS,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryGraph {
  pub researchers:               Vec<Researcher>,
  pub projects:                  Vec<Project>,
  pub event_types:               Vec<EventType>,
  pub characteristic_part_types: Vec<CharacteristicPartType>,
  pub citation_part_types:       Vec<CitationPartType>,
  pub place_part_types:          Vec<PlacePartType>,
  pub p2p_types:                 Vec<P2PType>,
  pub personas:                  Vec<Persona>,
  pub events:                    Vec<Event>,
  pub characteristics:           Vec<Characteristic>,
  pub sources:                   Vec<Source>,
  pub places:                    Vec<Place>,
  pub repositories:              Vec<Repository>,
  pub repository_sources:        Vec<RepositorySource>,
  pub representations:           Vec<Representation>,
  pub place_parts:               Vec<PlacePart>,
  pub citation_parts:            Vec<CitationPart>,
  pub characteristic_parts:      Vec<CharacteristicPart>,
  pub p2e:                       Vec<P2E>,
  pub p2c:                       Vec<P2C>,
  pub p2p:                       Vec<P2P>,
}

/// Row counts per entity kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
  pub personas:             usize,
  pub events:               usize,
  pub characteristics:      usize,
  pub sources:              usize,
  pub places:               usize,
  pub repositories:         usize,
  pub representations:      usize,
  pub citation_parts:       usize,
  pub place_parts:          usize,
  pub characteristic_parts: usize,
  pub p2e:                  usize,
  pub p2c:                  usize,
  pub p2p:                  usize,
}

fn push<T>(items: &mut Vec<T>, item: T, kind: &'static str) -> Result<u32> {
  let id = u32::try_from(items.len()).map_err(|_| Error::ArenaFull(kind))?;
  items.push(item);
  Ok(id)
}

impl MemoryGraph {
  pub fn new() -> Self { Self::default() }

  pub fn stats(&self) -> GraphStats {
    GraphStats {
      personas:             self.personas.len(),
      events:               self.events.len(),
      characteristics:      self.characteristics.len(),
      sources:              self.sources.len(),
      places:               self.places.len(),
      repositories:         self.repositories.len(),
      representations:      self.representations.len(),
      citation_parts:       self.citation_parts.len(),
      place_parts:          self.place_parts.len(),
      characteristic_parts: self.characteristic_parts.len(),
      p2e:                  self.p2e.len(),
      p2c:                  self.p2c.len(),
      p2p:                  self.p2p.len(),
    }
  }

  // ── Lookups ───────────────────────────────────────────────────────────

  pub fn persona(&self, id: PersonaId) -> Option<&Persona> {
    self.personas.get(id.index())
  }

  pub fn event(&self, id: EventId) -> Option<&Event> {
    self.events.get(id.index())
  }

  pub fn source(&self, id: SourceId) -> Option<&Source> {
    self.sources.get(id.index())
  }

  pub fn place(&self, id: PlaceId) -> Option<&Place> {
    self.places.get(id.index())
  }

  pub fn event_type_by_gedcom(&self, tag: &str) -> Option<EventTypeId> {
    self
      .event_types
      .iter()
      .position(|t| t.gedcom.as_deref() == Some(tag))
      .and_then(|i| u32::try_from(i).ok())
      .map(EventTypeId)
  }

  /// Events of the type imported from GEDCOM tag `tag`.
  pub fn events_of_type(&self, tag: &str) -> Vec<(EventId, &Event)> {
    let Some(ty) = self.event_type_by_gedcom(tag) else {
      return Vec::new();
    };
    self
      .events
      .iter()
      .enumerate()
      .filter(|(_, e)| e.event_type == ty)
      .filter_map(|(i, e)| Some((EventId(u32::try_from(i).ok()?), e)))
      .collect()
  }

  pub fn personas_named(&self, name: &str) -> Vec<PersonaId> {
    self
      .personas
      .iter()
      .enumerate()
      .filter(|(_, p)| p.name == name)
      .filter_map(|(i, _)| u32::try_from(i).ok().map(PersonaId))
      .collect()
  }

  /// Assertions linking personas to `event`.
  pub fn participants(&self, event: EventId) -> Vec<&P2E> {
    self.p2e.iter().filter(|a| a.event == event).collect()
  }

  /// "same as" relations, each linking a canonical persona to one of its
  /// per-source copies.
  pub fn same_as_links(&self) -> Vec<&P2P> {
    let same_as = self
      .p2p_types
      .iter()
      .position(|t| t.name == SAME_AS)
      .and_then(|i| u32::try_from(i).ok())
      .map(P2PTypeId);
    self
      .p2p
      .iter()
      .filter(|a| Some(a.p2p_type) == same_as)
      .collect()
  }

  /// Sources whose higher source is `parent`.
  pub fn nested_sources(&self, parent: SourceId) -> Vec<SourceId> {
    self
      .sources
      .iter()
      .enumerate()
      .filter(|(_, s)| s.higher_source == Some(parent))
      .filter_map(|(i, _)| u32::try_from(i).ok().map(SourceId))
      .collect()
  }
}

impl GraphSink for MemoryGraph {
  type Error = Error;

  fn create_researcher(&mut self, researcher: Researcher) -> Result<ResearcherId> {
    push(&mut self.researchers, researcher, "researchers").map(ResearcherId)
  }

  fn create_project(&mut self, project: Project) -> Result<ProjectId> {
    push(&mut self.projects, project, "projects").map(ProjectId)
  }

  fn create_event_type(&mut self, event_type: EventType) -> Result<EventTypeId> {
    push(&mut self.event_types, event_type, "event types").map(EventTypeId)
  }

  fn create_characteristic_part_type(
    &mut self,
    part_type: CharacteristicPartType,
  ) -> Result<CharacteristicPartTypeId> {
    push(
      &mut self.characteristic_part_types,
      part_type,
      "characteristic part types",
    )
    .map(CharacteristicPartTypeId)
  }

  fn create_citation_part_type(
    &mut self,
    part_type: CitationPartType,
  ) -> Result<CitationPartTypeId> {
    push(&mut self.citation_part_types, part_type, "citation part types")
      .map(CitationPartTypeId)
  }

  fn create_place_part_type(
    &mut self,
    part_type: PlacePartType,
  ) -> Result<PlacePartTypeId> {
    push(&mut self.place_part_types, part_type, "place part types")
      .map(PlacePartTypeId)
  }

  fn create_p2p_type(&mut self, p2p_type: P2PType) -> Result<P2PTypeId> {
    push(&mut self.p2p_types, p2p_type, "p2p types").map(P2PTypeId)
  }

  fn create_persona(&mut self, persona: Persona) -> Result<PersonaId> {
    push(&mut self.personas, persona, "personas").map(PersonaId)
  }

  fn create_event(&mut self, event: Event) -> Result<EventId> {
    push(&mut self.events, event, "events").map(EventId)
  }

  fn create_characteristic(
    &mut self,
    characteristic: Characteristic,
  ) -> Result<CharacteristicId> {
    push(&mut self.characteristics, characteristic, "characteristics")
      .map(CharacteristicId)
  }

  fn create_source(&mut self, source: Source) -> Result<SourceId> {
    push(&mut self.sources, source, "sources").map(SourceId)
  }

  fn create_place(&mut self, place: Place) -> Result<PlaceId> {
    push(&mut self.places, place, "places").map(PlaceId)
  }

  fn create_repository(&mut self, repository: Repository) -> Result<RepositoryId> {
    push(&mut self.repositories, repository, "repositories").map(RepositoryId)
  }

  fn create_repository_source(&mut self, link: RepositorySource) -> Result<()> {
    push(&mut self.repository_sources, link, "repository sources").map(|_| ())
  }

  fn create_representation(
    &mut self,
    representation: Representation,
  ) -> Result<RepresentationId> {
    push(&mut self.representations, representation, "representations")
      .map(RepresentationId)
  }

  fn append_source_comment(&mut self, source: SourceId, comment: &str) -> Result<()> {
    let src = self.sources.get_mut(source.index()).ok_or(Error::UnknownId {
      kind: "source",
      id:   source.0,
    })?;
    src.comments.push_str(comment);
    Ok(())
  }

  fn bulk_insert(&mut self, batch: LeafBatch) -> Result<()> {
    let LeafBatch {
      place_parts,
      citation_parts,
      characteristic_parts,
      p2e,
      p2c,
      p2p,
    } = batch;
    self.place_parts.extend(place_parts);
    self.citation_parts.extend(citation_parts);
    self.characteristic_parts.extend(characteristic_parts);
    self.p2e.extend(p2e);
    self.p2c.extend(p2c);
    self.p2p.extend(p2p);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  fn persona(name: &str) -> Persona {
    Persona {
      name:        name.into(),
      description: String::new(),
      last_change: Utc::now(),
    }
  }

  #[test]
  fn ids_are_arena_indices() {
    let mut g = MemoryGraph::new();
    let a = g.create_persona(persona("A")).unwrap();
    let b = g.create_persona(persona("B")).unwrap();
    assert_eq!((a, b), (PersonaId(0), PersonaId(1)));
    assert_eq!(g.persona(b).unwrap().name, "B");
    assert_eq!(g.personas_named("A"), vec![a]);
  }

  #[test]
  fn appending_to_a_missing_source_fails() {
    let mut g = MemoryGraph::new();
    let err = g.append_source_comment(SourceId(3), "note").unwrap_err();
    assert!(matches!(err, Error::UnknownId { kind: "source", id: 3 }));
  }

  #[test]
  fn bulk_insert_moves_every_leaf() {
    let mut g = MemoryGraph::new();
    let place = g
      .create_place(Place {
        name:         "Paris".into(),
        parent_place: None,
      })
      .unwrap();
    let city = g
      .create_place_part_type(PlacePartType {
        name:   "City".into(),
        gedcom: Some("CITY".into()),
      })
      .unwrap();
    let batch = LeafBatch {
      place_parts: vec![PlacePart {
        place,
        part_type: city,
        value: "Paris".into(),
      }],
      ..LeafBatch::default()
    };
    assert_eq!(batch.len(), 1);
    g.bulk_insert(batch).unwrap();
    assert_eq!(g.stats().place_parts, 1);
  }
}
