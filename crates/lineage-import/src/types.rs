//! Per-run caches of the enumerated vocabularies.
//!
//! Every run registers the built-in types with its sink first, then adds
//! a type the first time it meets an extension tag it does not know.

use std::collections::HashMap;

use lineage_core::{
  GraphSink,
  ids::{
    CharacteristicPartTypeId, CitationPartTypeId, EventTypeId, P2PTypeId,
    PlacePartTypeId,
  },
  model::{
    CharacteristicPartType, CitationPartType, EventType, P2PType,
    PlacePartType,
  },
  vocab::{
    CHARACTERISTIC_PART_TYPES, CITATION_PART_TYPES, EVENT_TYPES, P2P_TYPES,
    PLACE_PART_TYPES, SAME_AS, title_case,
  },
};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub(crate) struct Named<Id> {
  pub id:   Id,
  pub name: String,
}

#[derive(Debug, Default)]
pub(crate) struct TypeCache {
  events:    HashMap<String, Named<EventTypeId>>,
  parts:     HashMap<String, Named<CharacteristicPartTypeId>>,
  citations: HashMap<String, CitationPartTypeId>,
  places:    HashMap<String, PlacePartTypeId>,
  /// Keyed by lowercase name.
  p2p:       HashMap<String, P2PTypeId>,
}

impl TypeCache {
  pub fn seed<S: GraphSink>(sink: &mut S) -> Result<Self> {
    let mut cache = Self::default();
    for (name, tag) in EVENT_TYPES {
      cache.add_event(sink, name, tag)?;
    }
    for (name, tag, is_name_part) in CHARACTERISTIC_PART_TYPES {
      cache.add_part(sink, name, tag, *is_name_part)?;
    }
    for (name, tag) in CITATION_PART_TYPES {
      cache.add_citation(sink, name, tag)?;
    }
    for (name, tag) in PLACE_PART_TYPES {
      cache.add_place(sink, name, tag)?;
    }
    for name in P2P_TYPES {
      cache.add_p2p(sink, name)?;
    }
    Ok(cache)
  }

  // ── Events ────────────────────────────────────────────────────────────

  pub fn event(&self, tag: &str) -> Option<&Named<EventTypeId>> {
    self.events.get(tag)
  }

  pub fn event_or_create<S: GraphSink>(
    &mut self,
    sink: &mut S,
    tag: &str,
  ) -> Result<Named<EventTypeId>> {
    if let Some(known) = self.events.get(tag) {
      return Ok(known.clone());
    }
    debug!(tag, "registering event type");
    self.add_event(sink, &title_case(tag), tag)
  }

  fn add_event<S: GraphSink>(
    &mut self,
    sink: &mut S,
    name: &str,
    tag: &str,
  ) -> Result<Named<EventTypeId>> {
    let id = sink
      .create_event_type(EventType {
        name:   name.to_string(),
        gedcom: Some(tag.to_string()),
      })
      .map_err(Error::sink)?;
    let named = Named {
      id,
      name: name.to_string(),
    };
    self.events.insert(tag.to_string(), named.clone());
    Ok(named)
  }

  // ── Characteristic parts ──────────────────────────────────────────────

  pub fn part(&self, tag: &str) -> Option<&Named<CharacteristicPartTypeId>> {
    self.parts.get(tag)
  }

  pub fn part_or_create<S: GraphSink>(
    &mut self,
    sink: &mut S,
    tag: &str,
  ) -> Result<Named<CharacteristicPartTypeId>> {
    if let Some(known) = self.parts.get(tag) {
      return Ok(known.clone());
    }
    debug!(tag, "registering characteristic part type");
    self.add_part(sink, &title_case(tag), tag, false)
  }

  fn add_part<S: GraphSink>(
    &mut self,
    sink: &mut S,
    name: &str,
    tag: &str,
    is_name_part: bool,
  ) -> Result<Named<CharacteristicPartTypeId>> {
    let id = sink
      .create_characteristic_part_type(CharacteristicPartType {
        name: name.to_string(),
        gedcom: Some(tag.to_string()),
        is_name_part,
      })
      .map_err(Error::sink)?;
    let named = Named {
      id,
      name: name.to_string(),
    };
    self.parts.insert(tag.to_string(), named.clone());
    Ok(named)
  }

  // ── Citation parts ────────────────────────────────────────────────────

  pub fn citation_or_create<S: GraphSink>(
    &mut self,
    sink: &mut S,
    tag: &str,
  ) -> Result<CitationPartTypeId> {
    if let Some(&id) = self.citations.get(tag) {
      return Ok(id);
    }
    debug!(tag, "registering citation part type");
    self.add_citation(sink, &title_case(tag), tag)
  }

  fn add_citation<S: GraphSink>(
    &mut self,
    sink: &mut S,
    name: &str,
    tag: &str,
  ) -> Result<CitationPartTypeId> {
    let id = sink
      .create_citation_part_type(CitationPartType {
        name:   name.to_string(),
        gedcom: Some(tag.to_string()),
      })
      .map_err(Error::sink)?;
    self.citations.insert(tag.to_string(), id);
    Ok(id)
  }

  // ── Place parts ───────────────────────────────────────────────────────

  pub fn place(&self, tag: &str) -> Option<PlacePartTypeId> {
    self.places.get(tag).copied()
  }

  /// Known place part types, plus `_XXX` extensions created on first use.
  /// `None` for any other unknown tag.
  pub fn place_or_extension<S: GraphSink>(
    &mut self,
    sink: &mut S,
    tag: &str,
  ) -> Result<Option<PlacePartTypeId>> {
    if let Some(id) = self.place(tag) {
      return Ok(Some(id));
    }
    if !tag.starts_with('_') {
      return Ok(None);
    }
    debug!(tag, "registering place part type");
    self.add_place(sink, &title_case(tag), tag).map(Some)
  }

  fn add_place<S: GraphSink>(
    &mut self,
    sink: &mut S,
    name: &str,
    tag: &str,
  ) -> Result<PlacePartTypeId> {
    let id = sink
      .create_place_part_type(PlacePartType {
        name:   name.to_string(),
        gedcom: Some(tag.to_string()),
      })
      .map_err(Error::sink)?;
    self.places.insert(tag.to_string(), id);
    Ok(id)
  }

  // ── Persona relations ─────────────────────────────────────────────────

  pub fn same_as(&self) -> Option<P2PTypeId> { self.p2p.get(SAME_AS).copied() }

  /// Relation named `name`, matched case-insensitively, created on first
  /// use.
  pub fn p2p_or_create<S: GraphSink>(
    &mut self,
    sink: &mut S,
    name: &str,
  ) -> Result<P2PTypeId> {
    if let Some(&id) = self.p2p.get(&name.to_lowercase()) {
      return Ok(id);
    }
    debug!(name, "registering persona relation type");
    self.add_p2p(sink, name)
  }

  fn add_p2p<S: GraphSink>(&mut self, sink: &mut S, name: &str) -> Result<P2PTypeId> {
    let id = sink
      .create_p2p_type(P2PType {
        name: name.to_string(),
      })
      .map_err(Error::sink)?;
    self.p2p.insert(name.to_lowercase(), id);
    Ok(id)
  }
}

#[cfg(test)]
mod tests {
  use lineage_core::MemoryGraph;

  use super::*;

  #[test]
  fn seeding_registers_every_builtin() {
    let mut g = MemoryGraph::new();
    let cache = TypeCache::seed(&mut g).unwrap();
    assert_eq!(g.event_types.len(), EVENT_TYPES.len());
    assert_eq!(g.p2p_types.len(), P2P_TYPES.len());
    assert_eq!(cache.event("BIRT").unwrap().name, "Birth");
    assert!(cache.same_as().is_some());
  }

  #[test]
  fn unknown_tags_grow_the_vocabulary_once() {
    let mut g = MemoryGraph::new();
    let mut cache = TypeCache::seed(&mut g).unwrap();
    let before = g.characteristic_part_types.len();
    let a = cache.part_or_create(&mut g, "_UID").unwrap();
    let b = cache.part_or_create(&mut g, "_UID").unwrap();
    assert_eq!(a.id, b.id);
    assert_eq!(g.characteristic_part_types.len(), before + 1);

    let godfather = cache.p2p_or_create(&mut g, "Godfather").unwrap();
    assert_eq!(cache.p2p_or_create(&mut g, "godfather").unwrap(), godfather);
  }

  #[test]
  fn only_extension_tags_become_place_parts() {
    let mut g = MemoryGraph::new();
    let mut cache = TypeCache::seed(&mut g).unwrap();
    assert!(cache.place_or_extension(&mut g, "CITY").unwrap().is_some());
    assert!(cache.place_or_extension(&mut g, "_GOV").unwrap().is_some());
    assert!(cache.place_or_extension(&mut g, "FOO").unwrap().is_none());
  }
}
