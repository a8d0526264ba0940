//! Which persona a fact is attached to.
//!
//! Each individual of the file gets one main persona. When several personas
//! per individual are enabled, a fact cited from a source is attached to a
//! copy of that persona specific to the source, and the copy is linked back
//! to the main persona with a "same as" relation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use lineage_core::{
  GraphSink, LeafBatch,
  assertion::{Claim, P2P},
  ids::{P2PTypeId, PersonaId},
  model::Persona,
};
use tracing::debug;

use crate::error::{Error, Result};

pub const SAME_INDIVIDUAL_RATIONALE: &str = "Single individual in the gedcom file";

/// What a fact is cited from, as far as persona selection is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SourceKey {
  /// No citation; the fact is asserted against the file itself.
  NoSource,
  /// A source written inline in the citing record. It cannot be cited from
  /// anywhere else.
  Inline,
  /// A top-level SOUR record, by xref.
  Record(String),
}

#[derive(Debug, Clone)]
struct Known {
  gedcom_id:   Option<String>,
  name:        String,
  last_change: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct PersonaResolver {
  multiple:  bool,
  personas:  HashMap<PersonaId, Known>,
  by_gedcom: HashMap<String, PersonaId>,
  /// `(source xref, individual xref)` to the persona for that pair.
  forks:     HashMap<(String, String), PersonaId>,
}

impl PersonaResolver {
  pub fn new(multiple_personas: bool) -> Self {
    Self {
      multiple: multiple_personas,
      ..Self::default()
    }
  }

  /// Record a persona created by the run. `gedcom_id` is the xref of the
  /// individual it is the main persona of; placeholders have none.
  pub fn register(
    &mut self,
    id: PersonaId,
    gedcom_id: Option<&str>,
    name: &str,
    last_change: DateTime<Utc>,
  ) {
    if let Some(xref) = gedcom_id {
      self.by_gedcom.insert(xref.to_string(), id);
    }
    self.personas.insert(id, Known {
      gedcom_id: gedcom_id.map(str::to_string),
      name: name.to_string(),
      last_change,
    });
  }

  /// Main persona of the individual `xref`.
  pub fn main(&self, xref: &str) -> Option<PersonaId> {
    self.by_gedcom.get(xref).copied()
  }

  pub fn name(&self, id: PersonaId) -> &str {
    self.personas.get(&id).map(|p| p.name.as_str()).unwrap_or_default()
  }

  pub fn gedcom_id(&self, id: PersonaId) -> Option<&str> {
    self.personas.get(&id).and_then(|p| p.gedcom_id.as_deref())
  }

  /// The persona to attach a fact about `persona` cited from `key`.
  ///
  /// Creates the source-specific persona and its "same as" link the first
  /// time a `(source, individual)` pair is seen. `link` is the provenance
  /// of that link.
  pub fn resolve<S: GraphSink>(
    &mut self,
    sink: &mut S,
    batch: &mut LeafBatch,
    key: &SourceKey,
    persona: PersonaId,
    same_as: P2PTypeId,
    link: Claim,
  ) -> Result<PersonaId> {
    if !self.multiple || *key == SourceKey::NoSource {
      return Ok(persona);
    }
    let Some(known) = self.personas.get(&persona) else {
      return Ok(persona);
    };
    let Some(gedcom_id) = known.gedcom_id.clone() else {
      return Ok(persona);
    };

    let memo = match key {
      SourceKey::Record(xref) => Some((xref.clone(), gedcom_id)),
      _ => None,
    };
    if let Some(pair) = &memo
      && let Some(&fork) = self.forks.get(pair)
    {
      return Ok(fork);
    }

    let name = known.name.clone();
    let last_change = known.last_change;
    let fork = sink
      .create_persona(Persona {
        name: name.clone(),
        description: String::new(),
        last_change,
      })
      .map_err(Error::sink)?;
    debug!(%persona, %fork, ?key, "per-source persona");

    self.personas.insert(fork, Known {
      gedcom_id: None,
      name,
      last_change,
    });
    if let Some(pair) = memo {
      self.forks.insert(pair, fork);
    }
    batch.p2p.push(P2P {
      claim:    link,
      person1:  persona,
      person2:  fork,
      p2p_type: same_as,
    });
    Ok(fork)
  }
}

#[cfg(test)]
mod tests {
  use lineage_core::{
    MemoryGraph,
    ids::{ResearcherId, SourceId},
    model::SuretyLevel,
  };

  use super::*;

  fn claim() -> Claim {
    Claim {
      researcher:  ResearcherId(0),
      surety:      SuretyLevel(2),
      source:      SourceId(0),
      rationale:   SAME_INDIVIDUAL_RATIONALE.into(),
      last_change: Utc::now(),
    }
  }

  fn setup(multiple: bool) -> (MemoryGraph, PersonaResolver, PersonaId) {
    let mut g = MemoryGraph::new();
    let now = Utc::now();
    let id = g
      .create_persona(Persona {
        name:        "Ann Lee".into(),
        description: String::new(),
        last_change: now,
      })
      .unwrap();
    let mut r = PersonaResolver::new(multiple);
    r.register(id, Some("@I1@"), "Ann Lee", now);
    (g, r, id)
  }

  #[test]
  fn one_fork_per_source_and_individual() {
    let (mut g, mut r, main) = setup(true);
    let mut batch = LeafBatch::default();
    let s1 = SourceKey::Record("@S1@".into());
    let s2 = SourceKey::Record("@S2@".into());

    let a = r.resolve(&mut g, &mut batch, &s1, main, P2PTypeId(0), claim()).unwrap();
    let b = r.resolve(&mut g, &mut batch, &s1, main, P2PTypeId(0), claim()).unwrap();
    let c = r.resolve(&mut g, &mut batch, &s2, main, P2PTypeId(0), claim()).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(g.personas.len(), 3);
    assert_eq!(batch.p2p.len(), 2);
    assert_eq!(batch.p2p[0].person1, main);
    assert_eq!(r.name(c), "Ann Lee");
  }

  #[test]
  fn no_source_and_disabled_keep_the_main_persona() {
    let (mut g, mut r, main) = setup(true);
    let mut batch = LeafBatch::default();
    let got = r
      .resolve(&mut g, &mut batch, &SourceKey::NoSource, main, P2PTypeId(0), claim())
      .unwrap();
    assert_eq!(got, main);

    let (mut g, mut r, main) = setup(false);
    let s1 = SourceKey::Record("@S1@".into());
    let got = r.resolve(&mut g, &mut batch, &s1, main, P2PTypeId(0), claim()).unwrap();
    assert_eq!(got, main);
    assert!(batch.p2p.is_empty());
    assert_eq!(g.personas.len(), 1);
  }

  #[test]
  fn inline_sources_always_fork() {
    let (mut g, mut r, main) = setup(true);
    let mut batch = LeafBatch::default();
    let a = r
      .resolve(&mut g, &mut batch, &SourceKey::Inline, main, P2PTypeId(0), claim())
      .unwrap();
    let b = r
      .resolve(&mut g, &mut batch, &SourceKey::Inline, main, P2PTypeId(0), claim())
      .unwrap();
    assert_ne!(a, b);
  }

  #[test]
  fn placeholders_are_never_forked() {
    let mut g = MemoryGraph::new();
    let mut r = PersonaResolver::new(true);
    let id = PersonaId(0);
    r.register(id, None, "@Unknown@", Utc::now());
    let mut batch = LeafBatch::default();
    let s1 = SourceKey::Record("@S1@".into());
    assert_eq!(
      r.resolve(&mut g, &mut batch, &s1, id, P2PTypeId(0), claim()).unwrap(),
      id
    );
  }
}
