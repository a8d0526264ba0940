//! Assertions tie a fact to a persona together with who claims it, from
//! which source, and how surely.
//!
//! A fact with no source is asserted against the pseudo-source of the
//! imported file, so every assertion names a real [`SourceId`]. Assertions
//! with and without a real source may coexist for the same fact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  ids::{
    CharacteristicId, EventId, P2PTypeId, PersonaId, ResearcherId, SourceId,
  },
  model::SuretyLevel,
};

/// Provenance shared by every assertion kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
  pub researcher:  ResearcherId,
  pub surety:      SuretyLevel,
  pub source:      SourceId,
  pub rationale:   String,
  pub last_change: DateTime<Utc>,
}

/// Part a persona plays in an event.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
  strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventRole {
  Principal,
  BirthFather,
  BirthMother,
}

/// Persona to event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct P2E {
  pub claim:   Claim,
  pub persona: PersonaId,
  pub event:   EventId,
  pub role:    EventRole,
}

/// Persona to characteristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct P2C {
  pub claim:          Claim,
  pub persona:        PersonaId,
  pub characteristic: CharacteristicId,
}

/// Persona to persona, such as "same as" between two personas describing one
/// individual.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct P2P {
  pub claim:    Claim,
  pub person1:  PersonaId,
  pub person2:  PersonaId,
  pub p2p_type: P2PTypeId,
}
