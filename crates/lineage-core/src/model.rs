//! Entities of the genealogical graph.
//!
//! Everything here is created once by an import run and not mutated
//! afterwards, except a source's `comments`, which may still grow while the
//! run that created it is active.

use chrono::{DateTime, Utc};
use lineage_date::DateRange;
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  ids::{
    CharacteristicId, CharacteristicPartTypeId, CitationPartTypeId,
    EventTypeId, PlaceId, PlacePartTypeId, RepositoryId, ResearcherId,
    SourceId,
  },
};

// ─── Provenance of the run ───────────────────────────────────────────────────

/// Whoever produced the imported data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Researcher {
  pub name:    String,
  /// Free-form contact details, typically a flattened postal address.
  pub comment: String,
}

/// Ordered confidence levels, lowest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuretyScheme {
  pub name:   String,
  pub levels: Vec<String>,
}

/// Index into a [`SuretyScheme`]'s levels.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(transparent)]
pub struct SuretyLevel(pub u8);

impl SuretyScheme {
  pub fn new(name: impl Into<String>, levels: Vec<String>) -> Result<Self> {
    if levels.is_empty() {
      return Err(Error::EmptySuretyScheme);
    }
    Ok(Self {
      name: name.into(),
      levels,
    })
  }

  /// The middle level, used for every assertion an import makes.
  pub fn default_level(&self) -> SuretyLevel {
    SuretyLevel(u8::try_from(self.levels.len() / 2).unwrap_or(u8::MAX))
  }

  pub fn label(&self, level: SuretyLevel) -> Option<&str> {
    self.levels.get(usize::from(level.0)).map(String::as_str)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
  pub name:            String,
  pub description:     String,
  pub researcher:      ResearcherId,
  pub researcher_role: String,
  pub scheme:          SuretyScheme,
}

// ─── People and facts ────────────────────────────────────────────────────────

/// One representation of an individual. Several personas may describe the
/// same real person, each as seen through one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
  pub name:        String,
  pub description: String,
  pub last_change: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
  pub name:   String,
  /// GEDCOM tag this type is imported from, if any.
  pub gedcom: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub event_type: EventTypeId,
  /// Human-readable, e.g. "Birth of John Smith".
  pub name:       String,
  pub place:      Option<PlaceId>,
  pub date:       Option<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicPartType {
  pub name:         String,
  pub gedcom:       Option<String>,
  /// Whether parts of this type make up a person's name.
  pub is_name_part: bool,
}

/// A typed attribute of a persona (name, sex, occupation, ...), made of one
/// or more [`CharacteristicPart`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Characteristic {
  pub name:  String,
  pub place: Option<PlaceId>,
  pub date:  Option<DateRange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacteristicPart {
  pub characteristic: CharacteristicId,
  pub part_type:      CharacteristicPartTypeId,
  pub value:          String,
}

// ─── Sources ─────────────────────────────────────────────────────────────────

/// A citable origin of information. Sources form a tree through
/// `higher_source`: a register is higher than one entry in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
  pub higher_source: Option<SourceId>,
  /// The place this source is about, for media attached to a place.
  pub subject_place: Option<PlaceId>,
  pub subject_date:  Option<DateRange>,
  pub researcher:    ResearcherId,
  pub title:         String,
  pub abbrev:        String,
  pub biblio:        String,
  pub comments:      String,
  pub last_change:   DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationPartType {
  pub name:   String,
  pub gedcom: Option<String>,
}

/// One detail of a citation (page, author, call number, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationPart {
  pub source:    SourceId,
  pub part_type: CitationPartTypeId,
  pub value:     String,
}

/// A media file attached to a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representation {
  pub source:    SourceId,
  pub mime_type: String,
  pub file:      String,
  pub comments:  String,
}

// ─── Places ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
  pub name:         String,
  pub parent_place: Option<PlaceId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacePartType {
  pub name:   String,
  pub gedcom: Option<String>,
}

/// One component of a place (city, country, coordinates, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacePart {
  pub place:     PlaceId,
  pub part_type: PlacePartTypeId,
  pub value:     String,
}

// ─── Repositories ────────────────────────────────────────────────────────────

/// A holder of sources, such as an archive or a library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
  pub name:  String,
  pub place: Option<PlaceId>,
  pub addr:  Option<String>,
  /// URLs, phone numbers and notes, one per line.
  pub info:  String,
}

/// Physical form of a source as held by a repository, from GEDCOM `MEDI`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  strum::Display,
  strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SourceMedium {
  /// No medium given, or one that is not recognised.
  #[default]
  Unknown,
  Audio,
  Book,
  Card,
  Electronic,
  Fiche,
  Film,
  Magazine,
  Manuscript,
  Map,
  Newspaper,
  Photo,
  Tombstone,
  Video,
}

/// Links a source to the repository holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositorySource {
  /// `None` when the reference only carried a call number.
  pub repository:  Option<RepositoryId>,
  pub source:      SourceId,
  pub call_number: Option<String>,
  pub description: Option<String>,
  pub medium:      SourceMedium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct P2PType {
  pub name: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_surety_is_the_middle_level() {
    let scheme = SuretyScheme::new(
      "default",
      ["very low", "low", "normal", "high", "very high"]
        .map(String::from)
        .to_vec(),
    )
    .unwrap();
    assert_eq!(scheme.default_level(), SuretyLevel(2));
    assert_eq!(scheme.label(scheme.default_level()), Some("normal"));
  }

  #[test]
  fn empty_surety_scheme_is_rejected() {
    assert!(matches!(
      SuretyScheme::new("none", Vec::new()),
      Err(Error::EmptySuretyScheme)
    ));
  }

  #[test]
  fn media_names_parse_case_insensitively() {
    assert_eq!("Book".parse::<SourceMedium>().unwrap(), SourceMedium::Book);
    assert_eq!(
      "MICROFILM".parse::<SourceMedium>().ok(),
      None,
      "only GEDCOM media are known"
    );
    assert_eq!(SourceMedium::default(), SourceMedium::Unknown);
    assert_eq!(SourceMedium::Tombstone.to_string(), "tombstone");
  }
}
