//! One import run.
//!
//! The run owns every cache it needs, so two runs never share state. Passes
//! happen in a fixed order because later ones look up what earlier ones
//! created:
//!
//!   REPO ─► SOUR ─► INDI (bare) ─► INDI (details) ─► FAM ─► leaf batch

mod events;
mod individuals;
mod places;
mod repositories;
mod sources;

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use lineage_core::{
  GraphSink, LeafBatch,
  assertion::Claim,
  ids::{EventId, PersonaId, RepositoryId, ResearcherId, SourceId},
  model::{Project, Researcher, Source, SuretyLevel, SuretyScheme},
};
use lineage_date::DateRange;
use lineage_gedcom::{GedcomFile, Record};
use tracing::info;

pub(crate) use self::sources::Cited;
use self::{
  places::{PlaceCache, address_text},
  sources::{MEDIA_FIELDS, SourceManager},
};
use crate::{
  ImportSummary,
  error::{Error, Result},
  options::ImportOptions,
  persona::{PersonaResolver, SAME_INDIVIDUAL_RATIONALE},
  report::{Diagnostic, Reporter},
  types::TypeCache,
};

const TOP_LEVEL_FIELDS: &[&str] = &[
  "HEAD", "SUBM", "TRLR", "SOUR", "INDI", "FAM", "REPO", "NOTE", "OBJE",
];

pub(crate) struct Importer<'a, S: GraphSink> {
  file:         &'a GedcomFile,
  sink:         &'a mut S,
  reporter:     &'a mut dyn Reporter,
  options:      &'a ImportOptions,
  /// Fallback for every missing or unreadable change date.
  started:      DateTime<Utc>,
  researcher:   ResearcherId,
  surety:       SuretyLevel,
  surety_label: String,
  batch:        LeafBatch,
  types:        TypeCache,
  sources:      SourceManager,
  personas:     PersonaResolver,
  places:       PlaceCache,
  repositories: HashMap<String, RepositoryId>,
  /// Birth event of each main persona, so a birth is never created twice.
  births:       HashMap<PersonaId, EventId>,
  diagnostics:  usize,
}

impl<'a, S: GraphSink> Importer<'a, S> {
  /// Start a run: register the researcher, the project, the vocabularies
  /// and the source standing for the file itself.
  pub fn new(
    file: &'a GedcomFile,
    sink: &'a mut S,
    options: &'a ImportOptions,
    reporter: &'a mut dyn Reporter,
  ) -> Result<Self> {
    let started = Utc::now();
    let scheme =
      SuretyScheme::new("Default scheme", options.surety_scheme.clone())?;
    let surety = scheme.default_level();
    let surety_label = scheme.label(surety).unwrap_or_default().to_string();

    let researcher = sink
      .create_researcher(researcher_of(file))
      .map_err(Error::sink)?;
    let described = file
      .head()
      .and_then(|h| h.text("FILE"))
      .unwrap_or(file.name.as_str());
    sink
      .create_project(Project {
        name: "Gedcom import".into(),
        description: format!("Import from {described}"),
        researcher,
        researcher_role: "Generated GEDCOM file".into(),
        scheme,
      })
      .map_err(Error::sink)?;

    let types = TypeCache::seed(sink)?;

    let head_date = file.head().and_then(|h| h.first("DATE"));
    let file_source = sink
      .create_source(Source {
        higher_source: None,
        subject_place: None,
        subject_date:  head_date.map(|d| DateRange::parse(&d.value)),
        researcher,
        title:         file.name.clone(),
        abbrev:        file.name.clone(),
        biblio:        file.name.clone(),
        comments:      String::new(),
        last_change:   head_date
          .and_then(|d| parse_gedcom_date(&d.value, d.text("TIME")))
          .unwrap_or(started),
      })
      .map_err(Error::sink)?;

    Ok(Self {
      file,
      sink,
      reporter,
      options,
      started,
      researcher,
      surety,
      surety_label,
      batch: LeafBatch::default(),
      types,
      sources: SourceManager::new(file, file_source),
      personas: PersonaResolver::new(options.multiple_personas),
      places: PlaceCache::default(),
      repositories: HashMap::new(),
      births: HashMap::new(),
      diagnostics: 0,
    })
  }

  pub fn run(mut self) -> Result<ImportSummary> {
    let file = self.file;
    info!(file = %file.name, records = file.records.len(), "importing");

    let mut repositories = 0;
    for repo in file.all("REPO") {
      repositories += usize::from(self.create_repository(repo)?.is_some());
    }
    let mut sources = 0;
    for sour in file.all("SOUR") {
      self.create_source(sour, None, false)?;
      sources += 1;
    }
    info!(repositories, sources, "imported repositories and sources");

    let mut individuals = 0;
    for indi in file.all("INDI") {
      self.create_bare_individual(indi)?;
      individuals += 1;
    }
    for indi in file.all("INDI") {
      self.import_individual(indi)?;
    }
    info!(individuals, "imported individuals");

    let mut families = 0;
    for fam in file.all("FAM") {
      self.import_family(fam)?;
      families += 1;
    }
    info!(families, "imported families");

    for obje in file.all("OBJE") {
      self.check_fields(obje, "OBJE", MEDIA_FIELDS);
    }
    for (tag, records) in file.for_all_fields() {
      if !TOP_LEVEL_FIELDS.contains(&tag) {
        self.report(records[0], format!("Unhandled FILE.{tag}"));
      }
    }

    let batch = std::mem::take(&mut self.batch);
    let leaves = batch.len();
    self.sink.bulk_insert(batch).map_err(Error::sink)?;
    info!(leaves, diagnostics = self.diagnostics, "import finished");

    Ok(ImportSummary {
      file: file.name.clone(),
      researcher: self.researcher,
      file_source: self.sources.file_source(),
      individuals,
      families,
      sources,
      repositories,
      surety: self.surety_label,
      leaves,
      diagnostics: self.diagnostics,
    })
  }

  // ── Shared helpers ────────────────────────────────────────────────────

  fn report(&mut self, at: &Record, message: impl Into<String>) {
    self.diagnostics += 1;
    self.reporter.report(Diagnostic {
      location: Some(at.location.clone()),
      message:  message.into(),
    });
  }

  /// Report every child tag of `record` not listed in `handled`.
  fn check_fields(&mut self, record: &Record, context: &str, handled: &[&str]) {
    for (tag, records) in record.for_all_fields() {
      if !handled.contains(&tag) {
        self.report(records[0], format!("Unhandled {context}.{tag}"));
      }
    }
  }

  fn claim(
    &self,
    source: SourceId,
    rationale: String,
    last_change: DateTime<Utc>,
  ) -> Claim {
    Claim {
      researcher: self.researcher,
      surety: self.surety,
      source,
      rationale,
      last_change,
    }
  }

  /// The persona a fact about `persona` cited as `cited` is attached to.
  fn persona_for(
    &mut self,
    cited: &Cited,
    persona: PersonaId,
    last_change: DateTime<Utc>,
  ) -> Result<PersonaId> {
    let Some(same_as) = self.types.same_as() else {
      return Ok(persona);
    };
    let link = self.claim(
      cited.source,
      SAME_INDIVIDUAL_RATIONALE.to_string(),
      last_change,
    );
    self.personas.resolve(
      &mut *self.sink,
      &mut self.batch,
      &cited.key,
      persona,
      same_as,
      link,
    )
  }

  /// Text of the NOTE children of `record`, resolving pointers to top-level
  /// NOTE records. Several notes are separated by a blank line.
  fn notes(&mut self, record: &Record) -> String {
    let file = self.file;
    let mut notes = Vec::new();
    for note in record.all("NOTE") {
      match note.pointer() {
        Some(xref) => match file.resolve(xref) {
          Some(target) => notes.push(target.value.clone()),
          None => self.report(note, format!("Undefined note {xref}")),
        },
        None if !note.value.is_empty() => notes.push(note.value.clone()),
        None => {}
      }
    }
    notes.join("\n\n")
  }

  /// Most recent CHAN date of `record`, or the start of the run.
  fn last_change(&self, record: &Record) -> DateTime<Utc> {
    record
      .all("CHAN")
      .filter_map(|chan| {
        let date = chan.first("DATE")?;
        parse_gedcom_date(&date.value, date.text("TIME"))
      })
      .max()
      .unwrap_or(self.started)
  }

  /// The top-level record `pointer` refers to. Dangling or missing pointers
  /// are reported.
  fn resolve(&mut self, pointer: &Record, what: &str) -> Option<&'a Record> {
    let file = self.file;
    let Some(xref) = pointer.pointer() else {
      self.report(pointer, format!("Expected a pointer to a {what}"));
      return None;
    };
    let found = file.resolve(xref);
    if found.is_none() {
      self.report(pointer, format!("Undefined {what} {xref}"));
    }
    found
  }
}

// ─── Free helpers ────────────────────────────────────────────────────────────

/// `12 JAN 1800` with an optional `HH:MM[:SS]` time, as found in CHAN and
/// HEAD dates.
pub(crate) fn parse_gedcom_date(
  date: &str,
  time: Option<&str>,
) -> Option<DateTime<Utc>> {
  let date = NaiveDate::parse_from_str(date.trim(), "%d %b %Y").ok()?;
  let time = time
    .and_then(|t| {
      NaiveTime::parse_from_str(t.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(t.trim(), "%H:%M"))
        .ok()
    })
    .or_else(|| NaiveTime::from_hms_opt(0, 0, 0))?;
  Some(Utc.from_utc_datetime(&date.and_time(time)))
}

/// The submitter named in the header, if any.
fn researcher_of(file: &GedcomFile) -> Researcher {
  let submitter = file
    .head()
    .and_then(|h| h.first("SUBM"))
    .and_then(|s| s.pointer())
    .and_then(|xref| file.resolve(xref))
    .or_else(|| file.first("SUBM"));
  match submitter {
    Some(subm) => Researcher {
      name:    subm.text("NAME").unwrap_or("unknown").to_string(),
      comment: subm.first("ADDR").map(address_text).unwrap_or_default(),
    },
    None => Researcher {
      name:    "unknown".into(),
      comment: String::new(),
    },
  }
}

/// A record built by the importer rather than read from the file, located
/// at `at`.
fn synthetic(tag: &str, at: &Record, value: &str, children: Vec<Record>) -> Record {
  Record {
    tag: tag.to_string(),
    xref: None,
    value: value.to_string(),
    location: at.location.clone(),
    children,
  }
}

#[cfg(test)]
mod tests {
  use chrono::{Datelike, Timelike};

  use super::*;

  #[test]
  fn gedcom_dates() {
    let d = parse_gedcom_date("3 MAR 2010", Some("14:05:09")).unwrap();
    assert_eq!((d.year(), d.month(), d.day()), (2010, 3, 3));
    assert_eq!((d.hour(), d.minute(), d.second()), (14, 5, 9));

    let d = parse_gedcom_date("12 Jan 1999", Some("08:30")).unwrap();
    assert_eq!((d.hour(), d.minute()), (8, 30));

    assert!(parse_gedcom_date("12 Jan 1999", None).is_some());
    assert!(parse_gedcom_date("sometime", None).is_none());
  }
}
