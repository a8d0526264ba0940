//! Repositories and the sources they hold.

use lineage_core::{
  GraphSink,
  ids::{RepositoryId, SourceId},
  model::{Repository, RepositorySource, SourceMedium},
};
use lineage_gedcom::{Field, Record};

use super::{Importer, places::address_text};
use crate::error::{Error, Result};

/// CALN is allowed too: it is how an inline REPO under a SOUR gives the
/// call number.
const REPOSITORY_FIELDS: &[&str] =
  &["NAME", "ADDR", "WWW", "PHON", "EMAIL", "RIN", "NOTE", "CALN"];

/// `(tag, label)` of the contact details kept in a repository's info.
const CONTACTS: &[(&str, &str)] = &[
  ("WWW", "URL"),
  ("PHON", "Phone"),
  ("EMAIL", "Email"),
  ("RIN", "RIN"),
];

impl<S: GraphSink> Importer<'_, S> {
  /// Create a repository from a REPO record. A record with no name, address
  /// or contact details creates nothing.
  pub(super) fn create_repository(
    &mut self,
    record: &Record,
  ) -> Result<Option<RepositoryId>> {
    let mut info: Vec<String> = CONTACTS
      .iter()
      .flat_map(|&(tag, label)| {
        record
          .all(tag)
          .filter(|r| !r.value.is_empty())
          .map(move |r| format!("{label}={}", r.value))
      })
      .collect();
    let notes = self.notes(record);
    if !notes.is_empty() {
      info.push(notes);
    }
    let info = info.join("\n");

    let addr = record
      .first("ADDR")
      .map(address_text)
      .filter(|a| !a.is_empty());
    let name = record.text("NAME").map(str::to_string);

    let repository = if name.is_none() && addr.is_none() && info.is_empty() {
      None
    } else {
      let place = match record.first("ADDR") {
        Some(_) => self.place_of(record)?,
        None => None,
      };
      let id = self
        .sink
        .create_repository(Repository {
          name: name.unwrap_or_else(|| info.clone()),
          place,
          addr,
          info,
        })
        .map_err(Error::sink)?;
      Some(id)
    };

    if let (Some(id), Some(xref)) = (repository, &record.xref) {
      self.repositories.insert(xref.clone(), id);
    }
    self.check_fields(record, "REPO", REPOSITORY_FIELDS);
    Ok(repository)
  }

  /// Record that `source` is held by the repository `reference` points to
  /// or describes inline, with its call number and medium.
  pub(super) fn link_repository(
    &mut self,
    source: SourceId,
    reference: &Record,
  ) -> Result<()> {
    let repository = match reference.pointer() {
      Some(xref) => {
        let known = self.repositories.get(xref).copied();
        if known.is_none() && self.file.resolve(xref).is_none() {
          self.report(reference, format!("Undefined repository {xref}"));
        }
        self.check_fields(reference, "REPO", &["CALN"]);
        known
      }
      None => self.create_repository(reference)?,
    };

    let call = match reference.field("CALN") {
      Field::Absent => None,
      Field::Scalar(call) | Field::Record(call) => Some(call),
      Field::List(calls) => {
        for extra in &calls[1..] {
          self.report(extra, "A single CALN per REPO is supported");
        }
        calls.first().copied()
      }
    };
    let medi = call.and_then(|c| c.text("MEDI"));
    let medium = match medi {
      None => SourceMedium::Unknown,
      Some(text) => match text.parse::<SourceMedium>() {
        Ok(medium) => medium,
        Err(_) => {
          self.report(reference, format!("Unknown medium {text}"));
          SourceMedium::Unknown
        }
      },
    };

    self
      .sink
      .create_repository_source(RepositorySource {
        repository,
        source,
        call_number: call.map(|c| c.value.clone()).filter(|v| !v.is_empty()),
        description: medi.map(str::to_string),
        medium,
      })
      .map_err(Error::sink)
  }
}
