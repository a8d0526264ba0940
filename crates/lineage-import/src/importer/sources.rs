//! Sources, citations and media.
//!
//! Every SOUR record becomes a source under the file's own source. A
//! citation of a source that is cited only once, or of an inline source,
//! adds its details (page, quality, ...) to that source. Otherwise each
//! distinct set of details gets one nested source, shared by every citation
//! with the same details.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use lineage_core::{
  GraphSink,
  ids::{PlaceId, SourceId},
  model::{CitationPart, Representation, Source},
};
use lineage_gedcom::{GedcomFile, Record};
use tracing::debug;

use super::Importer;
use crate::{
  error::{Error, Result},
  persona::SourceKey,
};

/// Fields of a SOUR record.
const SOURCE_FIELDS: &[&str] = &[
  "TITL", "ABBR", "AUTH", "PUBL", "TEXT", "NOTE", "REPO", "OBJE", "CHAN", "DATA",
];

/// Fields of an inline source that describe the source rather than the
/// citation.
const INLINE_SOURCE_FIELDS: &[&str] =
  &["TITL", "ABBR", "AUTH", "PUBL", "TEXT", "REPO", "CHAN"];

/// Source fields stored as citation parts of the source itself.
const DESCRIPTIVE_PARTS: &[&str] = &["AUTH", "PUBL", "TEXT"];

pub(super) const MEDIA_FIELDS: &[&str] = &["FILE", "FORM", "TITL", "CHAN"];

const UNKNOWN_MIME: &str = "application/octet-stream";

/// A source a fact is cited from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cited {
  pub key:    SourceKey,
  pub source: SourceId,
}

#[derive(Debug, Clone)]
struct SourceInfo {
  title:       String,
  abbrev:      String,
  last_change: DateTime<Utc>,
  commented:   bool,
}

#[derive(Debug)]
pub(super) struct SourceManager {
  file_source: SourceId,
  /// SOUR xrefs, and `"<xref>  K=V ..."` keys of nested sources.
  by_key:      HashMap<String, SourceId>,
  info:        HashMap<SourceId, SourceInfo>,
  /// How many times each SOUR xref is cited in the whole file.
  refs:        HashMap<String, usize>,
  /// `(source, file, title)` of every representation created.
  media:       HashSet<(SourceId, String, String)>,
}

impl SourceManager {
  pub fn new(file: &GedcomFile, file_source: SourceId) -> Self {
    let mut refs: HashMap<String, usize> = HashMap::new();
    for (_, record) in file.descendants() {
      if record.tag == "SOUR"
        && let Some(xref) = record.pointer()
      {
        *refs.entry(xref.to_string()).or_default() += 1;
      }
    }
    Self {
      file_source,
      by_key: HashMap::new(),
      info: HashMap::new(),
      refs,
      media: HashSet::new(),
    }
  }

  pub fn file_source(&self) -> SourceId { self.file_source }

  /// Citation used for facts that cite nothing.
  pub fn no_source(&self) -> Cited {
    Cited {
      key:    SourceKey::NoSource,
      source: self.file_source,
    }
  }

  fn references(&self, xref: &str) -> usize {
    self.refs.get(xref).copied().unwrap_or_default()
  }
}

/// Details of a citation as `(tag, value)`, with DATA flattened. NOTE and
/// OBJE are not details.
fn citation_parts(citation: &Record, inline: bool) -> Vec<(&str, &str)> {
  let mut parts = Vec::new();
  for child in &citation.children {
    match child.tag.as_str() {
      "NOTE" | "OBJE" => {}
      "DATA" => parts.extend(
        child
          .children
          .iter()
          .map(|c| (c.tag.as_str(), c.value.as_str())),
      ),
      tag if inline && INLINE_SOURCE_FIELDS.contains(&tag) => {}
      tag => parts.push((tag, child.value.as_str())),
    }
  }
  parts
}

fn mime_type(form: &str) -> Option<&'static str> {
  match form.to_ascii_lowercase().as_str() {
    "jpeg" | "jpg" => Some("image/jpeg"),
    "png" => Some("image/png"),
    "gif" => Some("image/gif"),
    "tiff" | "tif" => Some("image/tiff"),
    "bmp" => Some("image/bmp"),
    "pdf" => Some("application/pdf"),
    _ => None,
  }
}

/// Title of a media object, looking through a pointer and into FILE.
pub(super) fn media_title<'r>(file: &'r GedcomFile, obje: &'r Record) -> &'r str {
  let obje = obje.pointer().and_then(|x| file.resolve(x)).unwrap_or(obje);
  obje
    .text("TITL")
    .or_else(|| obje.first("FILE").and_then(|f| f.text("TITL")))
    .unwrap_or_default()
}

impl<S: GraphSink> Importer<'_, S> {
  /// Create a source from a SOUR record. An `inline` source is one written
  /// inside a citation: its citation details are left to [`Self::cite`]
  /// and its tags are not checked here.
  pub(super) fn create_source(
    &mut self,
    record: &Record,
    subject_place: Option<PlaceId>,
    inline: bool,
  ) -> Result<SourceId> {
    let described = (inline && record.pointer().is_none())
      .then_some(record.value.as_str())
      .filter(|v| !v.is_empty());
    let title = record
      .text("TITL")
      .or(described)
      .unwrap_or("Unnamed source")
      .to_string();
    let abbrev = record.text("ABBR").unwrap_or(title.as_str()).to_string();

    let mut comments = Vec::new();
    if !inline {
      comments.push(self.notes(record));
      for data in record.all("DATA") {
        comments.push(self.notes(data));
      }
    }
    comments.retain(|c| !c.is_empty());
    let comments = comments.join("\n\n");
    let commented = !comments.is_empty();

    let last_change = self.last_change(record);
    let id = self
      .sink
      .create_source(Source {
        higher_source: Some(self.sources.file_source),
        subject_place,
        subject_date: None,
        researcher: self.researcher,
        title: title.clone(),
        abbrev: abbrev.clone(),
        biblio: title.clone(),
        comments,
        last_change,
      })
      .map_err(Error::sink)?;
    self.sources.info.insert(id, SourceInfo {
      title,
      abbrev,
      last_change,
      commented,
    });

    let mut parts: Vec<(&str, &str)> = Vec::new();
    for &tag in DESCRIPTIVE_PARTS {
      parts.extend(record.all(tag).map(|r| (tag, r.value.as_str())));
    }
    if !inline {
      for data in record.all("DATA") {
        parts.extend(
          data
            .children
            .iter()
            .filter(|c| c.tag != "NOTE")
            .map(|c| (c.tag.as_str(), c.value.as_str())),
        );
      }
    }
    self.add_citation_parts(id, &parts)?;

    if !inline {
      self.add_media(id, record.all("OBJE").collect())?;
    }
    for repo in record.all("REPO") {
      self.link_repository(id, repo)?;
    }
    if !inline {
      self.check_fields(record, "SOUR", SOURCE_FIELDS);
    }
    if let Some(xref) = &record.xref {
      self.sources.by_key.insert(xref.clone(), id);
    }
    Ok(id)
  }

  /// A source holding media found on a place or an individual.
  pub(super) fn create_media_source(
    &mut self,
    title: String,
    objes: Vec<&Record>,
    subject_place: Option<PlaceId>,
    last_change: DateTime<Utc>,
  ) -> Result<SourceId> {
    let id = self
      .sink
      .create_source(Source {
        higher_source: Some(self.sources.file_source),
        subject_place,
        subject_date: None,
        researcher: self.researcher,
        title: title.clone(),
        abbrev: title.clone(),
        biblio: title.clone(),
        comments: String::new(),
        last_change,
      })
      .map_err(Error::sink)?;
    self.sources.info.insert(id, SourceInfo {
      title: title.clone(),
      abbrev: title,
      last_change,
      commented: false,
    });
    self.add_media(id, objes)?;
    Ok(id)
  }

  /// The sources `data` is cited from, creating inline and nested sources
  /// as needed. A record that cites nothing is cited from the file.
  pub(super) fn cite(&mut self, data: Option<&Record>) -> Result<Vec<Cited>> {
    let citations: Vec<&Record> =
      data.map(|d| d.all("SOUR").collect()).unwrap_or_default();
    if citations.is_empty() {
      return Ok(vec![self.sources.no_source()]);
    }

    let mut cited = Vec::with_capacity(citations.len());
    for citation in citations {
      let known = citation
        .pointer()
        .and_then(|xref| Some((xref, *self.sources.by_key.get(xref)?)));

      // Whether details extend the cited source instead of nesting.
      let (key, parent, extend, inline) = match known {
        Some((xref, id)) => (
          SourceKey::Record(xref.to_string()),
          id,
          self.sources.references(xref) <= 1,
          false,
        ),
        None => {
          if let Some(xref) = citation.pointer() {
            self.report(citation, format!("Undefined source {xref}"));
          }
          let id = self.create_source(citation, None, true)?;
          (SourceKey::Inline, id, true, true)
        }
      };

      let notes = self.notes(citation);
      let parts = citation_parts(citation, inline);
      let mut source = parent;
      let mut notes_pending = !notes.is_empty();

      if !parts.is_empty() {
        let rendered: String =
          parts.iter().map(|(k, v)| format!(" {k}={v}")).collect();
        let nested_key = format!("{} {rendered}", citation.value);
        match self.sources.by_key.get(&nested_key).copied() {
          Some(nested) => {
            source = nested;
            notes_pending = false;
          }
          None if extend => self.add_citation_parts(parent, &parts)?,
          None => {
            source = self.create_nested(parent, &rendered, notes.clone())?;
            notes_pending = false;
            self.sources.by_key.insert(nested_key, source);
            self.add_citation_parts(source, &parts)?;
          }
        }
      }

      if notes_pending {
        if extend {
          self.append_comment(source, &notes)?;
        } else {
          let message = format!(
            "Dropped NOTE of a citation of {} without details",
            citation.value
          );
          self.report(citation, message);
        }
      }
      self.add_media(source, citation.all("OBJE").collect())?;
      cited.push(Cited { key, source });
    }
    Ok(cited)
  }

  fn create_nested(
    &mut self,
    parent: SourceId,
    rendered: &str,
    comments: String,
  ) -> Result<SourceId> {
    let Some(info) = self.sources.info.get(&parent).cloned() else {
      return Err(Error::Model(lineage_core::Error::UnknownId {
        kind: "source",
        id:   parent.0,
      }));
    };
    let commented = !comments.is_empty();
    let title = format!("{}{rendered}", info.title);
    let abbrev = format!("{}{rendered}", info.abbrev);
    let id = self
      .sink
      .create_source(Source {
        higher_source: Some(parent),
        subject_place: None,
        subject_date: None,
        researcher: self.researcher,
        title: title.clone(),
        abbrev: abbrev.clone(),
        biblio: String::new(),
        comments,
        last_change: info.last_change,
      })
      .map_err(Error::sink)?;
    debug!(%parent, nested = %id, "nested source");
    self.sources.info.insert(id, SourceInfo {
      title,
      abbrev,
      last_change: info.last_change,
      commented,
    });
    Ok(id)
  }

  fn append_comment(&mut self, source: SourceId, notes: &str) -> Result<()> {
    let separated = match self.sources.info.get_mut(&source) {
      Some(info) if info.commented => format!("\n\n{notes}"),
      Some(info) => {
        info.commented = true;
        notes.to_string()
      }
      None => notes.to_string(),
    };
    self
      .sink
      .append_source_comment(source, &separated)
      .map_err(Error::sink)
  }

  fn add_citation_parts(
    &mut self,
    source: SourceId,
    parts: &[(&str, &str)],
  ) -> Result<()> {
    for &(tag, value) in parts {
      if value.is_empty() {
        continue;
      }
      let part_type = self.types.citation_or_create(&mut *self.sink, tag)?;
      self.batch.citation_parts.push(CitationPart {
        source,
        part_type,
        value: value.to_string(),
      });
    }
    Ok(())
  }

  /// Attach media to `source`, once per `(file, title)`.
  fn add_media(&mut self, source: SourceId, objes: Vec<&Record>) -> Result<()> {
    let file = self.file;
    for obje in objes {
      let inline = obje.pointer().is_none();
      let obje = match obje.pointer() {
        Some(xref) => match file.resolve(xref) {
          Some(target) => target,
          None => {
            self.report(obje, format!("Undefined media {xref}"));
            continue;
          }
        },
        None => obje,
      };

      let file_record = obje.first("FILE");
      let path = file_record.map(|f| f.value.clone()).unwrap_or_default();
      if path.is_empty() {
        self.report(obje, "Media without FILE");
        continue;
      }
      let title = media_title(file, obje).to_string();
      let form = obje
        .text("FORM")
        .or_else(|| file_record.and_then(|f| f.text("FORM")));
      if inline {
        self.check_fields(obje, "OBJE", MEDIA_FIELDS);
      }
      if !self.sources.media.insert((source, path.clone(), title.clone())) {
        continue;
      }

      let mime_type = match form {
        None => UNKNOWN_MIME,
        Some(form) => match mime_type(form) {
          Some(mime) => mime,
          None => {
            self.report(obje, format!("Unknown media format {form}"));
            UNKNOWN_MIME
          }
        },
      };
      self
        .sink
        .create_representation(Representation {
          source,
          mime_type: mime_type.to_string(),
          file: path,
          comments: title,
        })
        .map_err(Error::sink)?;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn citation_details_flatten_data() {
    let file = lineage_gedcom::parse_str(
      "0 HEAD\n0 @I1@ INDI\n1 SOUR @S1@\n2 PAGE 12\n2 NOTE n\n2 DATA\n3 DATE 1800\n",
      "t.ged",
    )
    .unwrap();
    let citation = file.resolve("@I1@").unwrap().first("SOUR").unwrap();
    assert_eq!(citation_parts(citation, false), vec![
      ("PAGE", "12"),
      ("DATE", "1800")
    ]);
  }

  #[test]
  fn inline_source_fields_are_not_details() {
    let file = lineage_gedcom::parse_str(
      "0 HEAD\n0 @I1@ INDI\n1 SOUR Parish book\n2 TITL Book\n2 PAGE 3\n",
      "t.ged",
    )
    .unwrap();
    let citation = file.resolve("@I1@").unwrap().first("SOUR").unwrap();
    assert_eq!(citation_parts(citation, true), vec![("PAGE", "3")]);
  }

  #[test]
  fn references_are_counted_below_top_level() {
    let file = lineage_gedcom::parse_str(
      "0 HEAD\n0 @S1@ SOUR\n0 @I1@ INDI\n1 SOUR @S1@\n1 BIRT\n2 SOUR @S1@\n",
      "t.ged",
    )
    .unwrap();
    let manager = SourceManager::new(&file, SourceId(0));
    assert_eq!(manager.references("@S1@"), 2);
    assert_eq!(manager.references("@S2@"), 0);
  }

  #[test]
  fn known_media_formats() {
    assert_eq!(mime_type("JPG"), Some("image/jpeg"));
    assert_eq!(mime_type("pdf"), Some("application/pdf"));
    assert_eq!(mime_type("wav"), None);
  }
}
