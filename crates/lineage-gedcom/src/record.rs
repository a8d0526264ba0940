//! The record tree and its accessors.
//!
//! GEDCOM lets almost any tag repeat and any record carry sub-records, so
//! lookups by tag say what they found: nothing, a bare value, one record
//! with sub-records, or several records.

use std::{collections::HashMap, fmt, sync::Arc};

/// Where a record starts in its file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
  pub file: Arc<str>,
  /// 1-based.
  pub line: usize,
}

impl fmt::Display for Location {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.file, self.line)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
  pub tag:      String,
  /// Identifier this record defines, such as `@I1@` in `0 @I1@ INDI`.
  pub xref:     Option<String>,
  /// The line's value with `CONT`/`CONC` continuations folded in. For a
  /// pointer such as `1 FAMC @F1@` this is the pointer.
  pub value:    String,
  pub location: Location,
  pub children: Vec<Record>,
}

/// Result of looking a tag up among a record's children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<'a> {
  Absent,
  /// A single child without sub-records.
  Scalar(&'a Record),
  /// A single child with sub-records.
  Record(&'a Record),
  /// The tag is repeated.
  List(Vec<&'a Record>),
}

impl<'a> Field<'a> {
  /// Every record behind this field, in file order.
  pub fn records(self) -> Vec<&'a Record> {
    match self {
      Field::Absent => Vec::new(),
      Field::Scalar(r) | Field::Record(r) => vec![r],
      Field::List(records) => records,
    }
  }

  pub fn is_absent(&self) -> bool { matches!(self, Field::Absent) }
}

/// Whether `value` is a cross-reference such as `@I1@`.
pub fn is_pointer(value: &str) -> bool {
  value.len() > 2 && value.starts_with('@') && value.ends_with('@')
}

impl Record {
  pub fn field(&self, tag: &str) -> Field<'_> {
    let mut matches: Vec<&Record> =
      self.children.iter().filter(|c| c.tag == tag).collect();
    match matches.len() {
      0 => Field::Absent,
      1 => {
        let r = matches.remove(0);
        if r.children.is_empty() {
          Field::Scalar(r)
        } else {
          Field::Record(r)
        }
      }
      _ => Field::List(matches),
    }
  }

  /// Children with tag `tag`.
  pub fn all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Record> {
    self.children.iter().filter(move |c| c.tag == tag)
  }

  pub fn first(&self, tag: &str) -> Option<&Record> {
    self.children.iter().find(|c| c.tag == tag)
  }

  /// Value of the first `tag` child, when it is not empty.
  pub fn text(&self, tag: &str) -> Option<&str> {
    self
      .first(tag)
      .map(|r| r.value.as_str())
      .filter(|v| !v.is_empty())
  }

  /// The pointer this record's value holds, if it is one.
  pub fn pointer(&self) -> Option<&str> {
    is_pointer(&self.value).then_some(self.value.as_str())
  }

  pub fn has_children(&self) -> bool { !self.children.is_empty() }

  /// Children grouped by tag, in order of first appearance. Used to check
  /// that every tag of a record was handled.
  pub fn for_all_fields(&self) -> Vec<(&str, Vec<&Record>)> {
    group_by_tag(&self.children)
  }

  /// Every descendant with its depth below `self` (children are depth 1).
  pub fn descendants(&self) -> Vec<(usize, &Record)> {
    let mut out = Vec::new();
    let mut stack: Vec<(usize, &Record)> =
      self.children.iter().rev().map(|c| (1, c)).collect();
    while let Some((depth, r)) = stack.pop() {
      out.push((depth, r));
      stack.extend(r.children.iter().rev().map(|c| (depth + 1, c)));
    }
    out
  }
}

fn group_by_tag(records: &[Record]) -> Vec<(&str, Vec<&Record>)> {
  let mut groups: Vec<(&str, Vec<&Record>)> = Vec::new();
  for r in records {
    match groups.iter_mut().find(|(tag, _)| *tag == r.tag) {
      Some((_, list)) => list.push(r),
      None => groups.push((r.tag.as_str(), vec![r])),
    }
  }
  groups
}

// ─── Whole file ──────────────────────────────────────────────────────────────

/// A parsed file: its top-level records and an index of the identifiers they
/// define.
#[derive(Debug, Clone)]
pub struct GedcomFile {
  pub name:    String,
  pub records: Vec<Record>,
  index:       HashMap<String, usize>,
}

impl GedcomFile {
  pub(crate) fn new(
    name: String,
    records: Vec<Record>,
    index: HashMap<String, usize>,
  ) -> Self {
    Self {
      name,
      records,
      index,
    }
  }

  pub fn head(&self) -> Option<&Record> { self.first("HEAD") }

  pub fn first(&self, tag: &str) -> Option<&Record> {
    self.records.iter().find(|r| r.tag == tag)
  }

  /// Top-level records with tag `tag`.
  pub fn all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Record> {
    self.records.iter().filter(move |r| r.tag == tag)
  }

  /// The top-level record defining `xref`.
  pub fn resolve(&self, xref: &str) -> Option<&Record> {
    self.index.get(xref).and_then(|&i| self.records.get(i))
  }

  pub fn for_all_fields(&self) -> Vec<(&str, Vec<&Record>)> {
    group_by_tag(&self.records)
  }

  /// Every record below the top level, with its depth (children of a
  /// top-level record are depth 1).
  pub fn descendants(&self) -> impl Iterator<Item = (usize, &Record)> {
    self.records.iter().flat_map(Record::descendants)
  }
}
