//! Encoding and decoding helpers between the graph model and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, UUIDs as hyphenated lowercase
//! strings and arena ids as integers. A date is stored three ways (see
//! [`EncodedDate`]); only its JSON form is ever decoded.

use chrono::{DateTime, Utc};
use lineage_core::MemoryGraph;
use lineage_date::DateRange;
use uuid::Uuid;

use crate::{Error, Result, store::{RunInfo, TimelineEntry}};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Arena ids ───────────────────────────────────────────────────────────────

pub fn encode_id(id: u32) -> i64 { i64::from(id) }

pub fn encode_opt_id(id: Option<u32>) -> Option<i64> { id.map(encode_id) }

// ─── DateRange ───────────────────────────────────────────────────────────────

/// Column values of an optional date: display text, JSON and sort key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncodedDate {
  pub text: Option<String>,
  pub json: Option<String>,
  pub sort: Option<i64>,
}

pub fn encode_date(date: Option<&DateRange>) -> Result<EncodedDate> {
  let Some(date) = date else {
    return Ok(EncodedDate::default());
  };
  Ok(EncodedDate {
    text: Some(date.display(None)),
    json: Some(serde_json::to_string(date)?),
    sort: date.sort_key(),
  })
}

pub fn decode_date(json: Option<&str>) -> Result<Option<DateRange>> {
  json
    .map(serde_json::from_str)
    .transpose()
    .map_err(Error::from)
}

// ─── Whole graph ─────────────────────────────────────────────────────────────

/// A graph with every fallible encoding already done, so that writing it
/// can only fail in the database.
pub struct PreparedGraph {
  pub graph:                MemoryGraph,
  pub schemes:              Vec<String>,
  pub event_dates:          Vec<EncodedDate>,
  pub characteristic_dates: Vec<EncodedDate>,
  pub source_dates:         Vec<EncodedDate>,
}

impl PreparedGraph {
  pub fn new(graph: MemoryGraph) -> Result<Self> {
    let schemes = graph
      .projects
      .iter()
      .map(|p| serde_json::to_string(&p.scheme))
      .collect::<serde_json::Result<_>>()?;
    let event_dates = graph
      .events
      .iter()
      .map(|e| encode_date(e.date.as_ref()))
      .collect::<Result<_>>()?;
    let characteristic_dates = graph
      .characteristics
      .iter()
      .map(|c| encode_date(c.date.as_ref()))
      .collect::<Result<_>>()?;
    let source_dates = graph
      .sources
      .iter()
      .map(|s| encode_date(s.subject_date.as_ref()))
      .collect::<Result<_>>()?;
    Ok(Self {
      graph,
      schemes,
      event_dates,
      characteristic_dates,
      source_dates,
    })
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `runs` row.
pub struct RawRun {
  pub run_id:      String,
  pub imported_at: String,
  pub project:     String,
  pub description: String,
}

impl RawRun {
  pub fn into_run(self) -> Result<RunInfo> {
    Ok(RunInfo {
      run_id:      decode_uuid(&self.run_id)?,
      imported_at: decode_dt(&self.imported_at)?,
      project:     self.project,
      description: self.description,
    })
  }
}

/// An `events` row joined with its place name.
pub struct RawTimelineEntry {
  pub name:      String,
  pub place:     Option<String>,
  pub date_text: Option<String>,
  pub date_json: Option<String>,
}

impl RawTimelineEntry {
  pub fn into_entry(self) -> Result<TimelineEntry> {
    Ok(TimelineEntry {
      name:    self.name,
      place:   self.place,
      date:    decode_date(self.date_json.as_deref())?,
      display: self.date_text,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dates_keep_text_json_and_order() {
    let range = DateRange::parse("abt 1805");
    let encoded = encode_date(Some(&range)).unwrap();
    assert_eq!(encoded.text.as_deref(), Some("ca 1805"));
    assert_eq!(encoded.sort, range.sort_key());
    assert_eq!(decode_date(encoded.json.as_deref()).unwrap(), Some(range));

    assert_eq!(encode_date(None).unwrap(), EncodedDate::default());
    assert_eq!(decode_date(None).unwrap(), None);
  }

  #[test]
  fn timestamps_round_trip() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
    assert!(matches!(decode_dt("yesterday"), Err(Error::DateParse(_))));
  }
}
