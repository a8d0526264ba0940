//! [`SqliteStore`]: writes finished import runs to SQLite and reads them
//! back.

use std::path::Path;

use chrono::{DateTime, Utc};
use lineage_core::{GraphStats, MemoryGraph};
use lineage_date::DateRange;
use rusqlite::{OptionalExtension as _, params};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{
  Result,
  encode::{
    PreparedGraph, RawRun, RawTimelineEntry, encode_dt, encode_id,
    encode_opt_id, encode_uuid,
  },
  schema::SCHEMA,
};

/// Tables counted by [`SqliteStore::run_stats`], in [`GraphStats`] order.
const COUNTED_TABLES: [&str; 13] = [
  "personas",
  "events",
  "characteristics",
  "sources",
  "places",
  "repositories",
  "representations",
  "citation_parts",
  "place_parts",
  "characteristic_parts",
  "p2e",
  "p2c",
  "p2p",
];

/// One persisted import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunInfo {
  pub run_id:      Uuid,
  pub imported_at: DateTime<Utc>,
  pub project:     String,
  pub description: String,
}

/// An event of a run, as placed on its timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
  pub name:    String,
  pub place:   Option<String>,
  pub date:    Option<DateRange>,
  /// The date as it was displayed when the run was written.
  pub display: Option<String>,
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// Import runs stored in a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Writes ────────────────────────────────────────────────────────────

  /// Write every row of `graph` under a new run id, in one transaction.
  /// Nothing of the run is kept if any row fails.
  pub async fn persist(&self, graph: MemoryGraph) -> Result<Uuid> {
    let run_id = Uuid::new_v4();
    let stats = graph.stats();
    let (project, description) = graph
      .projects
      .first()
      .map(|p| (p.name.clone(), p.description.clone()))
      .unwrap_or_default();
    let prepared = PreparedGraph::new(graph)?;

    let run_str = encode_uuid(run_id);
    let at_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO runs (run_id, imported_at, project, description)
           VALUES (?1, ?2, ?3, ?4)",
          params![run_str, at_str, project, description],
        )?;
        insert_graph(&tx, &run_str, &prepared)?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    info!(
      run = %run_id,
      personas = stats.personas,
      events = stats.events,
      "persisted run"
    );
    Ok(run_id)
  }

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Every run, oldest first.
  pub async fn list_runs(&self) -> Result<Vec<RunInfo>> {
    let raws: Vec<RawRun> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT run_id, imported_at, project, description
           FROM runs ORDER BY imported_at, rowid",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawRun {
              run_id:      row.get(0)?,
              imported_at: row.get(1)?,
              project:     row.get(2)?,
              description: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRun::into_run).collect()
  }

  /// Row counts of one run, or `None` when there is no such run.
  pub async fn run_stats(&self, run_id: Uuid) -> Result<Option<GraphStats>> {
    let id_str = encode_uuid(run_id);

    let counts: Option<Vec<i64>> = self
      .conn
      .call(move |conn| {
        let exists = conn
          .query_row(
            "SELECT 1 FROM runs WHERE run_id = ?1",
            params![id_str],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if !exists {
          return Ok(None);
        }

        let mut counts = Vec::with_capacity(COUNTED_TABLES.len());
        for table in COUNTED_TABLES {
          let n: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {table} WHERE run_id = ?1"),
            params![id_str],
            |r| r.get(0),
          )?;
          counts.push(n);
        }
        Ok(Some(counts))
      })
      .await?;

    Ok(counts.map(|c| {
      let n = |i: usize| c.get(i).map_or(0, |&v| v as usize);
      GraphStats {
        personas:             n(0),
        events:               n(1),
        characteristics:      n(2),
        sources:              n(3),
        places:               n(4),
        repositories:         n(5),
        representations:      n(6),
        citation_parts:       n(7),
        place_parts:          n(8),
        characteristic_parts: n(9),
        p2e:                  n(10),
        p2c:                  n(11),
        p2p:                  n(12),
      }
    }))
  }

  /// Events of a run in date order. Undated events come last, in the order
  /// they were imported.
  pub async fn timeline(&self, run_id: Uuid) -> Result<Vec<TimelineEntry>> {
    let id_str = encode_uuid(run_id);

    let raws: Vec<RawTimelineEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT e.name, p.name, e.date_text, e.date_json
           FROM events e
           LEFT JOIN places p ON p.run_id = e.run_id AND p.id = e.place
           WHERE e.run_id = ?1
           ORDER BY e.date_sort IS NULL, e.date_sort, e.id",
        )?;
        let rows = stmt
          .query_map(params![id_str], |row| {
            Ok(RawTimelineEntry {
              name:      row.get(0)?,
              place:     row.get(1)?,
              date_text: row.get(2)?,
              date_json: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTimelineEntry::into_entry).collect()
  }
}

// ─── Graph insertion ─────────────────────────────────────────────────────────

/// Insert every row of a run. Referenced rows go in before the rows that
/// refer to them, in arena order, so foreign keys hold at every statement.
fn insert_graph(
  tx: &rusqlite::Transaction<'_>,
  run: &str,
  prepared: &PreparedGraph,
) -> rusqlite::Result<()> {
  let g = &prepared.graph;

  // ── Provenance ──
  let mut stmt = tx.prepare(
    "INSERT INTO researchers (run_id, id, name, comment) VALUES (?1, ?2, ?3, ?4)",
  )?;
  for (id, r) in (0_i64..).zip(&g.researchers) {
    stmt.execute(params![run, id, r.name, r.comment])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO projects (
       run_id, id, name, description, researcher, researcher_role, scheme_json
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
  )?;
  for ((id, p), scheme) in (0_i64..).zip(&g.projects).zip(&prepared.schemes) {
    stmt.execute(params![
      run,
      id,
      p.name,
      p.description,
      encode_id(p.researcher.0),
      p.researcher_role,
      scheme,
    ])?;
  }

  // ── Vocabularies ──
  let mut stmt = tx.prepare(
    "INSERT INTO event_types (run_id, id, name, gedcom) VALUES (?1, ?2, ?3, ?4)",
  )?;
  for (id, t) in (0_i64..).zip(&g.event_types) {
    stmt.execute(params![run, id, t.name, t.gedcom])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO characteristic_part_types (run_id, id, name, gedcom, is_name_part)
     VALUES (?1, ?2, ?3, ?4, ?5)",
  )?;
  for (id, t) in (0_i64..).zip(&g.characteristic_part_types) {
    stmt.execute(params![run, id, t.name, t.gedcom, t.is_name_part])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO citation_part_types (run_id, id, name, gedcom) VALUES (?1, ?2, ?3, ?4)",
  )?;
  for (id, t) in (0_i64..).zip(&g.citation_part_types) {
    stmt.execute(params![run, id, t.name, t.gedcom])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO place_part_types (run_id, id, name, gedcom) VALUES (?1, ?2, ?3, ?4)",
  )?;
  for (id, t) in (0_i64..).zip(&g.place_part_types) {
    stmt.execute(params![run, id, t.name, t.gedcom])?;
  }
  let mut stmt =
    tx.prepare("INSERT INTO p2p_types (run_id, id, name) VALUES (?1, ?2, ?3)")?;
  for (id, t) in (0_i64..).zip(&g.p2p_types) {
    stmt.execute(params![run, id, t.name])?;
  }

  // ── Entities ──
  let mut stmt = tx.prepare(
    "INSERT INTO places (run_id, id, name, parent_place) VALUES (?1, ?2, ?3, ?4)",
  )?;
  for (id, p) in (0_i64..).zip(&g.places) {
    let parent = encode_opt_id(p.parent_place.map(|p| p.0));
    stmt.execute(params![run, id, p.name, parent])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO personas (run_id, id, name, description, last_change)
     VALUES (?1, ?2, ?3, ?4, ?5)",
  )?;
  for (id, p) in (0_i64..).zip(&g.personas) {
    stmt.execute(params![
      run,
      id,
      p.name,
      p.description,
      encode_dt(p.last_change)
    ])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO events (
       run_id, id, event_type, name, place, date_text, date_json, date_sort
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
  )?;
  for ((id, e), date) in (0_i64..).zip(&g.events).zip(&prepared.event_dates) {
    stmt.execute(params![
      run,
      id,
      encode_id(e.event_type.0),
      e.name,
      encode_opt_id(e.place.map(|p| p.0)),
      date.text,
      date.json,
      date.sort,
    ])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO characteristics (
       run_id, id, name, place, date_text, date_json, date_sort
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
  )?;
  for ((id, c), date) in (0_i64..)
    .zip(&g.characteristics)
    .zip(&prepared.characteristic_dates)
  {
    stmt.execute(params![
      run,
      id,
      c.name,
      encode_opt_id(c.place.map(|p| p.0)),
      date.text,
      date.json,
      date.sort,
    ])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO sources (
       run_id, id, higher_source, subject_place, date_text, date_json, date_sort,
       researcher, title, abbrev, biblio, comments, last_change
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
  )?;
  for ((id, s), date) in (0_i64..).zip(&g.sources).zip(&prepared.source_dates) {
    stmt.execute(params![
      run,
      id,
      encode_opt_id(s.higher_source.map(|h| h.0)),
      encode_opt_id(s.subject_place.map(|p| p.0)),
      date.text,
      date.json,
      date.sort,
      encode_id(s.researcher.0),
      s.title,
      s.abbrev,
      s.biblio,
      s.comments,
      encode_dt(s.last_change),
    ])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO repositories (run_id, id, name, place, addr, info)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
  )?;
  for (id, r) in (0_i64..).zip(&g.repositories) {
    stmt.execute(params![
      run,
      id,
      r.name,
      encode_opt_id(r.place.map(|p| p.0)),
      r.addr,
      r.info,
    ])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO repository_sources (
       run_id, repository, source, call_number, description, medium
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
  )?;
  for link in &g.repository_sources {
    stmt.execute(params![
      run,
      encode_opt_id(link.repository.map(|r| r.0)),
      encode_id(link.source.0),
      link.call_number,
      link.description,
      link.medium.to_string(),
    ])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO representations (run_id, id, source, mime_type, file, comments)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
  )?;
  for (id, r) in (0_i64..).zip(&g.representations) {
    stmt.execute(params![
      run,
      id,
      encode_id(r.source.0),
      r.mime_type,
      r.file,
      r.comments,
    ])?;
  }

  // ── Leaves ──
  let mut stmt = tx.prepare(
    "INSERT INTO place_parts (run_id, place, part_type, value) VALUES (?1, ?2, ?3, ?4)",
  )?;
  for p in &g.place_parts {
    stmt.execute(params![
      run,
      encode_id(p.place.0),
      encode_id(p.part_type.0),
      p.value
    ])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO citation_parts (run_id, source, part_type, value)
     VALUES (?1, ?2, ?3, ?4)",
  )?;
  for p in &g.citation_parts {
    stmt.execute(params![
      run,
      encode_id(p.source.0),
      encode_id(p.part_type.0),
      p.value
    ])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO characteristic_parts (run_id, characteristic, part_type, value)
     VALUES (?1, ?2, ?3, ?4)",
  )?;
  for p in &g.characteristic_parts {
    stmt.execute(params![
      run,
      encode_id(p.characteristic.0),
      encode_id(p.part_type.0),
      p.value
    ])?;
  }

  let mut stmt = tx.prepare(
    "INSERT INTO p2e (
       run_id, researcher, surety, source, rationale, last_change,
       persona, event, role
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
  )?;
  for a in &g.p2e {
    stmt.execute(params![
      run,
      encode_id(a.claim.researcher.0),
      a.claim.surety.0,
      encode_id(a.claim.source.0),
      a.claim.rationale,
      encode_dt(a.claim.last_change),
      encode_id(a.persona.0),
      encode_id(a.event.0),
      a.role.to_string(),
    ])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO p2c (
       run_id, researcher, surety, source, rationale, last_change,
       persona, characteristic
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
  )?;
  for a in &g.p2c {
    stmt.execute(params![
      run,
      encode_id(a.claim.researcher.0),
      a.claim.surety.0,
      encode_id(a.claim.source.0),
      a.claim.rationale,
      encode_dt(a.claim.last_change),
      encode_id(a.persona.0),
      encode_id(a.characteristic.0),
    ])?;
  }
  let mut stmt = tx.prepare(
    "INSERT INTO p2p (
       run_id, researcher, surety, source, rationale, last_change,
       person1, person2, p2p_type
     ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
  )?;
  for a in &g.p2p {
    stmt.execute(params![
      run,
      encode_id(a.claim.researcher.0),
      a.claim.surety.0,
      encode_id(a.claim.source.0),
      a.claim.rationale,
      encode_dt(a.claim.last_change),
      encode_id(a.person1.0),
      encode_id(a.person2.0),
      encode_id(a.p2p_type.0),
    ])?;
  }
  Ok(())
}
