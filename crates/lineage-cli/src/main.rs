//! `lineage`: import GEDCOM files into a genealogical graph.
//!
//! # Usage
//!
//! ```text
//! lineage import family.ged --database family.db
//! lineage import family.ged --single-persona --json
//! lineage runs --database family.db
//! lineage timeline <RUN_ID> --database family.db
//! lineage date "bet 1800 and 1850" --calendar julian
//! ```

mod config;

use std::path::PathBuf;

use anyhow::{Context as _, bail};
use clap::{Parser, Subcommand};
use lineage_core::{GraphStats, MemoryGraph};
use lineage_date::{CalendarKind, DateRange};
use lineage_import::{ImportSummary, TracingReporter};
use lineage_store_sqlite::SqliteStore;
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::config::LineageConfig;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "lineage", version, about = "GEDCOM import into a genealogical graph")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, global = true, default_value = "lineage.toml")]
  config: PathBuf,

  /// SQLite file to persist runs to, overriding the configuration.
  #[arg(long, global = true, value_name = "PATH")]
  database: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Import a GEDCOM file, print a summary and persist it when a database
  /// is configured.
  Import {
    file: PathBuf,

    /// Keep a single persona per individual instead of one per source.
    #[arg(long)]
    single_persona: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
  },

  /// List the runs persisted in the database.
  Runs {
    #[arg(long)]
    json: bool,
  },

  /// Print the events of a persisted run in date order.
  Timeline {
    run_id: Uuid,

    #[arg(long)]
    json: bool,
  },

  /// Parse a date or date range and print how it is displayed and sorted.
  Date {
    text: String,

    /// Calendar to display the date in (gregorian, julian, french).
    #[arg(long)]
    calendar: Option<CalendarKind>,

    #[arg(long)]
    json: bool,
  },
}

// ─── Output ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ImportReport {
  summary: ImportSummary,
  stats:   GraphStats,
  run_id:  Option<Uuid>,
}

#[derive(Serialize)]
struct DateReport {
  text:     String,
  display:  String,
  sort_key: Option<i64>,
  parsed:   DateRange,
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let mut cfg = LineageConfig::load(&cli.config)
    .with_context(|| format!("failed to load {}", cli.config.display()))?;
  if cli.database.is_some() {
    cfg.database = cli.database;
  }

  match cli.command {
    Command::Import {
      file,
      single_persona,
      json,
    } => {
      if single_persona {
        cfg.import.multiple_personas = false;
      }
      import(&file, &cfg, json).await
    }
    Command::Runs { json } => runs(&cfg, json).await,
    Command::Timeline { run_id, json } => timeline(&cfg, run_id, json).await,
    Command::Date {
      text,
      calendar,
      json,
    } => date(&text, calendar, json),
  }
}

async fn open_store(cfg: &LineageConfig) -> anyhow::Result<SqliteStore> {
  let Some(path) = &cfg.database else {
    bail!("no database configured; pass --database or set LINEAGE_DATABASE");
  };
  SqliteStore::open(path)
    .await
    .with_context(|| format!("failed to open store at {}", path.display()))
}

// ─── Commands ────────────────────────────────────────────────────────────────

async fn import(
  path: &std::path::Path,
  cfg: &LineageConfig,
  json: bool,
) -> anyhow::Result<()> {
  let file = lineage_gedcom::parse_file(path)
    .with_context(|| format!("failed to read {}", path.display()))?;

  let mut graph = MemoryGraph::new();
  let mut reporter = TracingReporter::default();
  let summary = lineage_import::import(&file, &mut graph, &cfg.import, &mut reporter)
    .with_context(|| format!("failed to import {}", path.display()))?;
  let stats = graph.stats();

  let run_id = match cfg.database {
    Some(_) => {
      let store = open_store(cfg).await?;
      Some(store.persist(graph).await.context("failed to persist the run")?)
    }
    None => None,
  };

  if json {
    return print_json(&ImportReport {
      summary,
      stats,
      run_id,
    });
  }
  println!("{}", summary.file);
  println!("  individuals      {}", summary.individuals);
  println!("  families         {}", summary.families);
  println!("  sources          {}", summary.sources);
  println!("  repositories     {}", summary.repositories);
  println!("  personas         {}", stats.personas);
  println!("  events           {}", stats.events);
  println!("  characteristics  {}", stats.characteristics);
  println!("  places           {}", stats.places);
  println!(
    "  assertions       {} ({})",
    stats.p2e + stats.p2c + stats.p2p,
    summary.surety
  );
  println!("  diagnostics      {}", summary.diagnostics);
  if let Some(run_id) = run_id {
    println!("  run              {run_id}");
  }
  Ok(())
}

async fn runs(cfg: &LineageConfig, json: bool) -> anyhow::Result<()> {
  let store = open_store(cfg).await?;
  let runs = store.list_runs().await.context("failed to list runs")?;
  if json {
    return print_json(&runs);
  }
  for run in runs {
    println!(
      "{}  {}  {}",
      run.run_id,
      run.imported_at.format("%Y-%m-%d %H:%M:%S"),
      run.description
    );
  }
  Ok(())
}

async fn timeline(cfg: &LineageConfig, run_id: Uuid, json: bool) -> anyhow::Result<()> {
  let store = open_store(cfg).await?;
  if store.run_stats(run_id).await?.is_none() {
    bail!("no run {run_id}");
  }
  let entries = store.timeline(run_id).await.context("failed to read the timeline")?;
  if json {
    return print_json(&entries);
  }
  for entry in entries {
    let date = entry.display.as_deref().unwrap_or("?");
    match &entry.place {
      Some(place) => println!("{date:<24} {} ({place})", entry.name),
      None => println!("{date:<24} {}", entry.name),
    }
  }
  Ok(())
}

fn date(text: &str, calendar: Option<CalendarKind>, json: bool) -> anyhow::Result<()> {
  let parsed = DateRange::parse(text);
  let report = DateReport {
    text:     text.to_string(),
    display:  parsed.display(calendar),
    sort_key: parsed.sort_key(),
    parsed,
  };
  if json {
    return print_json(&report);
  }
  println!("{}", report.display);
  match report.sort_key {
    Some(key) => println!("sort key {key}"),
    None => println!("not a recognised date"),
  }
  Ok(())
}
