//! GEDCOM import.
//!
//! Turns a parsed [`GedcomFile`] into personas, events, characteristics,
//! sources, places and repositories, every fact backed by an assertion
//! naming its source. Everything goes through a [`GraphSink`]; use a
//! [`MemoryGraph`] to collect a whole run and persist it in one go.
//!
//! Problems with the data itself are reported to a [`Reporter`] and do not
//! stop the import. Only a file that cannot be tokenized, or a sink that
//! fails, aborts it.

pub mod error;
mod importer;
pub mod options;
pub mod persona;
pub mod report;
mod types;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
use lineage_core::{
  GraphSink, MemoryGraph,
  ids::{ResearcherId, SourceId},
};
use lineage_gedcom::GedcomFile;
pub use options::ImportOptions;
pub use persona::{PersonaResolver, SourceKey};
pub use report::{CollectingReporter, Diagnostic, Reporter, TracingReporter};
use serde::Serialize;

use crate::importer::Importer;

/// What one run did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
  pub file:         String,
  pub researcher:   ResearcherId,
  /// The source standing for the file itself.
  pub file_source:  SourceId,
  pub individuals:  usize,
  pub families:     usize,
  pub sources:      usize,
  pub repositories: usize,
  /// Label of the surety level every assertion of the run carries.
  pub surety:       String,
  /// Parts and assertions written in the final batch.
  pub leaves:       usize,
  pub diagnostics:  usize,
}

/// Import `file` into `sink`.
pub fn import<S: GraphSink>(
  file: &GedcomFile,
  sink: &mut S,
  options: &ImportOptions,
  reporter: &mut dyn Reporter,
) -> Result<ImportSummary> {
  Importer::new(file, sink, options, reporter)?.run()
}

/// Tokenize `input` and import it into a new [`MemoryGraph`]. An invalid
/// file yields no graph at all.
pub fn import_str(
  input: &str,
  file_name: &str,
  options: &ImportOptions,
  reporter: &mut dyn Reporter,
) -> Result<(MemoryGraph, ImportSummary)> {
  let file = lineage_gedcom::parse_str(input, file_name)?;
  let mut graph = MemoryGraph::new();
  let summary = import(&file, &mut graph, options, reporter)?;
  Ok((graph, summary))
}
