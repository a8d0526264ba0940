//! Diagnostics about data the importer could not use.
//!
//! An unhandled tag, a dangling cross-reference or an unknown medium is
//! reported here and the import goes on.

use std::fmt;

use lineage_gedcom::Location;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  /// Where the offending record starts, when it came from the file.
  pub location: Option<Location>,
  pub message:  String,
}

impl fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.location {
      Some(location) => write!(f, "{location} {}", self.message),
      None => f.write_str(&self.message),
    }
  }
}

pub trait Reporter {
  fn report(&mut self, diagnostic: Diagnostic);
}

/// Keeps every diagnostic, for tests and for callers that print a summary.
#[derive(Debug, Default)]
pub struct CollectingReporter {
  pub diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
  pub fn new() -> Self { Self::default() }

  pub fn messages(&self) -> Vec<String> {
    self.diagnostics.iter().map(|d| d.message.clone()).collect()
  }

  /// Whether some diagnostic's message contains `needle`.
  pub fn mentions(&self, needle: &str) -> bool {
    self.diagnostics.iter().any(|d| d.message.contains(needle))
  }
}

impl Reporter for CollectingReporter {
  fn report(&mut self, diagnostic: Diagnostic) {
    self.diagnostics.push(diagnostic);
  }
}

/// Emits each diagnostic as a `warn!` event.
#[derive(Debug, Default)]
pub struct TracingReporter {
  pub count: usize,
}

impl Reporter for TracingReporter {
  fn report(&mut self, diagnostic: Diagnostic) {
    self.count += 1;
    match &diagnostic.location {
      Some(location) => warn!(%location, "{}", diagnostic.message),
      None => warn!("{}", diagnostic.message),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;

  #[test]
  fn location_prefixes_the_message() {
    let d = Diagnostic {
      location: Some(Location {
        file: Arc::from("family.ged"),
        line: 12,
      }),
      message:  "Unhandled INDI._FOO".into(),
    };
    assert_eq!(d.to_string(), "family.ged:12 Unhandled INDI._FOO");
  }

  #[test]
  fn collecting_reporter_keeps_order() {
    let mut r = CollectingReporter::new();
    for m in ["a", "b"] {
      r.report(Diagnostic {
        location: None,
        message:  m.into(),
      });
    }
    assert_eq!(r.messages(), vec!["a", "b"]);
    assert!(r.mentions("b"));
  }
}
