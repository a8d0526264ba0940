//! Knobs of one import run.

use lineage_core::vocab::DEFAULT_SURETY_LEVELS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
  /// Give each individual one persona per source citing it, linked to the
  /// individual's main persona by a "same as" relation.
  pub multiple_personas:         bool,
  /// Split a GIVN on spaces and commas: the first word stays the given
  /// name, the others become middle names.
  pub given_name_to_middle_name: bool,
  /// Confidence levels, lowest first. Every assertion of the run gets the
  /// middle one.
  pub surety_scheme:             Vec<String>,
}

impl Default for ImportOptions {
  fn default() -> Self {
    Self {
      multiple_personas:         true,
      given_name_to_middle_name: true,
      surety_scheme:             DEFAULT_SURETY_LEVELS
        .iter()
        .map(|s| s.to_string())
        .collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_keys_take_defaults() {
    let opts: ImportOptions =
      serde_json::from_str(r#"{ "multiple_personas": false }"#).unwrap();
    assert!(!opts.multiple_personas);
    assert!(opts.given_name_to_middle_name);
    assert_eq!(opts.surety_scheme.len(), 5);
  }
}
