//! Configuration of the `lineage` binary.
//!
//! Read from an optional TOML file, then `LINEAGE_*` environment variables.
//! Nested keys use a double underscore: `LINEAGE_IMPORT__MULTIPLE_PERSONAS`.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{ConfigBuilder, builder::DefaultState};
use lineage_import::ImportOptions;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
  /// SQLite file runs are persisted to. Without one an import is only
  /// summarised.
  pub database: Option<PathBuf>,
  pub import:   ImportOptions,
}

impl LineageConfig {
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    Self::build(
      config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
          config::Environment::with_prefix("LINEAGE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
        ),
    )
  }

  fn build(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
    builder
      .build()
      .context("failed to read configuration")?
      .try_deserialize()
      .context("failed to deserialise configuration")
  }
}

#[cfg(test)]
mod tests {
  use config::{File, FileFormat};

  use super::*;

  fn from_toml(toml: &str) -> LineageConfig {
    LineageConfig::build(
      config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
    )
    .unwrap()
  }

  #[test]
  fn empty_file_gives_defaults() {
    assert_eq!(from_toml(""), LineageConfig::default());
  }

  #[test]
  fn import_section() {
    let cfg = from_toml(
      r#"
database = "family.db"

[import]
multiple_personas = false
surety_scheme = ["unlikely", "likely", "certain"]
"#,
    );
    assert_eq!(cfg.database, Some(PathBuf::from("family.db")));
    assert!(!cfg.import.multiple_personas);
    assert!(cfg.import.given_name_to_middle_name);
    assert_eq!(cfg.import.surety_scheme.len(), 3);
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let cfg = LineageConfig::load(Path::new("/nonexistent/lineage.toml")).unwrap();
    assert_eq!(cfg.import, ImportOptions::default());
  }
}
