//! Dashboard configuration.
//!
//! Read from an optional TOML file; every key falls back to a default, and
//! the `--data-dir` flag overrides whatever the file says.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::data::schema::SchemaMapping;
use crate::data::source::DatasetSource;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the capture files.
    pub data_dir: PathBuf,
    /// Capture file names, in the order they are concatenated.
    pub files: Vec<String>,
    /// Screenshots referenced by the presentation page, if available.
    pub assets_dir: Option<PathBuf>,
    pub schema: SchemaMapping,
}

impl Default for Config {
    fn default() -> Self {
        let DatasetSource { dir, files } = DatasetSource::with_default_files(".");
        Self {
            data_dir: dir,
            files,
            assets_dir: None,
            schema: SchemaMapping::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, path)?;
        log::debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    pub fn source(&self) -> DatasetSource {
        DatasetSource::new(self.data_dir.clone(), self.files.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::from_toml_str("", Path::new("dashboard.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.files[0], "1aba_semPesquisa.csv");
        assert_eq!(config.source(), DatasetSource::with_default_files("."));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let text = r#"
data_dir = "captures"
files = ["a.csv", "b.csv"]

[schema]
cpu_column = "CPU (%)"
delimiter = ","
"#;
        let config = Config::from_toml_str(text, Path::new("dashboard.toml")).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("captures"));
        assert_eq!(config.schema.cpu_column, "CPU (%)");
        assert_eq!(config.schema.ram_column, "RAM");
        assert_eq!(config.schema.delimiter, ',');
        assert_eq!(config.source().paths().count(), 2);
    }

    #[test]
    fn test_bad_toml_is_reported() {
        let err = Config::from_toml_str("files = 3", Path::new("dashboard.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
