//! Application configuration loaded from TOML.
//!
//! Resolution order: an explicit config file, else `hamlog.toml` in the
//! working directory, else built-in defaults. The database path can then be
//! overridden by the command line or `HAMLOG_DB`.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use crate::adif::ExportOptions;

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hamlog.toml";
/// Environment variable overriding the database path.
pub const DB_ENV_VAR: &str = "HAMLOG_DB";

/// Configuration loading failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        /// Config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML for [`AppConfig`].
    #[error("invalid config {}: {source}", .path.display())]
    Toml {
        /// Config file.
        path: PathBuf,
        /// Parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite logbook file.
    pub database_path: PathBuf,
    /// Default `tracing` filter directive.
    pub log_level: String,
    /// Directory export files are written to.
    pub export_dir: PathBuf,
    /// ADIF writer settings.
    pub export: ExportSection,
}

/// `[export]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// Write the measured `FREQ` length instead of the legacy `8`.
    pub measure_freq_length: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("hamradio_logbook.db"),
            log_level: "info".to_string(),
            export_dir: PathBuf::from("."),
            export: ExportSection::default(),
        }
    }
}

impl AppConfig {
    /// Parses a config document.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads and parses the file at `path`.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Loads `explicit` when given (it must exist), else [`DEFAULT_CONFIG_FILE`]
    /// when present, else defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::load_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Replaces the database path when `db` is given. The binary passes
    /// `--db`, which clap also fills from `HAMLOG_DB`.
    pub fn with_database_override(mut self, db: Option<PathBuf>) -> Self {
        if let Some(path) = db {
            self.database_path = path;
        }
        self
    }

    /// Writer settings for [`crate::adif::write_adif`].
    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            measure_freq_length: self.export.measure_freq_length,
        }
    }
}
