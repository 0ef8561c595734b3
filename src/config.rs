//! Configuration management and validation.
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! environment variables. CLI flags are applied on top by the command layer,
//! and [`Config::validate`] runs last.

use crate::constants::{self, env};
use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// What to do with a data line that does not have exactly eleven fields
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Log the line, count it, and continue with the next one
    #[default]
    Skip,
    /// Stop the run before anything is written
    Abort,
}

impl FromStr for MalformedLinePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "abort" => Ok(Self::Abort),
            other => Err(Error::configuration(format!(
                "Invalid malformed line policy '{}' (expected 'skip' or 'abort')",
                other
            ))),
        }
    }
}

impl fmt::Display for MalformedLinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

/// How a date column value that is not a valid DDMMYYYY date is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidDatePolicy {
    /// Fail the write with a type coercion error
    Reject,
    /// Store NULL and log a warning
    #[default]
    Null,
}

/// Pipeline settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Policy for data lines with the wrong field count
    pub malformed_lines: MalformedLinePolicy,

    /// Fixed reference date for derivations; today's local date when unset
    pub reference_date: Option<NaiveDate>,
}

/// Destination database settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database file, optionally prefixed with `sqlite://`
    pub url: String,

    /// How long a connection waits on a locked database
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: constants::DEFAULT_DATABASE_URL.to_string(),
            busy_timeout_ms: constants::DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl DatabaseConfig {
    /// File system path of the database, with any URL scheme removed
    pub fn database_path(&self) -> PathBuf {
        let path = self
            .url
            .strip_prefix(constants::SQLITE_URL_SCHEME)
            .unwrap_or(&self.url);
        PathBuf::from(path)
    }
}

/// Row coercion settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Handling of unparseable values in DATE columns
    pub invalid_dates: InvalidDatePolicy,
}

/// Complete loader configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub processing: ProcessingConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Default config file location, e.g. ~/.config/customer-loader/config.toml
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::configuration("Could not determine user config directory"))?;
        Ok(config_dir
            .join(constants::APP_NAME)
            .join(constants::CONFIG_FILE_NAME))
    }

    /// Load configuration from a TOML file; missing sections take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("Failed to read config file {}", path.display()), e)
        })?;

        toml::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load defaults, then the config file if given, then environment overrides
    pub fn load_layered(config_file: Option<&Path>) -> Result<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides looked up through `lookup` (the process environment in
    /// production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(env::DATABASE_URL) {
            debug!("{} overrides database url", env::DATABASE_URL);
            self.database.url = url;
        }

        if let Some(policy) = lookup(env::MALFORMED_LINES) {
            self.processing.malformed_lines = policy.parse()?;
        }

        if let Some(date) = lookup(env::REFERENCE_DATE) {
            self.processing.reference_date = Some(parse_reference_date(&date)?);
        }

        Ok(())
    }

    /// Check the configuration is usable for a run
    pub fn validate(&self) -> Result<()> {
        let path = self.database.database_path();
        let path_str = path.to_string_lossy();

        if path_str.trim().is_empty() {
            return Err(Error::configuration("Database url must not be empty"));
        }

        // Every partition opens its own connection, so an in-memory database
        // would lose each table as soon as it was written.
        if path_str == ":memory:" {
            return Err(Error::configuration(
                "In-memory SQLite databases are not supported; use --dry-run instead",
            ));
        }

        Ok(())
    }

    /// Reference date for the run: the configured one, or today's local date
    pub fn reference_date(&self) -> NaiveDate {
        self.processing
            .reference_date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Parse a YYYY-MM-DD reference date
pub fn parse_reference_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), constants::REFERENCE_DATE_FORMAT).map_err(|e| {
        Error::configuration(format!(
            "Invalid reference date '{}' (expected YYYY-MM-DD): {}",
            text, e
        ))
    })
}
