//! Configuration file loading and validation.
//!
//! The configuration is a flat YAML file. Credentials, the target volume,
//! the description base, the retention count, and the rotation marker are
//! all required and must be non-blank; `log_file` is optional and selects
//! the log destination. Every configuration failure prints
//! [`CONFIG_EXAMPLE`] so the operator can see a complete working file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use snaprot_log::{FileLogger, Logger, StdoutLogger};
use thiserror::Error;

/// Example configuration printed alongside every configuration error.
pub const CONFIG_EXAMPLE: &str = r#"# ----------------------------------------------------------------
# config.yml example
# ----------------------------------------------------------------
access_key: ABCDEFGHIJKLMNOPQRST
secret_key: abcdefghijklmnopqrstuvwxyz/ABC1234567890
region: ap-northeast-1
volume_id: vol-abcde123
description: "www.example.com backup"
log_file: /path/to/logfile
rotate: 5
rotate_tag: "[rotate]"
# ----------------------------------------------------------------"#;

/// Print the example configuration to stdout.
pub fn print_config_example() {
    println!("{}", CONFIG_EXAMPLE);
}

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read configuration file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("configuration error: {0} required.")]
    MissingField(&'static str),

    #[error("failed to open log file {path}: {source}")]
    LogFile { path: PathBuf, source: io::Error },
}

/// Configuration exactly as it appears in the YAML file. Every field is
/// optional here so validation can report precisely which key is missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    pub region: Option<String>,
    pub volume_id: Option<String>,
    pub description: Option<String>,
    pub rotate: Option<i64>,
    pub rotate_tag: Option<String>,
    pub log_file: Option<String>,
}

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotConfig {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub volume_id: String,
    pub description: String,
    /// Number of matching snapshots to keep after rotation.
    pub retain: usize,
    pub rotate_tag: String,
    /// Resolved log destination; `None` logs to stdout.
    pub log_file: Option<PathBuf>,
}

/// Read and parse the configuration file.
pub fn load_config(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let raw = serde_yaml::from_str(&contents)?;
    Ok(raw)
}

impl RawConfig {
    /// Validate the required fields, reported in a fixed order.
    ///
    /// A missing key, a null value, and a blank string all count as
    /// "required". Values are kept verbatim; only the emptiness check
    /// ignores surrounding whitespace. `config_dir` anchors a relative
    /// `log_file` path.
    pub fn validate(&self, config_dir: &Path) -> Result<SnapshotConfig, ConfigError> {
        let access_key = require(&self.access_key, "access_key")?;
        let secret_key = require(&self.secret_key, "secret_key")?;
        let region = require(&self.region, "region")?;
        let rotate = self.rotate.ok_or(ConfigError::MissingField("rotate"))?;
        let volume_id = require(&self.volume_id, "volume_id")?;
        let description = require(&self.description, "description")?;
        let rotate_tag = require(&self.rotate_tag, "rotate_tag")?;

        // A negative retention count keeps nothing rather than failing.
        let retain = rotate.max(0) as usize;

        Ok(SnapshotConfig {
            access_key,
            secret_key,
            region,
            volume_id,
            description,
            retain,
            rotate_tag,
            log_file: self.resolved_log_file(config_dir),
        })
    }

    /// Resolve the log destination, if any. A blank value means stdout; a
    /// relative path is anchored at the configuration file's directory.
    pub fn resolved_log_file(&self, config_dir: &Path) -> Option<PathBuf> {
        let raw = self.log_file.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }
        let path = Path::new(raw);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            Some(config_dir.join(path))
        }
    }
}

fn require(value: &Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.clone()),
        _ => Err(ConfigError::MissingField(name)),
    }
}

/// Build the log sink selected by the configuration.
pub fn build_logger(raw: &RawConfig, config_dir: &Path) -> Result<Box<dyn Logger>, ConfigError> {
    match raw.resolved_log_file(config_dir) {
        Some(path) => {
            let logger = FileLogger::open(&path).map_err(|source| ConfigError::LogFile {
                path: path.clone(),
                source,
            })?;
            Ok(Box::new(logger))
        }
        None => Ok(Box::new(StdoutLogger::new())),
    }
}

// ============================================================
// Tests
// ============================================================
