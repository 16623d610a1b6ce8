//! Pipeline configuration file support.
//!
//! Every setting has a default, so an empty TOML document is a valid
//! configuration. Example `prep.toml`:
//!
//! ```toml
//! critical_columns = ["fraude", "monto"]
//! null_threshold = 0.10
//! date_formats = ["%Y-%m-%d", "%d/%m/%Y"]
//!
//! [load]
//! delimiter = ";"
//! encoding = "latin1"
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PrepError, PrepResult};
use crate::io::LoadOptions;
use crate::preprocessing::validator::{DEFAULT_CRITICAL_COLUMNS, DEFAULT_NULL_THRESHOLD};

/// Settings for the preprocessing pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    pub amount_column: String,
    pub score_column: String,
    pub date_column: String,
    pub client_number_column: String,
    /// Columns whose missing ratio is gated
    pub critical_columns: Vec<String>,
    /// Largest allowed missing ratio for a critical column, in `[0, 1]`
    pub null_threshold: f64,
    /// chrono format strings tried in order for the date column
    pub date_formats: Vec<String>,
    pub load: LoadOptions,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            amount_column: "monto".to_string(),
            score_column: "score".to_string(),
            date_column: "fecha_registro".to_string(),
            client_number_column: "num_cliente".to_string(),
            critical_columns: DEFAULT_CRITICAL_COLUMNS.iter().map(|s| s.to_string()).collect(),
            null_threshold: DEFAULT_NULL_THRESHOLD,
            date_formats: default_date_formats(),
            load: LoadOptions::default(),
        }
    }
}

fn default_date_formats() -> Vec<String> {
    ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl PreprocessConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Returns
    /// * `Ok(PreprocessConfig)` if the file was read, parsed and validated
    /// * `Err(PrepError::Config)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> PrepResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PrepError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> PrepResult<Self> {
        let config: PreprocessConfig = toml::from_str(content)
            .map_err(|e| PrepError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load `prep.toml` from the current directory if present, otherwise the
    /// defaults.
    pub fn from_default_location() -> PrepResult<Self> {
        let path = PathBuf::from("prep.toml");
        if path.exists() {
            log::info!("Using configuration from {}", path.display());
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> PrepResult<()> {
        if !(0.0..=1.0).contains(&self.null_threshold) {
            return Err(PrepError::Config(format!(
                "null_threshold must be within [0, 1], got {}",
                self.null_threshold
            )));
        }
        if self.date_formats.is_empty() {
            return Err(PrepError::Config(
                "date_formats must list at least one format".to_string(),
            ));
        }
        if !self.load.delimiter.is_ascii() {
            return Err(PrepError::Config(format!(
                "delimiter must be an ASCII character, got {:?}",
                self.load.delimiter
            )));
        }
        Ok(())
    }
}
