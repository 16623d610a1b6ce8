//! Error types for loading and preprocessing.

use serde::Serialize;
use std::fmt;

/// Result type used across the crate.
pub type PrepResult<T> = Result<T, PrepError>;

/// A critical column whose missing ratio exceeded the allowed threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnBreach {
    pub column: String,
    pub missing: usize,
    pub rows: usize,
    pub ratio: f64,
}

impl fmt::Display for ColumnBreach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{} missing, ratio {:.3})",
            self.column, self.missing, self.rows, self.ratio
        )
    }
}

/// Error type for loading and preprocessing.
#[derive(Debug, thiserror::Error)]
pub enum PrepError {
    #[error("Unsupported file format: {extension:?}")]
    UnsupportedFormat { extension: String },

    #[error("Failed to read {path}: {reason}")]
    ReadFailure { path: String, reason: String },

    #[error("Critical data-quality failure: {}", format_breaches(.breaches))]
    CriticalQualityFailure { breaches: Vec<ColumnBreach> },

    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PrepError {
    /// `true` when the quality gate rejected the table.
    pub fn is_quality_failure(&self) -> bool {
        matches!(self, PrepError::CriticalQualityFailure { .. })
    }

    /// Columns and ratios that tripped the quality gate, if any.
    pub fn breaches(&self) -> &[ColumnBreach] {
        match self {
            PrepError::CriticalQualityFailure { breaches } => breaches,
            _ => &[],
        }
    }

    pub(crate) fn read_failure(path: impl AsRef<std::path::Path>, err: impl fmt::Display) -> Self {
        PrepError::ReadFailure {
            path: path.as_ref().display().to_string(),
            reason: format!("{:#}", err),
        }
    }
}

fn format_breaches(breaches: &[ColumnBreach]) -> String {
    breaches
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
