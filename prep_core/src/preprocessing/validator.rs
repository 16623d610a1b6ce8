//! Data-quality gate and missing-value report.
//!
//! The gate checks the missing ratio of designated critical columns against a
//! threshold. The report counts missing values per column, leaving out the
//! `_nan` indicator columns added by the flagging step.

use serde::Serialize;

use crate::core::Table;
use crate::error::{ColumnBreach, PrepError, PrepResult};
use crate::transformations::flags::is_flag_column;

/// Default allowed missing ratio for critical columns.
pub const DEFAULT_NULL_THRESHOLD: f64 = 0.10;

/// Columns gated by default.
pub const DEFAULT_CRITICAL_COLUMNS: [&str; 2] = ["fraude", "monto"];

/// Outcome of evaluating the quality gate.
///
/// # Examples
///
/// ```
/// use tabular_prep::core::{Column, Table};
/// use tabular_prep::preprocessing::validator::{validate, GateOutcome};
///
/// let table = Table::new(vec![
///     Column::numeric("fraude", vec![Some(0.0), Some(1.0), Some(0.0)]),
///     Column::numeric("monto", vec![Some(100.0), Some(200.0), Some(300.0)]),
/// ]).unwrap();
///
/// assert_eq!(validate(&table, &["fraude", "monto"], 0.10), GateOutcome::Pass);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "breaches", rename_all = "lowercase")]
pub enum GateOutcome {
    Pass,
    Fail(Vec<ColumnBreach>),
}

impl GateOutcome {
    /// `true` when no critical column exceeded the threshold.
    pub fn passes(&self) -> bool {
        matches!(self, GateOutcome::Pass)
    }

    pub fn breaches(&self) -> &[ColumnBreach] {
        match self {
            GateOutcome::Pass => &[],
            GateOutcome::Fail(breaches) => breaches,
        }
    }

    /// Convert a failing outcome into [`PrepError::CriticalQualityFailure`].
    pub fn into_result(self) -> PrepResult<()> {
        match self {
            GateOutcome::Pass => Ok(()),
            GateOutcome::Fail(breaches) => Err(PrepError::CriticalQualityFailure { breaches }),
        }
    }
}

/// Threshold check over a fixed set of critical columns.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityGate {
    critical_columns: Vec<String>,
    threshold: f64,
}

impl QualityGate {
    pub fn new<I, S>(critical_columns: I, threshold: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            critical_columns: critical_columns.into_iter().map(Into::into).collect(),
            threshold,
        }
    }

    pub fn critical_columns(&self) -> &[String] {
        &self.critical_columns
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compute the missing ratio of each critical column present in `table`.
    ///
    /// A column fails when its ratio is strictly greater than the threshold.
    /// Critical columns absent from the table are skipped. An empty table
    /// has ratio 0 everywhere and passes.
    pub fn evaluate(&self, table: &Table) -> GateOutcome {
        let rows = table.height();
        let mut breaches = Vec::new();

        for name in &self.critical_columns {
            let Some(column) = table.column(name) else {
                log::warn!("Critical column {} not found, skipping quality check", name);
                continue;
            };

            let missing = column.missing_count();
            let ratio = if rows == 0 {
                0.0
            } else {
                missing as f64 / rows as f64
            };

            if ratio > self.threshold {
                log::warn!(
                    "Critical column {} has missing ratio {:.3} above threshold {:.3}",
                    name,
                    ratio,
                    self.threshold
                );
                breaches.push(ColumnBreach {
                    column: name.clone(),
                    missing,
                    rows,
                    ratio,
                });
            }
        }

        if breaches.is_empty() {
            GateOutcome::Pass
        } else {
            GateOutcome::Fail(breaches)
        }
    }

    /// Like [`evaluate`](Self::evaluate), but a failure is returned as
    /// [`PrepError::CriticalQualityFailure`] so callers must halt.
    pub fn enforce(&self, table: &Table) -> PrepResult<()> {
        self.evaluate(table).into_result()
    }
}

impl Default for QualityGate {
    fn default() -> Self {
        Self::new(DEFAULT_CRITICAL_COLUMNS, DEFAULT_NULL_THRESHOLD)
    }
}

/// Evaluate the quality gate for the given critical columns and threshold.
pub fn validate<S: AsRef<str>>(table: &Table, critical_columns: &[S], threshold: f64) -> GateOutcome {
    QualityGate::new(critical_columns.iter().map(|s| s.as_ref().to_string()), threshold).evaluate(table)
}

/// Missing-value count for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnQuality {
    pub column: String,
    pub missing: usize,
}

/// Per-column missing counts, in table order, excluding null-flag columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualityReport {
    pub rows: usize,
    pub columns: Vec<ColumnQuality>,
}

impl QualityReport {
    /// Build the report from a table. Read-only.
    pub fn summarize(table: &Table) -> Self {
        let columns = table
            .columns()
            .iter()
            .filter(|c| !is_flag_column(c.name()))
            .map(|c| ColumnQuality {
                column: c.name().to_string(),
                missing: c.missing_count(),
            })
            .collect();

        Self {
            rows: table.height(),
            columns,
        }
    }

    /// Missing count for `column`, if it is part of the report.
    pub fn get(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .find(|c| c.column == column)
            .map(|c| c.missing)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.columns.iter().map(|c| (c.column.as_str(), c.missing))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.missing).sum()
    }

    /// Missing ratio for `column`; 0 for an empty table.
    pub fn missing_ratio(&self, column: &str) -> Option<f64> {
        self.get(column).map(|missing| {
            if self.rows == 0 {
                0.0
            } else {
                missing as f64 / self.rows as f64
            }
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Build a [`QualityReport`] for `table`.
pub fn summarize(table: &Table) -> QualityReport {
    QualityReport::summarize(table)
}
