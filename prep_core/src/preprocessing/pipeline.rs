use std::path::Path;

use crate::core::Table;
use crate::error::PrepResult;
use crate::io::{LoadOptions, TableLoader};
use crate::preprocessing::config::PreprocessConfig;
use crate::preprocessing::validator::{QualityGate, QualityReport};
use crate::transformations::{
    add_null_flags, clean_amount, clean_client_number, clean_date, clean_score,
    normalize_columns, strip_accents, to_missing,
};

/// Result of a successful preprocessing run
#[derive(Debug, Clone)]
pub struct PreprocessResult {
    pub table: Table,
    pub report: QualityReport,
}

impl PreprocessResult {
    pub fn into_parts(self) -> (Table, QualityReport) {
        (self.table, self.report)
    }
}

/// Main preprocessing pipeline
///
/// Runs a fixed chain over one owned table: header normalization, missing
/// standardization, amount, client number, score and date coercion, accent
/// removal, null flags, the quality gate and finally the quality report.
/// A gate failure stops the run before any table is returned.
pub struct PreprocessPipeline {
    config: PreprocessConfig,
    loader: TableLoader,
}

impl PreprocessPipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self::with_config(PreprocessConfig::default())
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: PreprocessConfig) -> Self {
        Self {
            config,
            loader: TableLoader::new(),
        }
    }

    /// Replace the reader registry used by [`process`](Self::process)
    pub fn with_loader(mut self, loader: TableLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn config(&self) -> &PreprocessConfig {
        &self.config
    }

    /// Load a file and run the full chain over it
    ///
    /// # Errors
    /// * `UnsupportedFormat` when no reader is registered for the extension
    /// * `ReadFailure` when the file cannot be read or parsed
    /// * `CriticalQualityFailure` when a critical column exceeds the threshold
    pub fn process(&self, path: &Path) -> PrepResult<PreprocessResult> {
        let table = self.loader.load(path, &self.config.load)?;
        self.process_table(table)
    }

    /// Run the full chain over an already loaded table
    pub fn process_table(&self, table: Table) -> PrepResult<PreprocessResult> {
        self.config.validate()?;
        log::info!(
            "Preprocessing table with {} rows x {} columns",
            table.height(),
            table.width()
        );

        let table = self.clean(table);

        let gate = QualityGate::new(
            self.config.critical_columns.iter().cloned(),
            self.config.null_threshold,
        );
        gate.enforce(&table)?;

        let report = QualityReport::summarize(&table);
        log::info!(
            "Preprocessing finished: {} columns, {} missing values across {} reported columns",
            table.width(),
            report.total_missing(),
            report.len()
        );

        Ok(PreprocessResult { table, report })
    }

    /// Apply every value transform and the null flags, without gating
    pub fn clean(&self, table: Table) -> Table {
        let config = &self.config;

        let table = normalize_columns(table);
        log::debug!("Normalized headers: {:?}", table.column_names());

        let table = to_missing(table);
        let table = clean_amount(table, &config.amount_column);
        let table = clean_client_number(table, &config.client_number_column);
        let table = clean_score(table, &config.score_column);
        let table = clean_date(table, &config.date_column, &config.date_formats);
        let table = strip_accents(table);
        let table = add_null_flags(table);

        log::debug!(
            "Cleaned table has {} rows x {} columns",
            table.height(),
            table.width()
        );
        table
    }
}

impl Default for PreprocessPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Load `path` with `options` and preprocess it with the default settings
pub fn process(path: &Path, options: &LoadOptions) -> PrepResult<(Table, QualityReport)> {
    let config = PreprocessConfig {
        load: options.clone(),
        ..PreprocessConfig::default()
    };

    let pipeline = PreprocessPipeline::with_config(config);
    pipeline.process(path).map(PreprocessResult::into_parts)
}
