//! Preprocessing pipeline, quality gate and configuration.
//!
//! # Modules
//!
//! - [`pipeline`]: the orchestrator that runs every transform in order
//! - [`validator`]: critical-column quality gate and missing-value report
//! - [`config`]: [`PreprocessConfig`] defaults and TOML loading

pub mod config;
pub mod pipeline;
pub mod validator;

pub use config::PreprocessConfig;
pub use pipeline::{process, PreprocessPipeline, PreprocessResult};
pub use validator::{
    summarize, validate, ColumnQuality, GateOutcome, QualityGate, QualityReport,
    DEFAULT_CRITICAL_COLUMNS, DEFAULT_NULL_THRESHOLD,
};
