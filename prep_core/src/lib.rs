//! Tabular data preprocessing.
//!
//! Loads delimited text, spreadsheet and JSON record files into an in-memory
//! [`Table`], normalizes column names, standardizes missing values, coerces
//! monetary, score, client-number and date columns, strips diacritics, adds
//! `<column>_nan` indicator columns, and gates the result on the missing ratio
//! of critical columns.
//!
//! ```no_run
//! use std::path::Path;
//! use tabular_prep::{process, LoadOptions, PrepError};
//!
//! match process(Path::new("transacciones.csv"), &LoadOptions::default()) {
//!     Ok((table, report)) => {
//!         println!("{} rows, {} missing values", table.height(), report.total_missing());
//!     }
//!     Err(PrepError::CriticalQualityFailure { breaches }) => {
//!         eprintln!("Table rejected: {:?}", breaches);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod transformations;

pub use crate::core::{Cell, Column, ColumnKind, Table};
pub use crate::error::{ColumnBreach, PrepError, PrepResult};
pub use crate::io::{load_table, LoadOptions, TableLoader};
pub use crate::preprocessing::{
    process, GateOutcome, PreprocessConfig, PreprocessPipeline, PreprocessResult, QualityGate,
    QualityReport,
};
