//! Readers for the supported tabular file formats.
//!
//! Each reader turns one file into a [`Table`](crate::core::Table) and is
//! selected by [`TableLoader`](crate::io::TableLoader) from the file extension.
//!
//! # Readers
//!
//! - [`csv_parser`]: delimited text (`.csv`, `.txt`) via Polars, with
//!   `encoding_rs` decoding
//! - [`xlsx_parser`]: spreadsheets (`.xlsx`, `.xls`) via calamine
//! - [`json_parser`]: JSON records (`.json`)
//!
//! # Example
//!
//! ```no_run
//! use tabular_prep::io::LoadOptions;
//! use tabular_prep::parsing::csv_parser::parse_delimited;
//! use std::path::Path;
//!
//! let table = parse_delimited(Path::new("ventas.csv"), &LoadOptions::default())
//!     .expect("Failed to parse file");
//! println!("{} rows", table.height());
//! ```

pub mod csv_parser;
pub mod json_parser;
pub mod xlsx_parser;

#[cfg(test)]
mod csv_parser_tests;
