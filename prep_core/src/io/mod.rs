//! Format detection and file loading.
//!
//! [`TableLoader`] maps file extensions to a [`ReaderKind`] and hands the
//! path to the matching reader in [`crate::parsing`]. Unknown extensions fail
//! fast with [`PrepError::UnsupportedFormat`](crate::error::PrepError).
//!
//! # Example
//!
//! ```no_run
//! use tabular_prep::io::{load_table, LoadOptions};
//! use std::path::Path;
//!
//! let table = load_table(Path::new("ventas.xlsx"), &LoadOptions::default())
//!     .expect("Failed to load");
//! println!("Loaded {} columns", table.width());
//! ```

pub mod loaders;


pub use loaders::{load_table, LoadOptions, ReaderKind, TableLoader};
