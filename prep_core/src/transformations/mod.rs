//! Column-cleaning transforms applied by the preprocessing pipeline.
//!
//! Each transform takes ownership of a [`Table`](crate::core::Table) and
//! returns the transformed table. None of them fail: unparsable values are
//! downgraded to missing.
//!
//! # Modules
//!
//! - [`headers`]: column name normalization and synonym collapsing
//! - [`cleaning`]: missing-value standardization and typed coercions
//! - [`text`]: diacritic removal
//! - [`flags`]: `<column>_nan` null indicators
//!
//! # Example
//!
//! ```
//! use tabular_prep::core::{Column, Table};
//! use tabular_prep::transformations::{clean_amount, normalize_columns, to_missing};
//!
//! let table = Table::new(vec![Column::text("Monto $$", vec![Some("$1,000"), Some(" ")])]).unwrap();
//! let table = clean_amount(to_missing(normalize_columns(table)), "monto");
//! assert_eq!(table.column("monto").unwrap().numbers(), vec![Some(1000.0), None]);
//! ```

pub mod cleaning;
pub mod flags;
pub mod headers;
pub mod text;

pub use cleaning::{
    clean_amount, clean_client_number, clean_date, clean_score, to_missing,
};
pub use flags::{add_null_flags, flag_column_name, is_flag_column, NULL_FLAG_SUFFIX};
pub use headers::{normalize_columns, normalize_header};
pub use text::{fold_diacritics, strip_accents};
