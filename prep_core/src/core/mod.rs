//! Core table model shared by the loaders and the preprocessing pipeline.
//!
//! This module defines the labeled two-dimensional [`Table`] and its scalar
//! [`Cell`] values.

pub mod table;

pub use table::{Cell, Column, ColumnKind, Table};
