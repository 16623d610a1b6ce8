//! In-memory labeled table used by every loader and transform.
//!
//! A [`Table`] is an ordered set of uniquely named [`Column`]s. Every column
//! holds one [`Cell`] per row and all columns share the same row count. The
//! pipeline threads a single owned `Table` through each transform.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::error::{PrepError, PrepResult};

/// A single scalar value in a table.
///
/// `Missing` is the canonical "no value" state. A `Number` holding NaN is
/// treated as missing as well, since that is how numeric readers encode it.
///
/// # Examples
///
/// ```
/// use tabular_prep::core::Cell;
///
/// assert!(Cell::Missing.is_missing());
/// assert!(Cell::Number(f64::NAN).is_missing());
/// assert_eq!(Cell::from(Some(2.5)).as_number(), Some(2.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Missing,
    Number(f64),
    Text(String),
    Date(NaiveDate),
}

impl Cell {
    /// Builds a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Returns `true` for `Missing` and for NaN numbers.
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Missing => true,
            Cell::Number(value) => value.is_nan(),
            _ => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) if !value.is_nan() => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(value) => Some(*value),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Cell::Date(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => write!(f, "null"),
            Cell::Number(value) => write!(f, "{}", value),
            Cell::Text(value) => write!(f, "{}", value),
            Cell::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

/// Logical type of a column, derived from its non-missing cells or set
/// explicitly by a coercing transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Text,
    Date,
    Mixed,
    /// Every cell is missing and no transform has assigned a type.
    Empty,
}

impl ColumnKind {
    /// Infers the kind from the present cells.
    pub fn infer(cells: &[Cell]) -> Self {
        let mut kind = ColumnKind::Empty;
        for cell in cells.iter().filter(|c| !c.is_missing()) {
            let cell_kind = match cell {
                Cell::Number(_) => ColumnKind::Numeric,
                Cell::Text(_) => ColumnKind::Text,
                Cell::Date(_) => ColumnKind::Date,
                Cell::Missing => continue,
            };
            kind = match kind {
                ColumnKind::Empty => cell_kind,
                current if current == cell_kind => current,
                _ => return ColumnKind::Mixed,
            };
        }
        kind
    }
}

/// A named sequence of cells.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    name: String,
    kind: ColumnKind,
    cells: Vec<Cell>,
}

impl Column {
    /// Creates a column, inferring its kind from the cells.
    pub fn new(name: impl Into<String>, cells: Vec<Cell>) -> Self {
        let kind = ColumnKind::infer(&cells);
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    /// Creates a numeric column; `None` becomes `Cell::Missing`.
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let cells = values
            .into_iter()
            .map(|v| match v {
                Some(n) if !n.is_nan() => Cell::Number(n),
                _ => Cell::Missing,
            })
            .collect();
        Self {
            name: name.into(),
            kind: ColumnKind::Numeric,
            cells,
        }
    }

    pub fn text<S: Into<String>>(name: impl Into<String>, values: Vec<Option<S>>) -> Self {
        let cells = values
            .into_iter()
            .map(|v| v.map(|s| Cell::Text(s.into())).unwrap_or(Cell::Missing))
            .collect();
        Self::new(name, cells)
    }

    /// Creates a column with an explicit kind, bypassing inference.
    pub fn with_kind(name: impl Into<String>, kind: ColumnKind, cells: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            kind,
            cells,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ColumnKind {
        self.kind
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Cell> {
        self.cells.get(row)
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }

    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Consumes the column, returning its name and cells.
    pub fn into_parts(self) -> (String, Vec<Cell>) {
        (self.name, self.cells)
    }

    /// Numeric view of the column; non-numeric and missing cells map to `None`.
    pub fn numbers(&self) -> Vec<Option<f64>> {
        self.cells.iter().map(Cell::as_number).collect()
    }
}

/// Ordered collection of uniquely named, equally long columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Builds a table, rejecting duplicate names and ragged columns.
    pub fn new(columns: Vec<Column>) -> PrepResult<Self> {
        let mut table = Self::default();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Number of rows (0 for a table without columns).
    pub fn height(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Appends a column at the end of the table.
    pub fn push_column(&mut self, column: Column) -> PrepResult<()> {
        if self.contains(column.name()) {
            return Err(PrepError::InvalidTable(format!(
                "duplicate column name: {}",
                column.name()
            )));
        }
        if !self.columns.is_empty() && column.len() != self.height() {
            return Err(PrepError::InvalidTable(format!(
                "column {} has {} rows, table has {}",
                column.name(),
                column.len(),
                self.height()
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    /// Swaps in a column with the same name, keeping its position.
    ///
    /// Returns the previous column. Fails if no column has that name or the
    /// row count differs.
    pub fn replace_column(&mut self, column: Column) -> PrepResult<Column> {
        let index = self.position(column.name()).ok_or_else(|| {
            PrepError::InvalidTable(format!("no column named {}", column.name()))
        })?;
        if column.len() != self.height() {
            return Err(PrepError::InvalidTable(format!(
                "column {} has {} rows, table has {}",
                column.name(),
                column.len(),
                self.height()
            )));
        }
        Ok(std::mem::replace(&mut self.columns[index], column))
    }

    /// Consumes the table and yields its columns in order.
    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }

    /// Replaces every column through `f`, which must preserve lengths.
    pub(crate) fn map_columns<F>(self, f: F) -> Self
    where
        F: FnMut(Column) -> Column,
    {
        let columns: Vec<Column> = self.columns.into_iter().map(f).collect();
        debug_assert!(columns.windows(2).all(|w| w[0].len() == w[1].len()));
        Self { columns }
    }

    /// Builds a table from columns already known to be consistent.
    pub(crate) fn from_columns_unchecked(columns: Vec<Column>) -> Self {
        Self { columns }
    }
}
