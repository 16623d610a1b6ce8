//! Value-level cleaning transforms.
//!
//! Every coercing transform follows the same failure policy: a cell that
//! cannot be parsed becomes [`Cell::Missing`]. Problems surface later through
//! the quality gate and report, never as errors from these functions.
//! Transforms targeting a named column are no-ops when it is absent.

use chrono::NaiveDate;

use crate::core::{Cell, Column, ColumnKind, Table};

/// Spanish number words accepted in score columns.
pub const SCORE_WORDS: [(&str, f64); 5] = [
    ("uno", 1.0),
    ("dos", 2.0),
    ("tres", 3.0),
    ("cuatro", 4.0),
    ("cinco", 5.0),
];

const CURRENCY_SYMBOLS: [char; 9] = ['$', '€', '£', '¥', '₡', '₲', '₱', '₹', '₩'];

/// `true` for the raw text forms that mean "no value".
pub fn is_missing_text(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan")
}

/// Replace empty, whitespace-only and `"nan"` text (and NaN numbers) with
/// [`Cell::Missing`] in every column. Idempotent.
pub fn to_missing(table: Table) -> Table {
    table.map_columns(|column| {
        let previous = column.kind();
        let (name, cells) = column.into_parts();
        let cells: Vec<Cell> = cells
            .into_iter()
            .map(|cell| match cell {
                Cell::Text(ref text) if is_missing_text(text) => Cell::Missing,
                Cell::Number(n) if n.is_nan() => Cell::Missing,
                other => other,
            })
            .collect();

        // An all-missing result keeps the type it had before
        let kind = match ColumnKind::infer(&cells) {
            ColumnKind::Empty => previous,
            inferred => inferred,
        };
        Column::with_kind(name, kind, cells)
    })
}

/// Parse a monetary string such as `"$1,000"`; `None` when it is not a number.
pub fn parse_amount(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| !(CURRENCY_SYMBOLS.contains(c) || *c == ',' || c.is_whitespace()))
        .collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce the amount column to numbers, stripping currency symbols and
/// thousands separators.
pub fn clean_amount(table: Table, column: &str) -> Table {
    coerce_numeric(table, column, |cell| match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(text) => parse_amount(text),
        _ => None,
    })
}

/// Parse a client number, keeping only its digits.
pub fn parse_client_number(text: &str) -> Option<f64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<i64>().ok().map(|n| n as f64)
}

/// Coerce the client-number column to integers.
///
/// Non-integral numbers are treated as unparsable.
pub fn clean_client_number(table: Table, column: &str) -> Table {
    coerce_numeric(table, column, |cell| match cell {
        Cell::Number(n) if n.fract() == 0.0 => Some(*n),
        Cell::Text(text) => parse_client_number(text),
        _ => None,
    })
}

/// Map a Spanish score word (`"uno"`..`"cinco"`, any case) to 1..5.
pub fn parse_score_word(text: &str) -> Option<f64> {
    let word = text.trim().to_lowercase();
    SCORE_WORDS
        .iter()
        .find(|(candidate, _)| *candidate == word)
        .map(|(_, value)| *value)
}

/// Map score words to integers; numeric cells pass through.
pub fn clean_score(table: Table, column: &str) -> Table {
    coerce_numeric(table, column, |cell| match cell {
        Cell::Number(n) => Some(*n),
        Cell::Text(text) => parse_score_word(text),
        _ => None,
    })
}

/// Parse a date using the first matching format.
///
/// A value that fails every format is retried on the part before a `T` or
/// space, so timestamps such as `2025-01-01 10:30:00` keep their date.
pub fn parse_date(text: &str, formats: &[String]) -> Option<NaiveDate> {
    let text = text.trim();
    let try_formats = |value: &str| {
        formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
    };

    try_formats(text).or_else(|| {
        text.split(['T', ' '])
            .next()
            .filter(|head| head.len() < text.len())
            .and_then(try_formats)
    })
}

/// Parse the date column into [`Cell::Date`] values.
pub fn clean_date(table: Table, column: &str, formats: &[String]) -> Table {
    map_column(table, column, ColumnKind::Date, |cell| match cell {
        Cell::Date(date) => Cell::Date(date),
        Cell::Text(text) => parse_date(&text, formats).map(Cell::Date).unwrap_or(Cell::Missing),
        _ => Cell::Missing,
    })
}

fn coerce_numeric<F>(table: Table, column: &str, parse: F) -> Table
where
    F: Fn(&Cell) -> Option<f64>,
{
    map_column(table, column, ColumnKind::Numeric, |cell| {
        parse(&cell).map(Cell::Number).unwrap_or(Cell::Missing)
    })
}

fn map_column<F>(table: Table, column: &str, kind: ColumnKind, mut f: F) -> Table
where
    F: FnMut(Cell) -> Cell,
{
    if !table.contains(column) {
        log::debug!("Column {} not present, skipping", column);
        return table;
    }

    table.map_columns(|col| {
        if col.name() != column {
            return col;
        }
        let (name, cells) = col.into_parts();
        let before = cells.iter().filter(|c| c.is_missing()).count();
        let cells: Vec<Cell> = cells.into_iter().map(&mut f).collect();
        let after = cells.iter().filter(|c| c.is_missing()).count();
        if after > before {
            log::debug!(
                "Column {}: {} values could not be coerced to {:?}",
                name,
                after - before,
                kind
            );
        }
        Column::with_kind(name, kind, cells)
    })
}
