use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::core::{Cell, Column, ColumnKind, Table};

/// Remove diacritics by canonical decomposition, dropping combining marks.
///
/// `ñ` becomes `n`, `José` becomes `Jose`.
pub fn fold_diacritics(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Strip accents from every text cell of text-typed columns.
///
/// Numeric and date columns are returned untouched, as are missing cells.
pub fn strip_accents(table: Table) -> Table {
    table.map_columns(|column| match column.kind() {
        ColumnKind::Text | ColumnKind::Mixed => {
            let kind = column.kind();
            let (name, cells) = column.into_parts();
            let cells = cells
                .into_iter()
                .map(|cell| match cell {
                    Cell::Text(value) => Cell::Text(fold_diacritics(&value)),
                    other => other,
                })
                .collect();
            Column::with_kind(name, kind, cells)
        }
        _ => column,
    })
}
