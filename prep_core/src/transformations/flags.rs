use crate::core::{Column, Table};

/// Suffix appended to a source column name to form its null-flag column.
pub const NULL_FLAG_SUFFIX: &str = "_nan";

/// Name of the null-flag column derived from `source`.
pub fn flag_column_name(source: &str) -> String {
    format!("{}{}", source, NULL_FLAG_SUFFIX)
}

/// `true` when `name` carries the null-flag suffix.
pub fn is_flag_column(name: &str) -> bool {
    name.ends_with(NULL_FLAG_SUFFIX)
}

/// Append a `<column>_nan` indicator (1 = missing, 0 = present) for every
/// column present at call time.
///
/// Run this once, after all value cleaning; calling it again would flag the
/// flag columns too. A source column whose name already equals a flag name is
/// replaced by the freshly computed flag.
pub fn add_null_flags(table: Table) -> Table {
    let flags: Vec<Column> = table
        .columns()
        .iter()
        .map(|column| {
            let values = column
                .cells()
                .iter()
                .map(|cell| Some(if cell.is_missing() { 1.0 } else { 0.0 }))
                .collect();
            Column::numeric(flag_column_name(column.name()), values)
        })
        .collect();

    let mut columns = table.into_columns();
    for flag in flags {
        match columns.iter().position(|c| c.name() == flag.name()) {
            Some(index) => {
                log::warn!("Column {} already exists, replacing it with its null flag", flag.name());
                columns[index] = flag;
            }
            None => columns.push(flag),
        }
    }

    log::debug!("Added null flags, table now has {} columns", columns.len());
    Table::from_columns_unchecked(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Cell;

    #[test]
    fn test_flags_mark_missing_cells() {
        let table = Table::new(vec![
            Column::numeric("a", vec![Some(1.0), None]),
            Column::text("b", vec![Some("x"), None]),
        ])
        .unwrap();

        let result = add_null_flags(table);

        assert_eq!(result.column_names(), vec!["a", "b", "a_nan", "b_nan"]);
        assert_eq!(result.column("a_nan").unwrap().numbers(), vec![Some(0.0), Some(1.0)]);
        assert_eq!(result.column("b_nan").unwrap().numbers(), vec![Some(0.0), Some(1.0)]);
        assert!(result.column("a_nan").unwrap().is_numeric());
    }

    #[test]
    fn test_flag_columns_match_row_count() {
        let table = Table::new(vec![Column::new(
            "c",
            vec![Cell::Missing, Cell::Missing, Cell::Number(3.0)],
        )])
        .unwrap();

        let result = add_null_flags(table);
        assert_eq!(result.column("c_nan").unwrap().len(), 3);
        assert_eq!(result.height(), 3);
    }

    #[test]
    fn test_is_flag_column() {
        assert!(is_flag_column("monto_nan"));
        assert!(!is_flag_column("monto"));
        assert_eq!(flag_column_name("score"), "score_nan");
    }
}
