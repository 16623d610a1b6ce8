use anyhow::{bail, Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

use crate::core::{Cell, Column, Table};

/// Parse a JSON records file into a [`Table`]
///
/// Three layouts are accepted:
/// - an array of row objects (`[{"a": 1}, {"a": 2}]`)
/// - an object of column arrays (`{"a": [1, 2]}`)
/// - an object of column objects keyed by row label (`{"a": {"0": 1, "1": 2}}`)
pub fn parse_records_json(path: &Path) -> Result<Table> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to open JSON file {}", path.display()))?;
    parse_records_json_str(&content)
}

/// Parse JSON records from a string
pub fn parse_records_json_str(json_str: &str) -> Result<Table> {
    let value: Value = serde_json::from_str(json_str).context("Failed to parse JSON")?;

    match value {
        Value::Array(rows) => rows_to_table(rows),
        Value::Object(columns) => columns_to_table(columns),
        other => bail!("Expected a JSON array or object at top level, found {}", kind_of(&other)),
    }
}

fn rows_to_table(rows: Vec<Value>) -> Result<Table> {
    let mut names: Vec<String> = Vec::new();
    let mut records: Vec<Map<String, Value>> = Vec::with_capacity(rows.len());

    for (index, row) in rows.into_iter().enumerate() {
        let Value::Object(record) = row else {
            bail!("Row {} is not a JSON object", index);
        };
        for key in record.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
        records.push(record);
    }

    let columns = names
        .into_iter()
        .map(|name| {
            let cells = records
                .iter()
                .map(|record| record.get(&name).map(value_to_cell).unwrap_or(Cell::Missing))
                .collect();
            Column::new(name, cells)
        })
        .collect();

    Ok(Table::new(columns)?)
}

fn columns_to_table(columns: Map<String, Value>) -> Result<Table> {
    // Row labels in first-seen order across every column-object
    let mut labels: Vec<String> = Vec::new();
    for value in columns.values() {
        if let Value::Object(by_row) = value {
            for label in by_row.keys() {
                if !labels.contains(label) {
                    labels.push(label.clone());
                }
            }
        }
    }

    let mut table_columns = Vec::with_capacity(columns.len());
    for (name, value) in columns {
        let cells = match value {
            Value::Array(items) => items.iter().map(value_to_cell).collect(),
            Value::Object(by_row) => labels
                .iter()
                .map(|label| by_row.get(label).map(value_to_cell).unwrap_or(Cell::Missing))
                .collect(),
            other => bail!("Column {} must be an array or object, found {}", name, kind_of(&other)),
        };
        table_columns.push(Column::new(name, cells));
    }

    Table::new(table_columns).context("JSON columns have inconsistent lengths")
}

fn value_to_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Missing,
        Value::Bool(b) => Cell::Number(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64().map(Cell::Number).unwrap_or(Cell::Missing),
        Value::String(s) => Cell::Text(s.clone()),
        nested => Cell::Text(nested.to_string()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
