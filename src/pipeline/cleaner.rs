//! Normalizes column names, fills missing cells and drops duplicate rows.
use crate::spreadsheet::{Column, Table, Value};
use std::collections::HashMap;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CleanError {
    /// Two source columns normalize to the same name
    #[error("Columns '{first}' and '{second}' both normalize to '{normalized}'")]
    ColumnCollision {
        first: String,
        second: String,
        normalized: String,
    },
}

/// Trims surrounding whitespace and upper-cases a column name.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Returns a cleaned copy of `table`.
///
/// Every missing cell is replaced by its column's fill value, then exact
/// duplicate rows are removed, keeping the first occurrence.
///
/// # Errors
///
/// Returns [`CleanError::ColumnCollision`] if two column names normalize to the same name.
pub fn clean(table: &Table) -> Result<Table, CleanError> {
    let columns = normalize_columns(table.columns())?;

    let filled: Vec<Vec<Value>> = table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(columns.iter())
                .map(|(value, column)| match value {
                    Value::Empty => column.kind.fill_value(),
                    other => column.kind.coerce(other.clone()),
                })
                .collect()
        })
        .collect();

    let mut seen: HashSet<&Vec<Value>> = HashSet::with_capacity(filled.len());
    let rows: Vec<Vec<Value>> = filled
        .iter()
        .filter(|&row| seen.insert(row))
        .cloned()
        .collect();
    let duplicates = table.height() - rows.len();

    tracing::info!(
        "Data cleaned: {} duplicate rows removed, {} rows remaining",
        duplicates,
        rows.len()
    );
    Ok(Table::new(columns, rows))
}

fn normalize_columns(columns: &[Column]) -> Result<Vec<Column>, CleanError> {
    let mut origin: HashMap<String, &str> = HashMap::with_capacity(columns.len());
    columns
        .iter()
        .map(|column| {
            let normalized = normalize_column_name(&column.name);
            if let Some(first) = origin.insert(normalized.clone(), &column.name) {
                return Err(CleanError::ColumnCollision {
                    first: first.to_owned(),
                    second: column.name.clone(),
                    normalized,
                });
            }
            Ok(Column::new(normalized, column.kind))
        })
        .collect()
}
