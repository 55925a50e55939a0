//! Reads one sheet of a workbook into a [`Table`].
//!
//! Rows are addressed from the first physical row of the sheet and columns
//! from column A. Everything above the header row is discarded.
use crate::spreadsheet::cell::float_to_int;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::{Column, ColumnKind, Table, Value};
use calamine::{open_workbook_auto, Data, Range, Reader};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    /// Input path does not resolve to a readable file
    #[error("File '{}' not found", .0.display())]
    FileNotFound(PathBuf),

    /// Requested sheet is not part of the workbook
    #[error("Sheet '{sheet}' not found (available sheets: {})", .available.join(", "))]
    SheetNotFound {
        sheet: String,
        available: Vec<String>,
    },

    /// File exists but cannot be read as a spreadsheet
    #[error("Invalid spreadsheet '{}': {source}", .path.display())]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// Sheet ends before the header row
    #[error("Missing header row at {position} in sheet '{sheet}'")]
    MissingHeaderRow { sheet: String, position: String },
}

/// Opens `path`, reads `sheet_name` and builds a table whose column names come
/// from the physical row `header_row` (0-based).
///
/// # Errors
///
/// Returns an error if:
/// - The path is not an existing file
/// - The file is not a readable spreadsheet
/// - The sheet does not exist
/// - The sheet has no row at `header_row`
pub fn load(path: &Path, sheet_name: &str, header_row: usize) -> Result<Table, LoadError> {
    if !path.is_file() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }
    let invalid_format = |source: calamine::Error| LoadError::InvalidFormat {
        path: path.to_path_buf(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(invalid_format)?;
    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet_name) {
        return Err(LoadError::SheetNotFound {
            sheet: sheet_name.to_owned(),
            available,
        });
    }
    let range = workbook.worksheet_range(sheet_name).map_err(invalid_format)?;
    let table = read_table(&range, sheet_name, header_row)?;

    tracing::info!(
        "Loaded {} rows from sheet '{}' of '{}'",
        table.height(),
        sheet_name,
        path.display()
    );
    let columns: Vec<String> = table
        .columns()
        .iter()
        .map(|column| format!("{} ({})", column.name, column.kind.as_str()))
        .collect();
    tracing::info!("Columns found: {}", columns.join(", "));
    Ok(table)
}

/// Builds a table from a worksheet range.
///
/// Fully blank data rows are skipped. Column types are inferred over all
/// remaining rows before numbers are converted to their column's representation.
pub fn read_table(range: &Range<Data>, sheet_name: &str, header_row: usize) -> Result<Table, LoadError> {
    let missing_header = || LoadError::MissingHeaderRow {
        sheet: sheet_name.to_owned(),
        position: index_to_reference(header_row, 0),
    };
    let (row_upper_bound, col_upper_bound) = range
        .end()
        .map(|(row, col)| (row as usize, col as usize))
        .ok_or_else(missing_header)?;
    if row_upper_bound < header_row {
        return Err(missing_header());
    }

    let width = col_upper_bound + 1;
    let get = |row: usize, col: usize| range.get_value((row as u32, col as u32));

    let names = column_names((0..width).map(|col| get(header_row, col)));
    let rows: Vec<Vec<Value>> = ((header_row + 1)..=row_upper_bound)
        .map(|row| {
            (0..width)
                .map(|col| get(row, col).map(Value::from).unwrap_or_default())
                .collect::<Vec<Value>>()
        })
        .filter(|record| !record.iter().all(Value::is_missing))
        .collect();

    let columns: Vec<Column> = names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let kind = ColumnKind::detect(rows.iter().filter_map(|record| record.get(index)));
            Column::new(name, kind)
        })
        .collect();

    let rows = rows
        .into_iter()
        .map(|record| {
            record
                .into_iter()
                .zip(columns.iter())
                .map(|(value, column)| column.kind.coerce(value))
                .collect()
        })
        .collect();

    Ok(Table::new(columns, rows))
}

/// Turns header cells into unique column names.
///
/// Blank header cells become `Unnamed: <index>`; a repeated name gets a
/// `.1`, `.2`, ... suffix in order of appearance.
fn column_names<'a, I>(header: I) -> Vec<String>
where
    I: IntoIterator<Item = Option<&'a Data>>,
{
    let mut seen: HashSet<String> = HashSet::new();
    header
        .into_iter()
        .enumerate()
        .map(|(index, cell)| {
            let name = cell
                .and_then(header_text)
                .unwrap_or_else(|| format!("Unnamed: {index}"));
            let mut unique = name.clone();
            let mut suffix = 1;
            while seen.contains(&unique) {
                unique = format!("{name}.{suffix}");
                suffix += 1;
            }
            seen.insert(unique.clone());
            unique
        })
        .collect()
}

/// Text of a header cell, or None when the cell is blank.
fn header_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::Empty | Data::Error(_) => return None,
        Data::String(value) => value.to_owned(),
        Data::Float(value) if float_to_int(*value).is_some() => {
            format!("{}", *value as i64)
        }
        other => Value::from(other).to_string(),
    };
    Some(text).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Data {
        Data::String(value.to_owned())
    }

    /// Sheet with a banner in row 1 and headers in row 2.
    fn payroll_range() -> Range<Data> {
        let mut range = Range::new((0, 0), (5, 2));
        range.set_value((0, 0), text("FOLHA DE PAGAMENTO"));
        range.set_value((1, 0), text(" Nome "));
        range.set_value((1, 1), text("cpf"));
        range.set_value((1, 2), text("Liquido"));
        range.set_value((2, 0), text("ANA"));
        range.set_value((2, 1), text("111.111.111-11"));
        range.set_value((2, 2), Data::Float(1500.0));
        range.set_value((3, 0), text("RUI"));
        range.set_value((3, 1), text("222.222.222-22"));
        range.set_value((3, 2), Data::Float(980.5));
        // Row 5 stays blank
        range.set_value((5, 0), text("BIA"));
        range.set_value((5, 1), text("#N/A"));
        range
    }

    #[test]
    fn test_header_row_offset() {
        let table = read_table(&payroll_range(), "Geral", 1).unwrap();

        assert_eq!(table.column_names(), vec![" Nome ", "cpf", "Liquido"]);
        assert_eq!(table.height(), 3);
        assert_eq!(table.rows()[0][0], Value::Text("ANA".to_owned()));
        assert_eq!(table.rows()[2][0], Value::Text("BIA".to_owned()));
    }

    #[test]
    fn test_blank_rows_skipped_and_markers_missing() {
        let table = read_table(&payroll_range(), "Geral", 1).unwrap();

        let last = &table.rows()[2];
        assert!(last[1].is_missing());
        assert!(last[2].is_missing());
        assert_eq!(table.missing_count(), 2);
    }

    #[test]
    fn test_column_kinds() {
        let table = read_table(&payroll_range(), "Geral", 1).unwrap();

        let kinds: Vec<ColumnKind> = table.columns().iter().map(|column| column.kind).collect();
        assert_eq!(kinds, vec![ColumnKind::Text, ColumnKind::Text, ColumnKind::Float]);
    }

    #[test]
    fn test_integer_columns_hold_integers() {
        let mut range = Range::new((0, 0), (3, 0));
        range.set_value((1, 0), text("MATRICULA"));
        range.set_value((2, 0), Data::Float(10.0));
        range.set_value((3, 0), Data::Int(11));

        let table = read_table(&range, "Geral", 1).unwrap();
        assert_eq!(table.columns()[0].kind, ColumnKind::Integer);
        assert!(matches!(table.rows()[0][0], Value::Int(10)));
        assert!(matches!(table.rows()[1][0], Value::Int(11)));
    }

    #[test]
    fn test_unnamed_and_repeated_headers() {
        let mut range = Range::new((0, 0), (2, 3));
        range.set_value((1, 0), text("NOME"));
        range.set_value((1, 2), text("NOME"));
        range.set_value((1, 3), Data::Float(2024.0));
        range.set_value((2, 0), text("ANA"));

        let table = read_table(&range, "Geral", 1).unwrap();
        assert_eq!(table.column_names(), vec!["NOME", "Unnamed: 1", "NOME.1", "2024"]);
        assert_eq!(table.columns()[1].kind, ColumnKind::Float);
    }

    #[test]
    fn test_missing_header_row() {
        let mut range = Range::new((0, 0), (0, 1));
        range.set_value((0, 0), text("only a banner"));

        let error = read_table(&range, "Geral", 1).unwrap_err();
        assert_eq!(error.to_string(), "Missing header row at A2 in sheet 'Geral'");

        let error = read_table(&Range::empty(), "Geral", 1).unwrap_err();
        assert!(matches!(error, LoadError::MissingHeaderRow { .. }));
    }

    #[test]
    fn test_file_not_found() {
        let error = load(Path::new("does-not-exist.xlsx"), "Geral", 1).unwrap_err();
        assert!(matches!(error, LoadError::FileNotFound(_)));
        assert_eq!(error.to_string(), "File 'does-not-exist.xlsx' not found");
    }
}
