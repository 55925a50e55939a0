use crate::report::layout::{CellContent, ReportLayout};
use crate::report::ExportError;
use crate::spreadsheet::Value;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use rust_xlsxwriter::{Format, Formula, Workbook, Worksheet};
use std::path::Path;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Renders `layout` into a new workbook and saves it at `path`, replacing any
/// existing file. Missing parent directories are created.
pub fn write(layout: &ReportLayout, path: &Path) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(layout.sheet_name)?;

    for merged in &layout.merged {
        worksheet.merge_range(
            merged.first_row,
            merged.first_col,
            merged.last_row,
            merged.last_col,
            &merged.text,
            &merged.style.to_format(),
        )?;
    }

    for cell in &layout.cells {
        let format = cell.style.to_format();
        match &cell.content {
            CellContent::Text(text) => {
                worksheet.write_string_with_format(cell.row, cell.col, text, &format)?;
            }
            CellContent::Integer(number) => {
                worksheet.write_number_with_format(cell.row, cell.col, *number as f64, &format)?;
            }
            CellContent::Value(value) => write_value(worksheet, cell.row, cell.col, value, &format)?,
            CellContent::Formula { expression, result } => {
                let formula = Formula::new(expression).set_result(result.to_string());
                worksheet.write_formula_with_format(cell.row, cell.col, formula, &format)?;
            }
        }
    }

    for (col, width) in layout.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    workbook.save(path)?;
    Ok(())
}

fn write_value(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &Value,
    format: &Format,
) -> Result<(), ExportError> {
    match value {
        Value::Empty | Value::NullDate => {
            worksheet.write_blank(row, col, format)?;
        }
        Value::Bool(flag) => {
            worksheet.write_boolean_with_format(row, col, *flag, format)?;
        }
        Value::Int(number) => {
            worksheet.write_number_with_format(row, col, *number as f64, format)?;
        }
        Value::Float(number) => {
            worksheet.write_number_with_format(row, col, *number, format)?;
        }
        Value::Text(text) => {
            worksheet.write_string_with_format(row, col, text, format)?;
        }
        Value::DateTime(datetime) => {
            worksheet.write_number_with_format(row, col, datetime_serial(datetime), format)?;
        }
        Value::Time(time) => {
            worksheet.write_number_with_format(row, col, time_serial(time), format)?;
        }
    }
    Ok(())
}

/// Days since 1899-12-30, the epoch of the 1900 date system.
fn datetime_serial(datetime: &NaiveDateTime) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default();
    (*datetime - epoch).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY
}

/// Fraction of a day.
fn time_serial(time: &NaiveTime) -> f64 {
    (time.num_seconds_from_midnight() as f64 + time.nanosecond() as f64 / 1e9) / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serials() {
        let datetime = NaiveDate::from_ymd_opt(2024, 5, 1)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .unwrap();
        assert_eq!(datetime_serial(&datetime), 45413.5);

        let time = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
        assert_eq!(time_serial(&time), 0.25);
    }
}
