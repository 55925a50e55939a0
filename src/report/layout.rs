//! Cell-by-cell layout of the payroll report, built before anything touches disk.
//!
//! Rows and columns are 0-based here; row 0 is the title row of the sheet.
use crate::pipeline::selector::PayrollRecord;
use crate::report::style::{self, CellStyle};
use crate::spreadsheet::reference::range_reference;
use crate::spreadsheet::Value;
use chrono::NaiveDateTime;

/// Worksheet name of the report.
pub const SHEET_NAME: &str = "Relatório Líquido";

/// Column labels of the header row, A to D.
pub const HEADERS: [&str; 4] = ["Numeração", "Nome", "CPF", "Líquido"];

pub const TITLE_ROW: u32 = 0;
pub const METADATA_ROW: u32 = 1;
pub const HEADER_ROW: u32 = 2;
pub const FIRST_DATA_ROW: u32 = 3;

const NET_AMOUNT_COL: u16 = 3;
const TOTAL_LABEL_COL: u16 = 2;
const WIDTH_PADDING: usize = 2;

#[derive(Clone, Debug, PartialEq)]
pub enum CellContent {
    Text(String),
    /// Generated sequence number
    Integer(i64),
    /// Value carried over from the source table
    Value(Value),
    /// Formula with the result shown before the workbook is recalculated
    Formula { expression: String, result: f64 },
}

impl CellContent {
    /// Number of characters of the content as it is rendered in the sheet.
    fn rendered_len(&self) -> usize {
        match self {
            CellContent::Text(text) => text.chars().count(),
            CellContent::Integer(number) => number.to_string().len(),
            CellContent::Value(value) => value.rendered_len(),
            CellContent::Formula { expression, .. } => expression.chars().count(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportCell {
    pub row: u32,
    pub col: u16,
    pub content: CellContent,
    pub style: CellStyle,
}

/// A block of cells merged into one, showing `text`.
#[derive(Clone, Debug, PartialEq)]
pub struct MergedRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
    pub text: String,
    pub style: CellStyle,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReportLayout {
    pub sheet_name: &'static str,
    pub merged: Vec<MergedRange>,
    pub cells: Vec<ReportCell>,
    /// Width of each column starting at A
    pub column_widths: Vec<f64>,
}

impl ReportLayout {
    /// Lays out title, metadata, header, one row per record and the total row.
    pub fn build(
        records: &[PayrollRecord],
        municipio_nome: &str,
        sheet_label: &str,
        generated_at: NaiveDateTime,
    ) -> Self {
        let title = MergedRange {
            first_row: TITLE_ROW,
            first_col: 0,
            last_row: TITLE_ROW,
            last_col: 3,
            text: format!("Relatório de {municipio_nome}"),
            style: style::TITLE,
        };

        let mut cells = Vec::with_capacity(HEADERS.len() * (records.len() + 2) + 3);
        let mut put = |row: u32, col: u16, content: CellContent, style: CellStyle| {
            cells.push(ReportCell {
                row,
                col,
                content,
                style,
            })
        };

        let metadata = [
            format!("Secretaria: {sheet_label}"),
            format!("Nome da Página: {sheet_label}"),
            format!("Data e Hora: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        ];
        for (col, text) in metadata.into_iter().enumerate() {
            put(METADATA_ROW, col as u16, CellContent::Text(text), style::PLAIN);
        }

        for (col, label) in HEADERS.iter().enumerate() {
            put(
                HEADER_ROW,
                col as u16,
                CellContent::Text((*label).to_owned()),
                style::HEADER,
            );
        }

        let mut row = FIRST_DATA_ROW;
        for (index, record) in records.iter().enumerate() {
            put(row, 0, CellContent::Integer(index as i64 + 1), style::BODY);
            for (col, value) in [&record.name, &record.tax_id, &record.net_amount]
                .into_iter()
                .enumerate()
            {
                put(row, col as u16 + 1, CellContent::Value(value.clone()), body_style(value));
            }
            row += 1;
        }

        let total: f64 = records
            .iter()
            .filter_map(|record| record.net_amount.as_f64())
            .sum();
        let amounts = range_reference(
            (FIRST_DATA_ROW as usize, NET_AMOUNT_COL as usize),
            (row as usize - 1, NET_AMOUNT_COL as usize),
        );
        put(
            row,
            TOTAL_LABEL_COL,
            CellContent::Text("TOTAL".to_owned()),
            style::TOTAL_LABEL,
        );
        put(
            row,
            NET_AMOUNT_COL,
            CellContent::Formula {
                expression: format!("=SUM({amounts})"),
                result: total,
            },
            style::TOTAL_VALUE,
        );

        let column_widths = column_widths(&title, &cells);
        ReportLayout {
            sheet_name: SHEET_NAME,
            merged: vec![title],
            cells,
            column_widths,
        }
    }

    /// Returns the cell written at `row`, `col`.
    pub fn cell(&self, row: u32, col: u16) -> Option<&ReportCell> {
        self.cells
            .iter()
            .find(|cell| cell.row == row && cell.col == col)
    }

    /// Row holding the total formula.
    pub fn total_row(&self) -> u32 {
        self.cells.iter().map(|cell| cell.row).max().unwrap_or(HEADER_ROW)
    }
}

fn body_style(value: &Value) -> CellStyle {
    match value {
        Value::DateTime(_) => style::BODY_DATETIME,
        Value::Time(_) => style::BODY_TIME,
        _ => style::BODY,
    }
}

/// Widest rendered content of every column plus padding. The text of a merged
/// range counts towards its first column only.
fn column_widths(title: &MergedRange, cells: &[ReportCell]) -> Vec<f64> {
    let mut widths = vec![0usize; HEADERS.len()];
    let mut widen = |col: u16, len: usize| {
        let col = col as usize;
        if col >= widths.len() {
            widths.resize(col + 1, 0);
        }
        widths[col] = widths[col].max(len);
    };

    widen(title.first_col, title.text.chars().count());
    for cell in cells {
        widen(cell.col, cell.content.rendered_len());
    }
    widths
        .into_iter()
        .map(|width| (width + WIDTH_PADDING) as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn generated_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 31)
            .and_then(|date| date.and_hms_opt(14, 5, 9))
            .unwrap()
    }

    fn record(name: &str, tax_id: &str, net_amount: f64) -> PayrollRecord {
        PayrollRecord {
            name: Value::Text(name.to_owned()),
            tax_id: Value::Text(tax_id.to_owned()),
            net_amount: Value::Float(net_amount),
        }
    }

    fn records() -> Vec<PayrollRecord> {
        vec![
            record("ANA", "111.111.111-11", 1500.0),
            record("RUI", "222.222.222-22", 980.5),
            record("BIA", "333.333.333-33", 0.0),
            record("LIA", "444.444.444-44", 700.25),
        ]
    }

    fn text(layout: &ReportLayout, row: u32, col: u16) -> Option<String> {
        match layout.cell(row, col).map(|cell| &cell.content) {
            Some(CellContent::Text(text)) => Some(text.clone()),
            _ => None,
        }
    }

    #[test]
    fn test_title_and_metadata() {
        let layout = ReportLayout::build(&records(), "Maceió", "Geral", generated_at());

        assert_eq!(layout.sheet_name, "Relatório Líquido");
        assert_eq!(
            layout.merged,
            vec![MergedRange {
                first_row: 0,
                first_col: 0,
                last_row: 0,
                last_col: 3,
                text: "Relatório de Maceió".to_owned(),
                style: style::TITLE,
            }]
        );
        assert_eq!(text(&layout, 1, 0).as_deref(), Some("Secretaria: Geral"));
        assert_eq!(text(&layout, 1, 1).as_deref(), Some("Nome da Página: Geral"));
        assert_eq!(
            text(&layout, 1, 2).as_deref(),
            Some("Data e Hora: 2024-05-31 14:05:09")
        );
    }

    #[test]
    fn test_header_row() {
        let layout = ReportLayout::build(&records(), "Maceió", "Geral", generated_at());

        for (col, label) in HEADERS.iter().enumerate() {
            let cell = layout.cell(HEADER_ROW, col as u16).unwrap();
            assert_eq!(cell.content, CellContent::Text((*label).to_owned()));
            assert_eq!(cell.style, style::HEADER);
        }
    }

    #[test]
    fn test_numbering_is_contiguous() {
        let layout = ReportLayout::build(&records(), "Maceió", "Geral", generated_at());

        let numbers: Vec<CellContent> = (0..4)
            .map(|offset| layout.cell(FIRST_DATA_ROW + offset, 0).unwrap().content.clone())
            .collect();
        assert_eq!(
            numbers,
            (1..=4).map(CellContent::Integer).collect::<Vec<_>>()
        );
        assert!(layout
            .cells
            .iter()
            .filter(|cell| (FIRST_DATA_ROW..FIRST_DATA_ROW + 4).contains(&cell.row))
            .all(|cell| cell.style == style::BODY));
    }

    #[test]
    fn test_total_row() {
        let layout = ReportLayout::build(&records(), "Maceió", "Geral", generated_at());

        assert_eq!(layout.total_row(), 7);
        let label = layout.cell(7, 2).unwrap();
        assert_eq!(label.content, CellContent::Text("TOTAL".to_owned()));
        assert_eq!(label.style, style::TOTAL_LABEL);

        let total = layout.cell(7, 3).unwrap();
        assert_eq!(
            total.content,
            CellContent::Formula {
                expression: "=SUM(D4:D7)".to_owned(),
                result: 3180.75,
            }
        );
        assert_eq!(total.style, style::TOTAL_VALUE);
        assert!(layout.cell(7, 0).is_none());
    }

    #[test]
    fn test_column_widths_fit_contents() {
        let layout = ReportLayout::build(&records(), "Maceió", "Geral", generated_at());

        // "Relatório de Maceió", "Nome da Página: Geral",
        // "Data e Hora: 2024-05-31 14:05:09", "=SUM(D4:D7)"
        assert_eq!(layout.column_widths, vec![21.0, 23.0, 34.0, 13.0]);
    }

    #[test]
    fn test_datetime_values_get_number_formats() {
        let datetime = generated_at();
        let records = vec![PayrollRecord {
            name: Value::Text("ANA".to_owned()),
            tax_id: Value::DateTime(datetime),
            net_amount: Value::Time(datetime.time()),
        }];
        let layout = ReportLayout::build(&records, "Maceió", "Geral", generated_at());

        assert_eq!(layout.cell(3, 2).unwrap().style, style::BODY_DATETIME);
        assert_eq!(layout.cell(3, 3).unwrap().style, style::BODY_TIME);
        assert_eq!(
            layout.cell(4, 3).unwrap().content,
            CellContent::Formula {
                expression: "=SUM(D4:D4)".to_owned(),
                result: 0.0,
            }
        );
    }
}
