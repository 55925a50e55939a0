//! # Payroll Report
//!
//! Turns the projected payroll records into the styled single-sheet workbook:
//! a merged title, a metadata row, bordered column labels, one numbered row per
//! record and a summed total row.
//!
//! [`layout`] decides what goes in every cell and [`writer`] renders that
//! decision with `rust_xlsxwriter`.
pub mod layout;
pub mod style;
pub mod writer;

use crate::pipeline::selector::PayrollRecord;
use chrono::NaiveDateTime;
use layout::ReportLayout;
use rust_xlsxwriter::XlsxError;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// Workbook could not be built or saved
    #[error("Failed to write report: {0}")]
    Xlsx(#[from] XlsxError),

    /// Output location could not be prepared
    #[error("Failed to prepare report location: {0}")]
    Io(#[from] std::io::Error),
}

/// Builds the report for `records` and saves it at `path`.
///
/// # Errors
///
/// Returns an error if the workbook cannot be built or written.
pub fn export(
    records: &[PayrollRecord],
    municipio_nome: &str,
    sheet_label: &str,
    generated_at: NaiveDateTime,
    path: &Path,
) -> Result<(), ExportError> {
    let layout = ReportLayout::build(records, municipio_nome, sheet_label, generated_at);
    writer::write(&layout, path)?;
    tracing::info!("Report exported to '{}'", path.display());
    Ok(())
}
