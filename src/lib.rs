//! # Payroll Report
//!
//! Reads a payroll export from a spreadsheet, cleans it and writes a styled
//! net-pay summary workbook.
//!
//! ## Pipeline
//!
//! - **Load**: read one sheet with `calamine`, taking column names from the
//!   second physical row and inferring one type per column
//! - **Clean**: normalize column names, fill missing cells by column type and
//!   drop duplicate rows
//! - **Select**: project every row onto `NOME`, `CPF` and `LIQUIDO`
//! - **Export**: write the report with `rust_xlsxwriter`
//!
//! [`pipeline::ReportProcessor`] drives the stages from a [`config::Config`].
//! Load, clean and select errors stop the run; an export error is reported and
//! the run still ends normally.
//!
//! ```no_run
//! use payroll_report::config::Config;
//! use payroll_report::pipeline::{ReportProcessor, RunOutcome};
//!
//! let config = Config::new("folha.xlsx", "Geral", "Maceió");
//! let mut processor = ReportProcessor::new(config);
//! if let Ok(RunOutcome::Exported(path)) = processor.run() {
//!     println!("{}", path.display());
//! }
//! ```
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod spreadsheet;
