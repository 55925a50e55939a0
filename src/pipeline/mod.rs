//! # Report Pipeline
//!
//! One run walks the stages strictly in order:
//! `Unloaded → Loaded → Cleaned → Projected → Exported`.
//!
//! Each stage consumes the output of the previous one. Calling a stage out of
//! order fails with [`PayrollError::PreconditionViolation`] and leaves the
//! processor unchanged.
pub mod cleaner;
pub mod loader;
pub mod selector;

use crate::config::Config;
use crate::error::PayrollError;
use crate::report;
use crate::spreadsheet::Table;
use chrono::{Local, NaiveDateTime};
use selector::PayrollRecord;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Stage {
    #[default]
    Unloaded,
    Loaded(Table),
    Cleaned(Table),
    Projected(Vec<PayrollRecord>),
    Exported(PathBuf),
}

impl Stage {
    pub const fn name(&self) -> &'static str {
        match self {
            Stage::Unloaded => "unloaded",
            Stage::Loaded(_) => "loaded",
            Stage::Cleaned(_) => "cleaned",
            Stage::Projected(_) => "projected",
            Stage::Exported(_) => "exported",
        }
    }
}

/// How a completed run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// Report written at this path
    Exported(PathBuf),
    /// Every stage before export succeeded; export failed and was reported
    ExportFailed(report::ExportError),
}

#[derive(Debug)]
pub struct ReportProcessor {
    config: Config,
    stage: Stage,
}

impl ReportProcessor {
    pub fn new(config: Config) -> Self {
        ReportProcessor {
            config,
            stage: Stage::Unloaded,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_name(&self) -> &'static str {
        self.stage.name()
    }

    /// Table of the loaded or cleaned stage.
    pub fn table(&self) -> Option<&Table> {
        match &self.stage {
            Stage::Loaded(table) | Stage::Cleaned(table) => Some(table),
            _ => None,
        }
    }

    /// Records of the projected stage.
    pub fn records(&self) -> Option<&[PayrollRecord]> {
        match &self.stage {
            Stage::Projected(records) => Some(records),
            _ => None,
        }
    }

    fn precondition(&self, operation: &'static str) -> PayrollError {
        PayrollError::PreconditionViolation {
            operation,
            stage: self.stage.name(),
        }
    }

    /// Reads the configured sheet.
    pub fn load(&mut self) -> Result<&Table, PayrollError> {
        if self.stage != Stage::Unloaded {
            return Err(self.precondition("load"));
        }
        let table = loader::load(
            self.config.input_path(),
            &self.config.sheet_name,
            self.config.header_row,
        )?;
        self.stage = Stage::Loaded(table);
        self.table().ok_or_else(|| self.precondition("load"))
    }

    pub fn clean(&mut self) -> Result<&Table, PayrollError> {
        let Stage::Loaded(table) = &self.stage else {
            return Err(self.precondition("clean"));
        };
        let cleaned = cleaner::clean(table)?;
        self.stage = Stage::Cleaned(cleaned);
        self.table().ok_or_else(|| self.precondition("clean"))
    }

    pub fn select(&mut self) -> Result<&[PayrollRecord], PayrollError> {
        let Stage::Cleaned(table) = &self.stage else {
            return Err(self.precondition("select"));
        };
        let records = selector::select(table)?;
        self.stage = Stage::Projected(records);
        self.records().ok_or_else(|| self.precondition("select"))
    }

    /// Writes the report stamped with the current local time.
    pub fn export(&mut self) -> Result<&Path, PayrollError> {
        self.export_at(Local::now().naive_local())
    }

    /// Writes the report stamped with `generated_at`.
    ///
    /// On failure the processor stays in the projected stage.
    pub fn export_at(&mut self, generated_at: NaiveDateTime) -> Result<&Path, PayrollError> {
        let Stage::Projected(records) = &self.stage else {
            return Err(self.precondition("export"));
        };
        let path = self.config.output_path();
        report::export(
            records,
            &self.config.municipio_nome,
            &self.config.sheet_name,
            generated_at,
            &path,
        )?;
        self.stage = Stage::Exported(path);
        match &self.stage {
            Stage::Exported(path) => Ok(path),
            _ => Err(self.precondition("export")),
        }
    }

    /// Runs every stage in order.
    ///
    /// Load, clean and select failures are returned as errors. An export
    /// failure is logged and reported through [`RunOutcome::ExportFailed`].
    pub fn run(&mut self) -> Result<RunOutcome, PayrollError> {
        self.load()?;
        self.clean()?;
        self.select()?;
        match self.export() {
            Ok(path) => Ok(RunOutcome::Exported(path.to_path_buf())),
            Err(PayrollError::ExportError(error)) => {
                tracing::error!("Error exporting report: {error}");
                Ok(RunOutcome::ExportFailed(error))
            }
            Err(error) => Err(error),
        }
    }
}
