use crate::config::ConfigError;
use crate::pipeline::cleaner::CleanError;
use crate::pipeline::loader::LoadError;
use crate::pipeline::selector::SelectError;
use crate::report::ExportError;
use thiserror::Error;

/// Main error type of the payroll report pipeline.
/// Aggregates the errors of every stage.
#[derive(Error, Debug)]
pub enum PayrollError {
    #[error("{0}")]
    ConfigError(#[from] ConfigError),

    #[error("{0}")]
    LoadError(#[from] LoadError),

    #[error("{0}")]
    CleanError(#[from] CleanError),

    #[error("{0}")]
    SelectError(#[from] SelectError),

    #[error("{0}")]
    ExportError(#[from] ExportError),

    /// A stage was invoked before its predecessor completed
    #[error("Cannot {operation}: pipeline is {stage}")]
    PreconditionViolation {
        operation: &'static str,
        stage: &'static str,
    },
}

impl PayrollError {
    /// Returns true if the run must halt. Export failures are reported and the run ends normally.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, PayrollError::ExportError(_))
    }
}
