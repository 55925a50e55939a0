use payroll_report::config::Config;
use payroll_report::error::PayrollError;
use payroll_report::logging;
use payroll_report::pipeline::{ReportProcessor, RunOutcome};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(error) = logging::init() {
        eprintln!("{error:#}");
        return ExitCode::FAILURE;
    }

    let config = Config::default();
    if let Err(error) = config.validate() {
        return halt(error.into());
    }

    match ReportProcessor::new(config).run() {
        Ok(RunOutcome::Exported(_)) | Ok(RunOutcome::ExportFailed(_)) => ExitCode::SUCCESS,
        Err(error) if !error.is_fatal() => {
            tracing::error!("{error}");
            ExitCode::SUCCESS
        }
        Err(error) => halt(error),
    }
}

fn halt(error: PayrollError) -> ExitCode {
    tracing::error!("{error}");
    ExitCode::FAILURE
}
