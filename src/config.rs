//! # Run Configuration
//!
//! Every input of a run is held in one [`Config`] record handed to the
//! pipeline. The defaults reproduce the values the report was first produced with.
use regex::Regex;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Physical row (0-based) holding the column names; the first row carries a banner.
pub const DEFAULT_HEADER_ROW: usize = 1;

/// Excel limits sheet names to 31 characters.
const MAX_SHEET_NAME_LEN: usize = 31;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: &'static str, message: String },
}

/// Inputs of one pipeline run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Source spreadsheet
    pub input_file: PathBuf,
    /// Sheet to read; also labels the report and names the derived output file
    pub sheet_name: String,
    /// Municipality shown in the report title
    pub municipio_nome: String,
    /// Explicit report path. When absent the path is derived from the sheet name.
    pub output_file: Option<PathBuf>,
    /// Physical row (0-based) holding the column names
    pub header_row: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            input_file: PathBuf::from("FATURAMENTO - SAO MIGUEL DOS CAMPOS - 05 2024.xlsx"),
            sheet_name: "Geral".to_owned(),
            municipio_nome: "NomeDoMunicipio".to_owned(),
            output_file: None,
            header_row: DEFAULT_HEADER_ROW,
        }
    }
}

impl Config {
    pub fn new(
        input_file: impl Into<PathBuf>,
        sheet_name: impl Into<String>,
        municipio_nome: impl Into<String>,
    ) -> Self {
        Config {
            input_file: input_file.into(),
            sheet_name: sheet_name.into(),
            municipio_nome: municipio_nome.into(),
            ..Config::default()
        }
    }

    /// Sets an explicit report path, overriding the derived one.
    pub fn with_output_file(mut self, output_file: impl Into<PathBuf>) -> Self {
        self.output_file = Some(output_file.into());
        self
    }

    pub fn with_header_row(mut self, header_row: usize) -> Self {
        self.header_row = header_row;
        self
    }

    /// Report file name derived from the sheet name: `relatorio_<sheet>.xlsx`.
    pub fn derived_output_file(&self) -> PathBuf {
        PathBuf::from(format!("relatorio_{}.xlsx", self.sheet_name))
    }

    /// Path the report is written to.
    pub fn output_path(&self) -> PathBuf {
        self.output_file
            .clone()
            .unwrap_or_else(|| self.derived_output_file())
    }

    pub fn input_path(&self) -> &Path {
        &self.input_file
    }

    /// Checks that the sheet name is usable both as a sheet name and inside a file name.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pattern = Regex::new(r#"[\\/:*?"<>|\[\]]"#).expect("Hardcode regex pattern");
        let invalid = |message: String| ConfigError::InvalidParameter {
            name: "sheet_name",
            message,
        };
        if self.sheet_name.trim().is_empty() {
            Err(invalid("must not be empty".to_owned()))
        } else if self.sheet_name.chars().count() > MAX_SHEET_NAME_LEN {
            Err(invalid(format!(
                "'{}' is longer than {MAX_SHEET_NAME_LEN} characters",
                self.sheet_name
            )))
        } else if let Some(found) = pattern.find(&self.sheet_name) {
            Err(invalid(format!(
                "'{}' contains the forbidden character '{}'",
                self.sheet_name,
                found.as_str()
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sheet_name, "Geral");
        assert_eq!(config.header_row, 1);
        assert_eq!(config.output_path(), PathBuf::from("relatorio_Geral.xlsx"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_output() {
        let config = Config::new("in.xlsx", "Saude", "Maceio").with_output_file("out/report.xlsx");
        assert_eq!(config.output_path(), PathBuf::from("out/report.xlsx"));
        assert_eq!(config.derived_output_file(), PathBuf::from("relatorio_Saude.xlsx"));
    }

    #[test]
    fn test_invalid_sheet_names() {
        for name in ["", "   ", "Saude/Educacao", "A:B", "[Geral]", "a-very-long-sheet-name-over-31-chars"] {
            let config = Config::new("in.xlsx", name, "Maceio");
            let error = config.validate().unwrap_err();
            assert!(error.to_string().starts_with("Invalid parameter 'sheet_name'"));
        }
    }

    #[test]
    fn test_accented_sheet_names() {
        assert!(Config::new("in.xlsx", "Educação", "Maceió").validate().is_ok());
    }
}
