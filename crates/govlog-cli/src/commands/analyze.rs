//! Analyze command implementation.
//!
//! Loads one log and prints the full report.

use std::io::Write;

use govlog_core::Analyzer;
use tracing::info;

use crate::cli::InputArgs;
use crate::commands::Outcome;
use crate::error::CliError;
use crate::loader::load_document;
use crate::output::{AnalysisReport, OutputFormat, Thresholds};

/// Handler for the analyze command.
pub struct AnalyzeCommand<'a> {
    analyzer: &'a Analyzer,
}

impl<'a> AnalyzeCommand<'a> {
    /// Creates a new analyze command handler.
    #[must_use]
    pub const fn new(analyzer: &'a Analyzer) -> Self {
        Self { analyzer }
    }

    /// Executes the analyze command.
    ///
    /// # Errors
    ///
    /// Returns error if the input cannot be loaded or output fails.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &InputArgs,
    ) -> Result<Outcome, CliError> {
        let document = load_document(&args.file)?;
        let result = self.analyzer.analyze(&document)?;
        info!(
            source = document.source().unwrap_or_default(),
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "log analyzed"
        );

        let report = AnalysisReport::new(&result, Thresholds::from(self.analyzer.config()));
        format.write(out, &report)?;

        Ok(Outcome::from_errors(result.has_errors()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use std::io::Write as _;

    fn input_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(text.as_bytes()).expect("write");
        file
    }

    #[test]
    fn clean_log_is_clean_outcome() {
        let file = input_file("t (1)|USER_DEBUG|[1]|DEBUG|ok\n");
        let analyzer = Analyzer::new();
        let args = InputArgs {
            file: file.path().to_path_buf(),
        };
        let mut out = Vec::new();
        let outcome = AnalyzeCommand::new(&analyzer)
            .execute(&mut out, &OutputFormat::default(), &args)
            .expect("execute");
        assert_eq!(outcome, Outcome::Clean);
        let text = String::from_utf8(out).expect("utf8");
        assert!(text.contains("[line 1] DEBUG: ok"));
    }

    #[test]
    fn errors_in_log_change_outcome() {
        let file = input_file("t (1)|FATAL_ERROR|System.LimitException: Too many SOQL queries: 101\n");
        let analyzer = Analyzer::new();
        let args = InputArgs {
            file: file.path().to_path_buf(),
        };
        let mut out = Vec::new();
        let outcome = AnalyzeCommand::new(&analyzer)
            .execute(&mut out, &OutputFormat::new(Format::Json), &args)
            .expect("execute");
        assert_eq!(outcome, Outcome::ErrorsFound);
        let parsed: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(parsed["errors"][0]["type"], "fatal");
    }

    #[test]
    fn empty_file_writes_nothing() {
        let file = input_file("");
        let analyzer = Analyzer::new();
        let args = InputArgs {
            file: file.path().to_path_buf(),
        };
        let mut out = Vec::new();
        let result = AnalyzeCommand::new(&analyzer).execute(&mut out, &OutputFormat::default(), &args);
        assert!(matches!(result, Err(CliError::Usage(_))));
        assert!(out.is_empty());
    }
}
