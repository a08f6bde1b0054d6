//! Limits command implementation.

use std::io::Write;

use govlog_core::Analyzer;

use crate::cli::InputArgs;
use crate::commands::Outcome;
use crate::error::CliError;
use crate::loader::load_document;
use crate::output::{LimitsReport, OutputFormat};

/// Handler for the limits command.
pub struct LimitsCommand<'a> {
    analyzer: &'a Analyzer,
}

impl<'a> LimitsCommand<'a> {
    /// Creates a new limits command handler.
    #[must_use]
    pub const fn new(analyzer: &'a Analyzer) -> Self {
        Self { analyzer }
    }

    /// Executes the limits command. The exit outcome still reflects errors in the log.
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

        let report = LimitsReport::new(&result, self.analyzer.config());
        format.write(out, &report)?;

        Ok(Outcome::from_errors(result.has_errors()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Format;
    use std::io::Write as _;

    #[test]
    fn limits_json() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        writeln!(file, "  Number of SOQL queries: 95 out of 100").expect("write");
        writeln!(file, "  Maximum heap size: 10 out of 0").expect("write");

        let analyzer = Analyzer::new();
        let args = InputArgs {
            file: file.path().to_path_buf(),
        };
        let mut out = Vec::new();
        let outcome = LimitsCommand::new(&analyzer)
            .execute(&mut out, &OutputFormat::new(Format::Json), &args)
            .expect("execute");

        assert_eq!(outcome, Outcome::Clean);
        let parsed: serde_json::Value = serde_json::from_slice(&out).expect("json");
        assert_eq!(parsed["governorLimits"]["SOQL queries"]["used"], 95);
        assert_eq!(parsed["governorLimits"]["Heap size (bytes)"]["pct"], 0);
        assert_eq!(parsed["warnings"][0], "CRITICAL: SOQL queries at 95% (95/100)");
        assert!(parsed.get("soqlQueries").is_none());
    }
}
