//! Command-line argument parsing with clap.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use govlog_core::AnalyzerConfig;

use crate::error::CliError;

/// govlog - governor limits and hot spots from runtime debug logs.
#[derive(Parser, Debug, Clone)]
#[command(name = "govlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table, global = true)]
    pub format: Format,

    /// Log analyzer internals to stderr (same as RUST_LOG=debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// JSON file with analyzer settings. Flags below take precedence.
    #[arg(long, env = "GOVLOG_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Lines searched after a query start for its row count.
    #[arg(long, env = "GOVLOG_LOOKAHEAD", global = true)]
    pub lookahead: Option<usize>,

    /// Percentage at which a limit is reported as WARNING.
    #[arg(long, env = "GOVLOG_WARN_PCT", global = true)]
    pub warn_pct: Option<u32>,

    /// Percentage at which a limit is reported as CRITICAL.
    #[arg(long, env = "GOVLOG_CRITICAL_PCT", global = true)]
    pub critical_pct: Option<u32>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable report.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Full report: limits, queries, DML, debug output, errors, code units.
    Analyze(InputArgs),

    /// Governor limit usage only.
    Limits(InputArgs),
}

/// Input selection shared by all subcommands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Log file to read, or `-` for stdin.
    #[arg(required = true)]
    pub file: PathBuf,
}

impl Cli {
    /// Builds the analyzer configuration: defaults, then `--config`, then flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or the result is invalid.
    pub fn analyzer_config(&self) -> Result<AnalyzerConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path).map_err(|e| {
                    CliError::Usage(format!("cannot read config {}: {e}", path.display()))
                })?;
                AnalyzerConfig::from_json(&json)?
            }
            None => AnalyzerConfig::default(),
        };

        if let Some(lines) = self.lookahead {
            config = config.with_lookahead_window(lines);
        }
        if let Some(pct) = self.warn_pct {
            config = config.with_warning_pct(pct);
        }
        if let Some(pct) = self.critical_pct {
            config = config.with_critical_pct(pct);
        }

        config.validate()?;
        Ok(config)
    }
}
