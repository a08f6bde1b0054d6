//! Report rendering for the `analyze` and `limits` commands.
//!
//! Every report serializes to JSON as-is; the table view is written by hand
//! through [`TableDisplay`].

use std::collections::BTreeMap;
use std::io::Write;

use govlog_core::{AnalysisResult, AnalyzerConfig, ErrorEvent, LimitReading, LimitSeverity};
use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Width of the usage bar in the limits table.
const BAR_WIDTH: u32 = 20;

/// Query text longer than this is cut in the table view.
const MAX_QUERY_LEN: usize = 100;

/// Renders reports in the format picked on the command line.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Creates a renderer for the given format.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Writes a report, pretty-printed JSON or table.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized or written.
    pub fn write<W, R>(&self, writer: &mut W, report: &R) -> Result<(), CliError>
    where
        W: Write,
        R: Serialize + TableDisplay,
    {
        match self.format {
            Format::Table => report.write_table(writer),
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, report)
                    .map_err(|e| CliError::Format(format!("cannot serialize report: {e}")))?;
                writeln!(writer)?;
                Ok(())
            }
        }
    }

    /// Renders a report into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be rendered.
    pub fn to_string<R>(&self, report: &R) -> Result<String, CliError>
    where
        R: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, report)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("report is not UTF-8: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Reports that have a human-readable table view.
pub trait TableDisplay {
    /// Writes the table view.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Warning and critical thresholds used to tag limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Lower bound of the warning band.
    pub warning_pct: u32,
    /// Lower bound of the critical band.
    pub critical_pct: u32,
}

impl Thresholds {
    /// Classifies a reading.
    #[must_use]
    pub const fn classify(&self, reading: &LimitReading) -> LimitSeverity {
        LimitSeverity::classify(reading.pct, self.warning_pct, self.critical_pct)
    }
}

impl From<&AnalyzerConfig> for Thresholds {
    fn from(config: &AnalyzerConfig) -> Self {
        Self {
            warning_pct: config.warning_pct,
            critical_pct: config.critical_pct,
        }
    }
}

/// Full analysis report. Serializes exactly as the underlying result.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport<'a> {
    #[serde(flatten)]
    result: &'a AnalysisResult,
    #[serde(skip)]
    thresholds: Thresholds,
}

impl<'a> AnalysisReport<'a> {
    /// Wraps a result for display.
    #[must_use]
    pub const fn new(result: &'a AnalysisResult, thresholds: Thresholds) -> Self {
        Self { result, thresholds }
    }
}

impl TableDisplay for AnalysisReport<'_> {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let result = self.result;

        match &result.source {
            Some(source) => writeln!(writer, "Debug Log Analysis: {source}")?,
            None => writeln!(writer, "Debug Log Analysis")?,
        }
        writeln!(writer, "══════════════════════════════════════════════════")?;
        writeln!(writer)?;

        write_limits_table(writer, &result.governor_limits, self.thresholds)?;
        writeln!(writer)?;

        writeln!(writer, "SOQL Queries ({})", result.soql_queries.len())?;
        for (i, q) in result.soql_queries.iter().enumerate() {
            writeln!(
                writer,
                "  {:>3}. [line {}] {} ({} rows){}",
                i + 1,
                q.line,
                truncate(&q.query_text, MAX_QUERY_LEN),
                q.row_count,
                loop_flag(q.in_loop)
            )?;
        }
        writeln!(writer)?;

        writeln!(writer, "DML Operations ({})", result.dml_operations.len())?;
        for (i, d) in result.dml_operations.iter().enumerate() {
            writeln!(
                writer,
                "  {:>3}. [line {}] {} {} ({} rows){}",
                i + 1,
                d.line,
                d.operation,
                d.entity_type,
                d.row_count,
                loop_flag(d.in_loop)
            )?;
        }
        writeln!(writer)?;

        writeln!(writer, "Debug Output ({})", result.debug_output.len())?;
        for line in &result.debug_output {
            writeln!(writer, "  [line {}] {}: {}", line.line, line.level, line.message)?;
        }
        writeln!(writer)?;

        writeln!(writer, "Errors ({})", result.errors.len())?;
        for err in &result.errors {
            match err {
                ErrorEvent::Fatal { .. } => write!(writer, "  {}", err.label())?,
                ErrorEvent::Exception { line, .. } => {
                    write!(writer, "  {} [line {line}]", err.label())?;
                }
            }
            writeln!(writer, ": {}", err.message())?;
        }
        writeln!(writer)?;

        let units = result.distinct_code_units();
        writeln!(writer, "Code Units ({})", units.len())?;
        for unit in units {
            writeln!(writer, "  - {unit}")?;
        }
        writeln!(writer)?;

        let summary = &result.summary;
        writeln!(writer, "Summary")?;
        writeln!(writer, "  SOQL Queries:     {}", summary.soql_queries)?;
        writeln!(writer, "  DML Operations:   {}", summary.dml_operations)?;
        writeln!(writer, "  Debug Lines:      {}", summary.debug_lines)?;
        writeln!(writer, "  Code Units:       {}", summary.code_units)?;
        writeln!(writer, "  Errors:           {}", summary.errors)?;
        match summary.execution_time_ms {
            Some(ms) => writeln!(writer, "  Execution Time:   {ms} ms")?,
            None => writeln!(writer, "  Execution Time:   unknown")?,
        }
        writeln!(writer, "  Truncated:        {}", yes_no(result.is_truncated))?;
        writeln!(writer)?;

        write_warnings(writer, &result.warnings)
    }
}

/// Governor limit view used by the `limits` command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsReport<'a> {
    /// Provenance of the log.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a str>,
    /// Limits keyed by name.
    pub governor_limits: &'a BTreeMap<String, LimitReading>,
    /// Whether the log was truncated.
    pub is_truncated: bool,
    /// Limit warnings only.
    pub warnings: Vec<String>,
    #[serde(skip)]
    thresholds: Thresholds,
}

impl<'a> LimitsReport<'a> {
    /// Builds the limits view of a result.
    #[must_use]
    pub fn new(result: &'a AnalysisResult, config: &AnalyzerConfig) -> Self {
        let warnings = result
            .governor_limits
            .iter()
            .filter_map(|(name, reading)| govlog_core::report::limit_warning(name, reading, config))
            .collect();
        Self {
            source: result.source.as_deref(),
            governor_limits: &result.governor_limits,
            is_truncated: result.is_truncated,
            warnings,
            thresholds: Thresholds::from(config),
        }
    }
}

impl TableDisplay for LimitsReport<'_> {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        write_limits_table(writer, self.governor_limits, self.thresholds)?;
        if self.is_truncated {
            writeln!(writer)?;
            writeln!(writer, "Note: log was truncated; limits may be missing")?;
        }
        writeln!(writer)?;
        write_warnings(writer, &self.warnings)
    }
}

fn write_limits_table<W: Write>(
    writer: &mut W,
    limits: &BTreeMap<String, LimitReading>,
    thresholds: Thresholds,
) -> Result<(), CliError> {
    writeln!(writer, "Governor Limits")?;
    if limits.is_empty() {
        writeln!(writer, "  No limit usage found")?;
        return Ok(());
    }

    writeln!(
        writer,
        "  {:<32}  {:>21}  {:>5}  {:<22}",
        "LIMIT", "USED/MAX", "PCT", "USAGE"
    )?;
    writeln!(writer, "  {}", "─".repeat(94))?;
    for (name, reading) in limits {
        let used_max = format!("{}/{}", reading.used, reading.max);
        let tag = thresholds.classify(reading).tag().unwrap_or("");
        writeln!(
            writer,
            "  {:<32}  {:>21}  {:>4}%  [{}]  {}",
            truncate(name, 32),
            used_max,
            reading.pct,
            usage_bar(reading.pct),
            tag
        )?;
    }
    Ok(())
}

fn write_warnings<W: Write>(writer: &mut W, warnings: &[String]) -> Result<(), CliError> {
    if warnings.is_empty() {
        writeln!(writer, "No warnings")?;
        return Ok(());
    }
    writeln!(writer, "Warnings ({})", warnings.len())?;
    for warning in warnings {
        writeln!(writer, "  ! {warning}")?;
    }
    Ok(())
}

/// Renders a fixed-width bar filled in proportion to `pct` (capped at 100).
fn usage_bar(pct: u32) -> String {
    let filled = (pct.min(100) * BAR_WIDTH + 50) / 100;
    let filled = filled as usize;
    let empty = BAR_WIDTH as usize - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

const fn loop_flag(in_loop: bool) -> &'static str {
    if in_loop { " [IN LOOP!]" } else { "" }
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// Truncate a string to a maximum number of characters.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max_len).collect()
    }
}
