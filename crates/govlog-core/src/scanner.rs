//! Line scanning and event extraction.
//!
//! The [`Analyzer`] walks the document once, top to bottom. Each line is tried
//! against the event patterns in a fixed priority order and then, separately,
//! against the limit patterns. Lines that match nothing are skipped. The only
//! backwards-independent step is the bounded lookahead that resolves a query's
//! row count; it walks a clone of the line iterator, so nothing is consumed.

use std::str::Lines;

use tracing::{debug, trace};

use crate::config::AnalyzerConfig;
use crate::context::LoopContext;
use crate::error::{AnalyzeError, Result};
use crate::limits::LimitAggregator;
use crate::patterns::{
    parse_line_ref, CODE_UNIT_STARTED, DML_BEGIN, EXCEPTION_THROWN, FATAL_ERROR, SOQL_BEGIN,
    SOQL_END, USER_DEBUG,
};
use crate::report;
use crate::timing::ExecutionClock;
use crate::types::{
    AnalysisResult, DebugOutput, DmlOperation, ErrorEvent, LogDocument, SoqlQuery, Summary,
};

/// Analyzes debug logs. Holds only configuration; every run starts fresh.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Creates an analyzer with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an analyzer with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn with_config(config: AnalyzerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Runs the full pipeline over one document.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::EmptyDocument`] if the document is blank.
    /// Malformed or unknown lines never produce an error.
    pub fn analyze(&self, document: &LogDocument) -> Result<AnalysisResult> {
        if document.is_blank() {
            return Err(AnalyzeError::EmptyDocument);
        }

        let text = document.text();
        let mut scan = Scan::new(&self.config);
        let mut lines = text.lines();
        while let Some(line) = lines.next() {
            scan.lines_scanned += 1;
            scan.limits.observe(line);
            scan.extract(line, &lines);
        }

        let mut result = scan.into_result(text, &self.config);
        result.source = document.source().map(ToString::to_string);
        report::finish(&mut result, &self.config);

        debug!(
            bytes = document.len(),
            queries = result.summary.soql_queries,
            dml = result.summary.dml_operations,
            errors = result.summary.errors,
            limits = result.governor_limits.len(),
            truncated = result.is_truncated,
            "analysis complete"
        );
        Ok(result)
    }
}

/// Analyzes text with the default configuration.
///
/// # Errors
///
/// Returns [`AnalyzeError::EmptyDocument`] if the text is blank.
pub fn analyze(text: &str) -> Result<AnalysisResult> {
    Analyzer::new().analyze(&LogDocument::new(text))
}

/// State of one run.
struct Scan {
    lookahead_window: usize,
    context: LoopContext,
    clock: ExecutionClock,
    limits: LimitAggregator,
    debug_output: Vec<DebugOutput>,
    soql_queries: Vec<SoqlQuery>,
    dml_operations: Vec<DmlOperation>,
    errors: Vec<ErrorEvent>,
    code_units: Vec<String>,
    lines_scanned: usize,
    lookahead_misses: usize,
}

impl Scan {
    fn new(config: &AnalyzerConfig) -> Self {
        Self {
            lookahead_window: config.lookahead_window,
            context: LoopContext::new(),
            clock: ExecutionClock::new(),
            limits: LimitAggregator::new(),
            debug_output: Vec::new(),
            soql_queries: Vec::new(),
            dml_operations: Vec::new(),
            errors: Vec::new(),
            code_units: Vec::new(),
            lines_scanned: 0,
            lookahead_misses: 0,
        }
    }

    /// Tries each event pattern in priority order. Returns true if one matched.
    fn extract(&mut self, line: &str, rest: &Lines<'_>) -> bool {
        if let Some(caps) = USER_DEBUG.captures(line) {
            if let Some(line_no) = parse_line_ref(&caps[1]) {
                self.debug_output.push(DebugOutput {
                    line: line_no,
                    level: caps[2].to_string(),
                    message: caps[3].to_string(),
                });
            }
            return true;
        }

        if let Some(caps) = SOQL_BEGIN.captures(line) {
            let (Some(line_no), Ok(aggregations)) = (parse_line_ref(&caps[1]), caps[2].parse())
            else {
                return true;
            };
            let rows = self.lookahead_rows(line_no, rest).unwrap_or_else(|| {
                self.lookahead_misses += 1;
                trace!(line = line_no, "no query end marker within lookahead window");
                0
            });
            self.soql_queries.push(SoqlQuery {
                line: line_no,
                aggregations,
                query_text: caps[3].trim().to_string(),
                row_count: rows,
                in_loop: self.context.in_loop(),
            });
            return true;
        }

        if let Some(caps) = DML_BEGIN.captures(line) {
            if let (Some(line_no), Ok(rows)) = (parse_line_ref(&caps[1]), caps[4].parse()) {
                self.dml_operations.push(DmlOperation {
                    line: line_no,
                    operation: caps[2].to_string(),
                    entity_type: caps[3].to_string(),
                    row_count: rows,
                    in_loop: self.context.in_loop(),
                });
            }
            return true;
        }

        if let Some(caps) = CODE_UNIT_STARTED.captures(line) {
            let name = caps[1].rsplit('|').next().unwrap_or_default().trim();
            let is_line_ref = name.starts_with('[') && name.ends_with(']');
            if !name.is_empty() && !is_line_ref {
                self.code_units.push(name.to_string());
            }
            return true;
        }

        if let Some(caps) = FATAL_ERROR.captures(line) {
            self.errors.push(ErrorEvent::Fatal {
                message: caps[1].trim().to_string(),
            });
            return true;
        }

        if let Some(caps) = EXCEPTION_THROWN.captures(line) {
            if let Some(line_no) = parse_line_ref(&caps[1]) {
                self.errors.push(ErrorEvent::Exception {
                    line: line_no,
                    message: caps[2].trim().to_string(),
                });
            }
            return true;
        }

        self.context.observe(line) || self.clock.observe(line)
    }

    /// Finds the end marker for the query started at `line_no` within the
    /// window after the current line. The search stops at the next query start,
    /// so an unmatched query never takes another query's row count.
    fn lookahead_rows(&self, line_no: u32, rest: &Lines<'_>) -> Option<u64> {
        rest.clone()
            .take(self.lookahead_window)
            .take_while(|line| !SOQL_BEGIN.is_match(line))
            .find_map(|line| {
                let caps = SOQL_END.captures(line)?;
                if parse_line_ref(&caps[1]) != Some(line_no) {
                    return None;
                }
                caps[2].parse().ok()
            })
    }

    fn into_result(self, text: &str, config: &AnalyzerConfig) -> AnalysisResult {
        debug!(
            lines = self.lines_scanned,
            lookahead_misses = self.lookahead_misses,
            loop_depth = self.context.depth(),
            "scan finished"
        );
        AnalysisResult {
            source: None,
            governor_limits: self.limits.into_readings(),
            soql_queries: self.soql_queries,
            dml_operations: self.dml_operations,
            debug_output: self.debug_output,
            errors: self.errors,
            code_units: self.code_units,
            execution_time: self.clock.elapsed_ms(),
            is_truncated: report::is_truncated(text, &config.truncation_sentinel),
            warnings: Vec::new(),
            summary: Summary::default(),
        }
    }
}
