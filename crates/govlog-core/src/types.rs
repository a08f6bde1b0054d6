//! Core types for the log analyzer.
//!
//! This module provides:
//! - [`LogDocument`] - The raw trace text handed to the analyzer
//! - [`DebugOutput`], [`SoqlQuery`], [`DmlOperation`], [`ErrorEvent`] - Extracted events
//! - [`LimitReading`] - A governor limit with its usage
//! - [`AnalysisResult`] - The aggregate report of one run

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// The raw trace text plus optional display-only provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDocument {
    text: String,
    source: Option<String>,
}

impl LogDocument {
    /// Wraps the given text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: None,
        }
    }

    /// Attaches a provenance label (a path or log id). It is never parsed.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the full text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the provenance label, if any.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the length of the text in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the document has no content besides whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Returns true if the document has zero bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// A user-authored diagnostic print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugOutput {
    /// Source line of the statement that printed.
    pub line: u32,
    /// Level token as written (`DEBUG`, `INFO`, ...).
    pub level: String,
    /// Free-text message, verbatim.
    pub message: String,
}

/// A data-retrieval operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoqlQuery {
    /// Source line of the query start marker.
    pub line: u32,
    /// Number of aggregations reported on the start marker.
    pub aggregations: u32,
    /// Query text.
    pub query_text: String,
    /// Rows returned, or 0 if no end marker was found in the lookahead window.
    pub row_count: u64,
    /// Whether the loop heuristic was active when the query started.
    pub in_loop: bool,
}

/// A data-mutation operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmlOperation {
    /// Source line of the mutation marker.
    pub line: u32,
    /// Operation verb (`Insert`, `Update`, ...).
    pub operation: String,
    /// Entity type name.
    pub entity_type: String,
    /// Rows affected.
    pub row_count: u64,
    /// Whether the loop heuristic was active.
    pub in_loop: bool,
}

/// An unrecoverable or thrown error recorded in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ErrorEvent {
    /// The runtime aborted the transaction.
    Fatal {
        /// Error message.
        message: String,
    },
    /// An exception was thrown at a source line.
    Exception {
        /// Source line of the throw.
        line: u32,
        /// Exception message.
        message: String,
    },
}

impl ErrorEvent {
    /// Returns the message regardless of variant.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Fatal { message } | Self::Exception { message, .. } => message,
        }
    }

    /// Returns the short label used in listings.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Fatal { .. } => "FATAL",
            Self::Exception { .. } => "EXCEPTION",
        }
    }
}

/// Usage of a named governor limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitReading {
    /// Amount consumed.
    pub used: u64,
    /// Ceiling.
    pub max: u64,
    /// `round(100 * used / max)`, or 0 when `max` is 0.
    pub pct: u32,
}

impl LimitReading {
    /// Creates a reading and computes its percentage.
    ///
    /// `used` is not required to be at most `max`.
    #[must_use]
    pub fn new(used: u64, max: u64) -> Self {
        Self {
            used,
            max,
            pct: percentage(used, max),
        }
    }
}

/// Rounds `100 * used / max` half-up without floating point. A zero `max` yields 0.
fn percentage(used: u64, max: u64) -> u32 {
    if max == 0 {
        return 0;
    }
    let max = u128::from(max);
    let rounded = (u128::from(used) * 200 + max) / (2 * max);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Severity band of a limit reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitSeverity {
    /// Below the warning threshold.
    Ok,
    /// At or above the warning threshold, below critical.
    Warning,
    /// At or above the critical threshold.
    Critical,
}

impl LimitSeverity {
    /// Classifies a percentage against the two thresholds.
    #[must_use]
    pub const fn classify(pct: u32, warning_pct: u32, critical_pct: u32) -> Self {
        if pct >= critical_pct {
            Self::Critical
        } else if pct >= warning_pct {
            Self::Warning
        } else {
            Self::Ok
        }
    }

    /// Returns the tag printed next to a limit, if any.
    #[must_use]
    pub const fn tag(&self) -> Option<&'static str> {
        match self {
            Self::Ok => None,
            Self::Warning => Some("WARNING"),
            Self::Critical => Some("CRITICAL"),
        }
    }
}

/// Derived counts over one analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Total queries.
    pub soql_queries: usize,
    /// Total mutations.
    pub dml_operations: usize,
    /// Total debug lines.
    pub debug_lines: usize,
    /// Distinct code unit names.
    pub code_units: usize,
    /// Fatal errors plus thrown exceptions.
    pub errors: usize,
    /// Execution time, if both timing markers were present.
    pub execution_time_ms: Option<i64>,
}

/// The aggregate produced by one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Provenance label copied from the document.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<String>,
    /// Governor limits keyed by name.
    pub governor_limits: BTreeMap<String, LimitReading>,
    /// Queries in line order.
    pub soql_queries: Vec<SoqlQuery>,
    /// Mutations in line order.
    pub dml_operations: Vec<DmlOperation>,
    /// Debug prints in line order.
    pub debug_output: Vec<DebugOutput>,
    /// Fatal errors and exceptions in line order.
    pub errors: Vec<ErrorEvent>,
    /// Code unit names in order of appearance, duplicates included.
    pub code_units: Vec<String>,
    /// Execution time in milliseconds.
    pub execution_time: Option<i64>,
    /// Whether the runtime truncated the log.
    pub is_truncated: bool,
    /// Human-readable findings.
    pub warnings: Vec<String>,
    /// Derived counts.
    pub summary: Summary,
}

impl AnalysisResult {
    /// Returns true if any fatal error or exception was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns code unit names with duplicates removed, first appearance first.
    #[must_use]
    pub fn distinct_code_units(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.code_units
            .iter()
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Number of queries tagged as running inside a loop.
    #[must_use]
    pub fn queries_in_loop(&self) -> usize {
        self.soql_queries.iter().filter(|q| q.in_loop).count()
    }

    /// Number of mutations tagged as running inside a loop.
    #[must_use]
    pub fn dml_in_loop(&self) -> usize {
        self.dml_operations.iter().filter(|d| d.in_loop).count()
    }

    /// Serializes the result as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn document_accessors() {
        let doc = LogDocument::new("abc\n").with_source("trace.log");
        assert_eq!(doc.text(), "abc\n");
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.source(), Some("trace.log"));
        assert!(!doc.is_blank());
        assert!(!doc.is_empty());
    }

    #[test]
    fn blank_document() {
        assert!(LogDocument::new("").is_blank());
        assert!(LogDocument::new(" \r\n\t").is_blank());
        assert!(!LogDocument::new(" \r\n\t").is_empty());
    }

    #[test_case(95, 100, 95 ; "plain")]
    #[test_case(0, 0, 0 ; "zero max")]
    #[test_case(5, 0, 0 ; "usage with zero max")]
    #[test_case(1, 3, 33 ; "rounds down")]
    #[test_case(2, 3, 67 ; "rounds up")]
    #[test_case(1, 200, 1 ; "half rounds up")]
    #[test_case(150, 100, 150 ; "over the limit")]
    #[test_case(u64::MAX, 1, u32::MAX ; "saturates")]
    fn limit_percentage(used: u64, max: u64, pct: u32) {
        assert_eq!(LimitReading::new(used, max).pct, pct);
    }

    #[test_case(0, LimitSeverity::Ok ; "idle")]
    #[test_case(69, LimitSeverity::Ok ; "just below warning")]
    #[test_case(70, LimitSeverity::Warning ; "warning boundary")]
    #[test_case(89, LimitSeverity::Warning ; "just below critical")]
    #[test_case(90, LimitSeverity::Critical ; "critical boundary")]
    #[test_case(120, LimitSeverity::Critical ; "exceeded")]
    fn severity_bands(pct: u32, expected: LimitSeverity) {
        assert_eq!(LimitSeverity::classify(pct, 70, 90), expected);
    }

    #[test]
    fn severity_tags() {
        assert_eq!(LimitSeverity::Ok.tag(), None);
        assert_eq!(LimitSeverity::Warning.tag(), Some("WARNING"));
        assert_eq!(LimitSeverity::Critical.tag(), Some("CRITICAL"));
    }

    #[test]
    fn error_event_serializes_tagged() {
        let fatal = ErrorEvent::Fatal {
            message: "boom".to_string(),
        };
        let json = serde_json::to_value(&fatal).expect("serialize");
        assert_eq!(json, serde_json::json!({"type": "fatal", "message": "boom"}));

        let exc = ErrorEvent::Exception {
            line: 12,
            message: "npe".to_string(),
        };
        let json = serde_json::to_value(&exc).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"type": "exception", "line": 12, "message": "npe"})
        );
        assert_eq!(exc.message(), "npe");
        assert_eq!(exc.label(), "EXCEPTION");
        assert_eq!(fatal.label(), "FATAL");
    }

    #[test]
    fn dml_serializes_camel_case() {
        let dml = DmlOperation {
            line: 3,
            operation: "Insert".to_string(),
            entity_type: "Account".to_string(),
            row_count: 1,
            in_loop: true,
        };
        let json = serde_json::to_value(&dml).expect("serialize");
        assert_eq!(json["entityType"], "Account");
        assert_eq!(json["rowCount"], 1);
        assert_eq!(json["inLoop"], true);
    }

    fn empty_result() -> AnalysisResult {
        AnalysisResult {
            source: None,
            governor_limits: BTreeMap::new(),
            soql_queries: Vec::new(),
            dml_operations: Vec::new(),
            debug_output: Vec::new(),
            errors: Vec::new(),
            code_units: Vec::new(),
            execution_time: None,
            is_truncated: false,
            warnings: Vec::new(),
            summary: Summary::default(),
        }
    }

    #[test]
    fn distinct_code_units_keeps_first_order() {
        let mut result = empty_result();
        result.code_units = ["B", "A", "B", "C", "A"]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(result.distinct_code_units(), vec!["B", "A", "C"]);
    }

    #[test]
    fn result_json_uses_camel_case() {
        let result = empty_result();
        let json = result.to_json().expect("serialize");
        for key in [
            "governorLimits",
            "soqlQueries",
            "dmlOperations",
            "debugOutput",
            "codeUnits",
            "executionTime",
            "isTruncated",
        ] {
            assert!(json.contains(key), "missing {key}");
        }
        assert!(!json.contains("source"));
        assert!(!result.has_errors());
    }
}
