//! Report building: summary counts, truncation, and warnings.

use std::collections::BTreeMap;

use crate::config::AnalyzerConfig;
use crate::types::{AnalysisResult, LimitReading, LimitSeverity, Summary};

/// Returns true if the sentinel appears anywhere in the text.
#[must_use]
pub fn is_truncated(text: &str, sentinel: &str) -> bool {
    !sentinel.is_empty() && text.contains(sentinel)
}

/// Formats the warning line for a limit, if it is in a warning band.
#[must_use]
pub fn limit_warning(name: &str, reading: &LimitReading, config: &AnalyzerConfig) -> Option<String> {
    let severity = LimitSeverity::classify(reading.pct, config.warning_pct, config.critical_pct);
    severity.tag().map(|tag| {
        format!(
            "{tag}: {name} at {}% ({}/{})",
            reading.pct, reading.used, reading.max
        )
    })
}

/// Derives the summary block.
#[must_use]
pub fn summarize(result: &AnalysisResult) -> Summary {
    Summary {
        soql_queries: result.soql_queries.len(),
        dml_operations: result.dml_operations.len(),
        debug_lines: result.debug_output.len(),
        code_units: result.distinct_code_units().len(),
        errors: result.errors.len(),
        execution_time_ms: result.execution_time,
    }
}

/// Builds the warning list in a fixed order: limits by name, loop findings,
/// truncation, errors.
#[must_use]
pub fn build_warnings(result: &AnalysisResult, config: &AnalyzerConfig) -> Vec<String> {
    let mut warnings = limit_warnings(&result.governor_limits, config);

    let queries_in_loop = result.queries_in_loop();
    if queries_in_loop > 0 {
        let noun = if queries_in_loop == 1 { "query" } else { "queries" };
        warnings.push(format!(
            "{queries_in_loop} SOQL {noun} executed inside a loop"
        ));
    }

    let dml_in_loop = result.dml_in_loop();
    if dml_in_loop > 0 {
        let noun = if dml_in_loop == 1 { "operation" } else { "operations" };
        warnings.push(format!("{dml_in_loop} DML {noun} executed inside a loop"));
    }

    if result.is_truncated {
        warnings.push("Log was truncated; results may be incomplete".to_string());
    }

    let errors = result.errors.len();
    if errors > 0 {
        let noun = if errors == 1 { "error" } else { "errors" };
        warnings.push(format!(
            "{errors} {noun} recorded (fatal errors and thrown exceptions)"
        ));
    }

    warnings
}

fn limit_warnings(limits: &BTreeMap<String, LimitReading>, config: &AnalyzerConfig) -> Vec<String> {
    limits
        .iter()
        .filter_map(|(name, reading)| limit_warning(name, reading, config))
        .collect()
}

/// Fills in the derived fields of a result.
pub fn finish(result: &mut AnalysisResult, config: &AnalyzerConfig) {
    result.summary = summarize(result);
    result.warnings = build_warnings(result, config);
}
