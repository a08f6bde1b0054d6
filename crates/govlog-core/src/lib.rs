//! # govlog-core
//!
//! Best-effort analyzer for runtime debug logs.
//!
//! Given one trace document, this crate extracts:
//!
//! - [`SoqlQuery`] and [`DmlOperation`] events, tagged when they appear to run inside a loop
//! - [`DebugOutput`] lines, code unit names, and [`ErrorEvent`]s
//! - Governor limit usage as [`LimitReading`]s keyed by an open set of names
//! - Execution time and truncation status
//!
//! and folds them into an [`AnalysisResult`] with a [`Summary`] and warnings.
//! Unknown or malformed lines are skipped, never reported as errors.
//!
//! ## Example
//!
//! ```rust
//! use govlog_core::{Analyzer, LogDocument};
//!
//! let text = "\
//! 12:00:00.0 (100)|SOQL_EXECUTE_BEGIN|[5]|Aggregations:0|SELECT Id FROM Account
//! 12:00:00.0 (200)|SOQL_EXECUTE_END|[5]|Rows:42
//!   Number of SOQL queries: 95 out of 100
//! ";
//!
//! let result = Analyzer::new().analyze(&LogDocument::new(text))?;
//! assert_eq!(result.soql_queries[0].row_count, 42);
//! assert_eq!(result.warnings, vec!["CRITICAL: SOQL queries at 95% (95/100)"]);
//! # Ok::<(), govlog_core::AnalyzeError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod context;
pub mod error;
pub mod limits;
pub mod patterns;
pub mod report;
pub mod scanner;
pub mod timing;
pub mod types;


pub use config::AnalyzerConfig;
pub use context::LoopContext;
pub use error::{AnalyzeError, Result};
pub use limits::{LimitAggregator, CPU_TIME_LIMIT, HEAP_SIZE_LIMIT};
pub use scanner::{analyze, Analyzer};
pub use timing::ExecutionClock;
pub use types::{
    AnalysisResult, DebugOutput, DmlOperation, ErrorEvent, LimitReading, LimitSeverity,
    LogDocument, SoqlQuery, Summary,
};
