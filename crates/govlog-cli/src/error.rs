//! CLI error types.
//!
//! Every variant is a usage-level failure: nothing was analyzed. Errors found
//! *in* a log are not represented here.

use std::fmt;

use govlog_core::AnalyzeError;

/// CLI-specific errors.
#[derive(Debug)]
pub enum CliError {
    /// Bad input or arguments (empty document, unreadable config).
    Usage(String),
    /// Output formatting error.
    Format(String),
    /// The analyzer rejected its input or configuration.
    Analyze(AnalyzeError),
    /// IO error.
    Io(std::io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Usage(msg) => write!(f, "usage error: {msg}"),
            Self::Format(msg) => write!(f, "format error: {msg}"),
            Self::Analyze(e) => write!(f, "analysis error: {e}"),
            Self::Io(e) => write!(f, "IO error: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Analyze(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<AnalyzeError> for CliError {
    fn from(err: AnalyzeError) -> Self {
        match err {
            AnalyzeError::EmptyDocument => Self::Usage(err.to_string()),
            other => Self::Analyze(other),
        }
    }
}
