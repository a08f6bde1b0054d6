//! Error types for the analyzer.
//!
//! Content found in a log (fatal errors, thrown exceptions) is never an
//! error of the analyzer; it is reported as data in the result.

use thiserror::Error;

/// Errors that can occur before analysis runs.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The document was empty or contained only whitespace.
    #[error("log document is empty")]
    EmptyDocument,

    /// The analyzer configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for analyzer operations.
pub type Result<T> = std::result::Result<T, AnalyzeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = AnalyzeError::EmptyDocument;
        assert_eq!(err.to_string(), "log document is empty");

        let err = AnalyzeError::InvalidConfig("lookahead_window must be at least 1".to_string());
        assert_eq!(
            err.to_string(),
            "invalid configuration: lookahead_window must be at least 1"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalyzeError>();
    }

    #[test]
    fn error_from_serde() {
        let json_err = serde_json::from_str::<u32>("not json").expect_err("must fail");
        let err: AnalyzeError = json_err.into();
        assert!(err.to_string().starts_with("serialization error"));
    }
}
