//! Analyzer configuration.

use serde::{Deserialize, Serialize};

use crate::error::{AnalyzeError, Result};

/// Number of raw lines searched for a query's completion marker.
pub const DEFAULT_LOOKAHEAD_WINDOW: usize = 20;

/// Usage percentage at which a limit is reported as a warning.
pub const DEFAULT_WARNING_PCT: u32 = 70;

/// Usage percentage at which a limit is reported as critical.
pub const DEFAULT_CRITICAL_PCT: u32 = 90;

/// Substring the runtime writes when it cut the log at its own size cap.
pub const DEFAULT_TRUNCATION_SENTINEL: &str = "MAXIMUM DEBUG LOG SIZE REACHED";

/// Tunables for a single analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Lines scanned after a query start marker looking for its row count.
    pub lookahead_window: usize,
    /// Lower bound (inclusive) of the warning band.
    pub warning_pct: u32,
    /// Lower bound (inclusive) of the critical band.
    pub critical_pct: u32,
    /// Substring marking a truncated document.
    pub truncation_sentinel: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            lookahead_window: DEFAULT_LOOKAHEAD_WINDOW,
            warning_pct: DEFAULT_WARNING_PCT,
            critical_pct: DEFAULT_CRITICAL_PCT,
            truncation_sentinel: DEFAULT_TRUNCATION_SENTINEL.to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails validation.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the lookahead window.
    #[must_use]
    pub const fn with_lookahead_window(mut self, lines: usize) -> Self {
        self.lookahead_window = lines;
        self
    }

    /// Sets the warning threshold.
    #[must_use]
    pub const fn with_warning_pct(mut self, pct: u32) -> Self {
        self.warning_pct = pct;
        self
    }

    /// Sets the critical threshold.
    #[must_use]
    pub const fn with_critical_pct(mut self, pct: u32) -> Self {
        self.critical_pct = pct;
        self
    }

    /// Sets the truncation sentinel.
    #[must_use]
    pub fn with_truncation_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.truncation_sentinel = sentinel.into();
        self
    }

    /// Checks that the thresholds and window are usable.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzeError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.lookahead_window == 0 {
            return Err(AnalyzeError::InvalidConfig(
                "lookahead_window must be at least 1".to_string(),
            ));
        }
        if self.critical_pct > 100 {
            return Err(AnalyzeError::InvalidConfig(format!(
                "critical_pct must be at most 100, got {}",
                self.critical_pct
            )));
        }
        if self.warning_pct > self.critical_pct {
            return Err(AnalyzeError::InvalidConfig(format!(
                "warning_pct ({}) must not exceed critical_pct ({})",
                self.warning_pct, self.critical_pct
            )));
        }
        if self.truncation_sentinel.is_empty() {
            return Err(AnalyzeError::InvalidConfig(
                "truncation_sentinel must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.lookahead_window, 20);
        assert_eq!(config.warning_pct, 70);
        assert_eq!(config.critical_pct, 90);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builders_override_fields() {
        let config = AnalyzerConfig::new()
            .with_lookahead_window(5)
            .with_warning_pct(50)
            .with_critical_pct(80)
            .with_truncation_sentinel("CUT");
        assert_eq!(config.lookahead_window, 5);
        assert_eq!(config.warning_pct, 50);
        assert_eq!(config.critical_pct, 80);
        assert_eq!(config.truncation_sentinel, "CUT");
    }

    #[test]
    fn zero_window_rejected() {
        let config = AnalyzerConfig::new().with_lookahead_window(0);
        assert!(matches!(config.validate(), Err(AnalyzeError::InvalidConfig(_))));
    }

    #[test]
    fn inverted_thresholds_rejected() {
        let config = AnalyzerConfig::new().with_warning_pct(95);
        let err = config.validate().expect_err("warning above critical");
        assert!(err.to_string().contains("warning_pct (95)"));
    }

    #[test]
    fn critical_above_hundred_rejected() {
        let config = AnalyzerConfig::new().with_critical_pct(101);
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_sentinel_rejected() {
        let config = AnalyzerConfig::new().with_truncation_sentinel("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn from_json_fills_missing_fields() {
        let config = AnalyzerConfig::from_json(r#"{"lookahead_window": 40}"#).expect("parse");
        assert_eq!(config.lookahead_window, 40);
        assert_eq!(config.critical_pct, DEFAULT_CRITICAL_PCT);
        assert_eq!(config.truncation_sentinel, DEFAULT_TRUNCATION_SENTINEL);
    }

    #[test]
    fn from_json_validates() {
        assert!(AnalyzerConfig::from_json(r#"{"warning_pct": 99}"#).is_err());
        assert!(AnalyzerConfig::from_json("{").is_err());
    }
}
