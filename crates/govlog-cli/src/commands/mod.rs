//! CLI command implementations.
//!
//! Each submodule implements a specific CLI command:
//! - [`analyze`] - Full log report
//! - [`limits`] - Governor limit usage only

use std::process::ExitCode;

pub mod analyze;
pub mod limits;

pub use analyze::AnalyzeCommand;
pub use limits::LimitsCommand;

/// Process exit code when the log recorded fatal errors or exceptions.
pub const EXIT_ERRORS_FOUND: u8 = 1;

/// Process exit code for usage errors; nothing was analyzed.
pub const EXIT_USAGE: u8 = 2;

/// What a successful command run found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No fatal errors or exceptions in the log.
    Clean,
    /// The log recorded at least one fatal error or exception.
    ErrorsFound,
}

impl Outcome {
    /// Maps a result's error state to an outcome.
    #[must_use]
    pub const fn from_errors(has_errors: bool) -> Self {
        if has_errors {
            Self::ErrorsFound
        } else {
            Self::Clean
        }
    }

    /// Process exit code for this outcome.
    #[must_use]
    pub fn exit_code(self) -> ExitCode {
        match self {
            Self::Clean => ExitCode::SUCCESS,
            Self::ErrorsFound => ExitCode::from(EXIT_ERRORS_FOUND),
        }
    }
}
