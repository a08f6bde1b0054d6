//! # govlog-cli
//!
//! Command-line front end for [`govlog_core`].
//!
//! Provides commands for:
//! - Full debug log reports (`govlog analyze`)
//! - Governor limit usage (`govlog limits`)
//!
//! # Exit codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Analyzed; no fatal errors or exceptions in the log |
//! | 1 | Analyzed; the log recorded fatal errors or exceptions |
//! | 2 | Usage error; nothing was analyzed |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod loader;
pub mod output;

pub use cli::{Cli, Commands, Format, InputArgs};
pub use commands::Outcome;
pub use error::CliError;
pub use output::OutputFormat;
