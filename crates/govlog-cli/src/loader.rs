//! Reads a log document from a file or stdin.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use govlog_core::LogDocument;
use tracing::debug;

use crate::error::CliError;

/// Path value that selects stdin.
pub const STDIN_PATH: &str = "-";

/// Loads the document at `path`, or stdin when the path is `-`.
///
/// # Errors
///
/// Returns a usage error if the file cannot be opened or is blank.
pub fn load_document(path: &Path) -> Result<LogDocument, CliError> {
    if path.as_os_str() == STDIN_PATH {
        return read_document(io::stdin().lock(), "<stdin>");
    }
    let file = File::open(path)
        .map_err(|e| CliError::Usage(format!("cannot open {}: {e}", path.display())))?;
    read_document(file, &path.display().to_string())
}

/// Reads a whole document from `reader`. Invalid UTF-8 is replaced, not rejected.
///
/// # Errors
///
/// Returns an IO error if reading fails, or a usage error if the input is blank.
pub fn read_document<R: Read>(mut reader: R, source: &str) -> Result<LogDocument, CliError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = String::from_utf8_lossy(&bytes).into_owned();

    let document = LogDocument::new(text).with_source(source);
    if document.is_blank() {
        return Err(CliError::Usage(format!("input is empty: {source}")));
    }
    debug!(source, bytes = document.len(), "loaded log document");
    Ok(document)
}
