//! Loop-context heuristic.
//!
//! [`LoopContext`] keeps an unscoped depth counter. A loop statement bumps it,
//! an iteration begin forces it to at least one, an iteration end lowers it.
//! Nothing ever pops the statement increments, so once a loop has been seen
//! later operations stay tagged. This over-reports on purpose: a query that
//! may repeat is worth surfacing.

use tracing::trace;

use crate::patterns::{ITERATION_BEGIN, ITERATION_END, LOOP_KEYWORD, STATEMENT_EXECUTE};

/// Best-effort "inside a loop" tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopContext {
    depth: u32,
}

impl LoopContext {
    /// Creates a tracker at depth zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    /// Current depth.
    #[must_use]
    pub const fn depth(&self) -> u32 {
        self.depth
    }

    /// Whether operations seen now should be tagged as in a loop.
    #[must_use]
    pub const fn in_loop(&self) -> bool {
        self.depth > 0
    }

    /// Records a statement; loop keywords in its text increase the depth.
    pub fn statement(&mut self, text: &str) {
        if LOOP_KEYWORD.is_match(text) {
            self.depth = self.depth.saturating_add(1);
            trace!(depth = self.depth, "loop statement");
        }
    }

    /// Records an iteration begin marker.
    pub fn iteration_begin(&mut self) {
        self.depth = self.depth.max(1);
    }

    /// Records an iteration end marker.
    pub fn iteration_end(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Feeds a raw line. Returns true if it was a context marker.
    pub fn observe(&mut self, line: &str) -> bool {
        if let Some(caps) = STATEMENT_EXECUTE.captures(line) {
            self.statement(caps.get(1).map_or("", |m| m.as_str()));
            return true;
        }
        if ITERATION_BEGIN.is_match(line) {
            self.iteration_begin();
            return true;
        }
        if ITERATION_END.is_match(line) {
            self.iteration_end();
            return true;
        }
        false
    }
}
