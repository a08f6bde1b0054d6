//! Recognized line patterns.
//!
//! Event markers are located by their `|EVENT|` token anywhere in the line so
//! the clock prefix never has to be understood. Limit lines do not follow the
//! marker convention and get their own patterns.

use once_cell::sync::Lazy;
use regex::Regex;

/// Builds a pattern that is known to compile.
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|_| unreachable!())
}

/// `|USER_DEBUG|[line]|LEVEL|message`
pub static USER_DEBUG: Lazy<Regex> =
    Lazy::new(|| compile(r"\|USER_DEBUG\|\[(\d+|EXTERNAL)\]\|([^|]*)\|(.*)$"));

/// `|SOQL_EXECUTE_BEGIN|[line]|Aggregations:n|query`
pub static SOQL_BEGIN: Lazy<Regex> = Lazy::new(|| {
    compile(r"\|SOQL_EXECUTE_BEGIN\|\[(\d+|EXTERNAL)\]\|Aggregations:(\d+)\|(.*)$")
});

/// `|SOQL_EXECUTE_END|[line]|Rows:n`
pub static SOQL_END: Lazy<Regex> =
    Lazy::new(|| compile(r"\|SOQL_EXECUTE_END\|\[(\d+|EXTERNAL)\]\|Rows:(\d+)"));

/// `|DML_BEGIN|[line]|Op:verb|Type:entity|Rows:n`
pub static DML_BEGIN: Lazy<Regex> = Lazy::new(|| {
    compile(r"\|DML_BEGIN\|\[(\d+|EXTERNAL)\]\|Op:([^|]*)\|Type:([^|]*)\|Rows:(\d+)")
});

/// `|CODE_UNIT_STARTED|...|name`
pub static CODE_UNIT_STARTED: Lazy<Regex> =
    Lazy::new(|| compile(r"\|CODE_UNIT_STARTED\|(.*)$"));

/// `|FATAL_ERROR|message`
pub static FATAL_ERROR: Lazy<Regex> = Lazy::new(|| compile(r"\|FATAL_ERROR\|(.*)$"));

/// `|EXCEPTION_THROWN|[line]|message`
pub static EXCEPTION_THROWN: Lazy<Regex> =
    Lazy::new(|| compile(r"\|EXCEPTION_THROWN\|\[(\d+|EXTERNAL)\]\|(.*)$"));

/// `|STATEMENT_EXECUTE|[line]` followed by optional statement text.
pub static STATEMENT_EXECUTE: Lazy<Regex> =
    Lazy::new(|| compile(r"\|STATEMENT_EXECUTE\|\[(?:\d+|EXTERNAL)\](.*)$"));

/// Whole-word loop keyword, any case.
pub static LOOP_KEYWORD: Lazy<Regex> = Lazy::new(|| compile(r"(?i)\b(?:for|while|do)\b"));

/// `|ITERATION_BEGIN|`
pub static ITERATION_BEGIN: Lazy<Regex> = Lazy::new(|| compile(r"\|ITERATION_BEGIN(?:\||$)"));

/// `|ITERATION_END|`
pub static ITERATION_END: Lazy<Regex> = Lazy::new(|| compile(r"\|ITERATION_END(?:\||$)"));

/// `(nanos)|EXECUTION_STARTED`
pub static EXECUTION_STARTED: Lazy<Regex> =
    Lazy::new(|| compile(r"\((\d+)\)\|EXECUTION_STARTED(?:\||$)"));

/// `(nanos)|EXECUTION_FINISHED`
pub static EXECUTION_FINISHED: Lazy<Regex> =
    Lazy::new(|| compile(r"\((\d+)\)\|EXECUTION_FINISHED(?:\||$)"));

/// `Number of <name>: <used> out of <max>`
pub static LIMIT_GENERIC: Lazy<Regex> =
    Lazy::new(|| compile(r"Number of ([^:]+): (\d+) out of (\d+)"));

/// `Maximum CPU time: <used> out of <max>`
pub static LIMIT_CPU: Lazy<Regex> =
    Lazy::new(|| compile(r"Maximum CPU time: (\d+) out of (\d+)"));

/// `Maximum heap size: <used> out of <max>`
pub static LIMIT_HEAP: Lazy<Regex> =
    Lazy::new(|| compile(r"Maximum heap size: (\d+) out of (\d+)"));

/// Parses a bracketed line reference. `EXTERNAL` maps to 0; digits that do
/// not fit yield `None`.
#[must_use]
pub fn parse_line_ref(raw: &str) -> Option<u32> {
    if raw == "EXTERNAL" {
        return Some(0);
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn user_debug_captures_message_with_pipes() {
        let caps = USER_DEBUG
            .captures("12:00:00.1 (100)|USER_DEBUG|[5]|DEBUG|a|b")
            .expect("match");
        assert_eq!(&caps[1], "5");
        assert_eq!(&caps[2], "DEBUG");
        assert_eq!(&caps[3], "a|b");
    }

    #[test]
    fn soql_begin_and_end() {
        let caps = SOQL_BEGIN
            .captures("x|SOQL_EXECUTE_BEGIN|[5]|Aggregations:2|SELECT Id FROM Account")
            .expect("match");
        assert_eq!(&caps[2], "2");
        assert_eq!(&caps[3], "SELECT Id FROM Account");

        let caps = SOQL_END.captures("x|SOQL_EXECUTE_END|[5]|Rows:42").expect("match");
        assert_eq!(&caps[1], "5");
        assert_eq!(&caps[2], "42");
    }

    #[test]
    fn dml_begin() {
        let caps = DML_BEGIN
            .captures("x|DML_BEGIN|[9]|Op:Insert|Type:Account|Rows:3")
            .expect("match");
        assert_eq!(&caps[1], "9");
        assert_eq!(&caps[2], "Insert");
        assert_eq!(&caps[3], "Account");
        assert_eq!(&caps[4], "3");
    }

    #[test_case("for (Account a : accs)", true ; "for loop")]
    #[test_case("WHILE (x)", true ; "uppercase while")]
    #[test_case("do {", true ; "do block")]
    #[test_case("format(x)", false ; "keyword prefix")]
    #[test_case("before insert", false ; "keyword inside word")]
    #[test_case("", false ; "empty")]
    fn loop_keyword(text: &str, expected: bool) {
        assert_eq!(LOOP_KEYWORD.is_match(text), expected);
    }

    #[test]
    fn iteration_markers_need_full_token() {
        assert!(ITERATION_BEGIN.is_match("x|ITERATION_BEGIN|[4]"));
        assert!(ITERATION_BEGIN.is_match("x|ITERATION_BEGIN"));
        assert!(!ITERATION_BEGIN.is_match("x|ITERATION_BEGINS|[4]"));
        assert!(ITERATION_END.is_match("x|ITERATION_END|[4]"));
    }

    #[test]
    fn execution_markers() {
        let caps = EXECUTION_STARTED
            .captures("12:00:00.0 (1000000)|EXECUTION_STARTED")
            .expect("match");
        assert_eq!(&caps[1], "1000000");
        assert!(EXECUTION_FINISHED.is_match("12:00:00.3 (251000000)|EXECUTION_FINISHED"));
    }

    #[test]
    fn limit_patterns() {
        let caps = LIMIT_GENERIC
            .captures("  Number of SOQL queries: 95 out of 100 ******* CLOSE TO LIMIT")
            .expect("match");
        assert_eq!(&caps[1], "SOQL queries");
        assert_eq!(&caps[2], "95");
        assert_eq!(&caps[3], "100");

        assert!(LIMIT_CPU.is_match("  Maximum CPU time: 1500 out of 10000"));
        assert!(LIMIT_HEAP.is_match("  Maximum heap size: 0 out of 6000000"));
        assert!(!LIMIT_GENERIC.is_match("  Maximum CPU time: 1500 out of 10000"));
    }

    #[test_case("5", Some(5) ; "digits")]
    #[test_case("EXTERNAL", Some(0) ; "external")]
    #[test_case("99999999999", None ; "overflow")]
    fn line_refs(raw: &str, expected: Option<u32>) {
        assert_eq!(parse_line_ref(raw), expected);
    }
}
