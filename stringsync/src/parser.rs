//! Line-oriented parser for the `.strings` table format.
//!
//! The format is consumed one physical line at a time. Besides the plain
//! `"key" = "value";` form (optionally preceded by a `/* comment */` line or
//! carrying a trailing comment on the same line), both comments and values
//! may span several physical lines; fragments are reassembled joined with
//! `\n`. Lines that match no production are silently skipped, which covers
//! blank lines and stray text.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::record::LocalizedString;

lazy_static! {
    static ref COMMENT: Regex = Regex::new(r"^\w*/\* (?P<comment>.+) \*/\w*$").unwrap();
    static ref COMMENT_MULTILINE_START: Regex = Regex::new(r"^\w*/\* (?P<comment>.+)$").unwrap();
    static ref COMMENT_MULTILINE_END: Regex = Regex::new(r"^(?P<comment>.+)\*/\s*$").unwrap();
    static ref PAIR: Regex = Regex::new(r#"^"(?P<key>.+)" ?= ?"(?P<value>.+)";$"#).unwrap();
    static ref PAIR_MULTILINE_START: Regex =
        Regex::new(r#"^"(?P<key>.+)" ?= ?"(?P<value>.+)$"#).unwrap();
    static ref PAIR_MULTILINE_END: Regex = Regex::new(r#"^(?P<value>.+)" ?; ?$"#).unwrap();
    static ref PAIR_TRAILING_COMMENT: Regex = Regex::new(
        r#"^"(?P<key>.+)" ?= ?"(?P<value>.+)" ?; ?/\* (?P<comment>.+) \*/$"#
    )
    .unwrap();
    static ref ANY_CONTENT: Regex = Regex::new(r"^(?P<fragment>.+)$").unwrap();
}

/// Parser state between two physical lines.
///
/// Partially assembled comment/key/value fragments live inside the variant
/// that needs them, so a state value is self-contained and every transition
/// can be tested on its own through [`process_line`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ParserState {
    /// Initial state, and the state after every completed record.
    #[default]
    AwaitingComment,
    /// Inside a `/* ...` comment whose `*/` has not been seen yet.
    InMultilineComment { partial: String },
    /// A comment has been collected; the key/value line is expected next.
    AwaitingString { comment: String },
    /// Inside a `"key" = "value...` whose closing `";` has not been seen yet.
    InMultilineValue {
        comment: String,
        key: String,
        partial: String,
    },
}

/// Advances the state machine by one line.
///
/// Consumes the current state and returns the successor state, plus the
/// completed record if this line finished one. Never fails: a line that
/// matches no production in the current state is consumed without effect.
///
/// Production precedence is load-bearing. In [`ParserState::AwaitingComment`]
/// the trailing-comment form is tested before the plain comment form (a
/// one-line record must not be misparsed as a comment-only line), and in
/// [`ParserState::AwaitingString`] the complete pair is tested before the
/// multi-line value start, which would otherwise swallow it.
pub fn process_line(state: ParserState, line: &str) -> (ParserState, Option<LocalizedString>) {
    match state {
        ParserState::AwaitingComment => {
            if let Some(record) = parse_trailing_comment(line) {
                return (ParserState::AwaitingComment, Some(record));
            }
            if let Some((key, value)) = parse_pair(line) {
                let record = LocalizedString::with_value(key, value, None);
                return (ParserState::AwaitingComment, Some(record));
            }
            if let Some(comment) = parse_comment(line) {
                return (ParserState::AwaitingString { comment }, None);
            }
            if let Some(partial) = parse_multiline_comment_start(line) {
                return (ParserState::InMultilineComment { partial }, None);
            }
            trace!(line, "no production matched, line skipped");
            (ParserState::AwaitingComment, None)
        }
        ParserState::InMultilineComment { partial } => {
            if let Some(end) = parse_multiline_comment_end(line) {
                let comment = format!("{partial}\n{end}");
                return (ParserState::AwaitingString { comment }, None);
            }
            if let Some(fragment) = parse_fragment(line) {
                let partial = format!("{partial}\n{fragment}");
                return (ParserState::InMultilineComment { partial }, None);
            }
            // Blank line inside the comment; fragment unchanged.
            (ParserState::InMultilineComment { partial }, None)
        }
        ParserState::AwaitingString { comment } => {
            if let Some((key, value)) = parse_pair(line) {
                let record = LocalizedString::with_value(key, value, Some(comment));
                return (ParserState::AwaitingComment, Some(record));
            }
            if let Some((key, partial)) = parse_multiline_value_start(line) {
                return (
                    ParserState::InMultilineValue {
                        comment,
                        key,
                        partial,
                    },
                    None,
                );
            }
            // The collected comment stays pending until a pair shows up.
            (ParserState::AwaitingString { comment }, None)
        }
        ParserState::InMultilineValue {
            comment,
            key,
            partial,
        } => {
            if let Some(end) = parse_multiline_value_end(line) {
                let value = format!("{partial}\n{end}");
                let record = LocalizedString::with_value(key, value, Some(comment));
                return (ParserState::AwaitingComment, Some(record));
            }
            if let Some(fragment) = parse_fragment(line) {
                let partial = format!("{partial}\n{fragment}");
                return (
                    ParserState::InMultilineValue {
                        comment,
                        key,
                        partial,
                    },
                    None,
                );
            }
            (
                ParserState::InMultilineValue {
                    comment,
                    key,
                    partial,
                },
                None,
            )
        }
    }
}

/// Stateful wrapper around [`process_line`], one instance per file.
#[derive(Debug, Default)]
pub struct LineParser {
    state: ParserState,
}

impl LineParser {
    pub fn new() -> Self {
        LineParser::default()
    }

    /// Feeds one physical line, returning a record when the line
    /// completed one.
    pub fn parse_line(&mut self, line: &str) -> Option<LocalizedString> {
        let state = std::mem::take(&mut self.state);
        let (next, record) = process_line(state, line);
        self.state = next;
        record
    }
}

/// Lazily parses all records out of already-decoded table content.
pub fn parse_str(content: &str) -> impl Iterator<Item = LocalizedString> + '_ {
    let mut parser = LineParser::new();
    content.lines().filter_map(move |line| parser.parse_line(line))
}

fn parse_comment(line: &str) -> Option<String> {
    COMMENT
        .captures(line)
        .map(|captures| captures["comment"].to_string())
}

fn parse_multiline_comment_start(line: &str) -> Option<String> {
    COMMENT_MULTILINE_START
        .captures(line)
        .map(|captures| captures["comment"].to_string())
}

fn parse_multiline_comment_end(line: &str) -> Option<String> {
    COMMENT_MULTILINE_END
        .captures(line)
        .map(|captures| captures["comment"].to_string())
}

fn parse_pair(line: &str) -> Option<(String, String)> {
    PAIR.captures(line)
        .map(|captures| (captures["key"].to_string(), captures["value"].to_string()))
}

fn parse_multiline_value_start(line: &str) -> Option<(String, String)> {
    PAIR_MULTILINE_START
        .captures(line)
        .map(|captures| (captures["key"].to_string(), captures["value"].to_string()))
}

fn parse_multiline_value_end(line: &str) -> Option<String> {
    PAIR_MULTILINE_END
        .captures(line)
        .map(|captures| captures["value"].to_string())
}

fn parse_fragment(line: &str) -> Option<String> {
    ANY_CONTENT
        .captures(line)
        .map(|captures| captures["fragment"].to_string())
}

fn parse_trailing_comment(line: &str) -> Option<LocalizedString> {
    PAIR_TRAILING_COMMENT.captures(line).map(|captures| {
        LocalizedString::with_value(
            &captures["key"],
            &captures["value"],
            Some(captures["comment"].to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_then_pair() {
        let mut parser = LineParser::new();
        assert_eq!(parser.parse_line("    "), None);
        assert_eq!(parser.parse_line("/* Comment1 */"), None);
        assert_eq!(parser.parse_line("    "), None);

        let record = parser.parse_line("\"key1\" = \"value1\";").unwrap();
        assert_eq!(record.key, "key1");
        assert_eq!(record.value.as_deref(), Some("value1"));
        assert_eq!(record.comment.as_deref(), Some("Comment1"));

        // Parser resets after a record and takes the next block.
        assert_eq!(parser.parse_line("/* Comment2 */"), None);
        let record = parser.parse_line("\"key2\" = \"value2\";").unwrap();
        assert_eq!(record.key, "key2");
        assert_eq!(record.comment.as_deref(), Some("Comment2"));
    }

    #[test]
    fn test_pair_without_comment() {
        let mut parser = LineParser::new();
        let record = parser.parse_line("\"key1\" = \"value1\";").unwrap();
        assert_eq!(record.key, "key1");
        assert_eq!(record.value.as_deref(), Some("value1"));
        assert_eq!(record.comment, None);
    }

    #[test]
    fn test_trailing_comment_is_a_complete_record() {
        let mut parser = LineParser::new();
        let record = parser
            .parse_line("\"KEY3\" = \"VALUE3\"; /* Comment3 */")
            .unwrap();
        assert_eq!(record.key, "KEY3");
        assert_eq!(record.value.as_deref(), Some("VALUE3"));
        assert_eq!(record.comment.as_deref(), Some("Comment3"));
    }

    #[test]
    fn test_trailing_comment_not_misparsed_as_comment() {
        // If the plain comment production were tested first, this line would
        // set a pending comment instead of emitting a record.
        let mut parser = LineParser::new();
        let record = parser.parse_line("\"k\" = \"v\"; /* c */").unwrap();
        assert_eq!(record.key, "k");
        assert_eq!(parser.parse_line("\"next\" = \"next value\";").map(|r| r.key), Some("next".into()));
    }

    #[test]
    fn test_multiline_value() {
        let mut parser = LineParser::new();
        assert_eq!(parser.parse_line("/* Comment4 */"), None);
        assert_eq!(parser.parse_line("\"KEY4\" = \"VALUE4"), None);
        let record = parser.parse_line("VALUE4_LINE2\";").unwrap();
        assert_eq!(record.key, "KEY4");
        assert_eq!(record.value.as_deref(), Some("VALUE4\nVALUE4_LINE2"));
        assert_eq!(record.comment.as_deref(), Some("Comment4"));
    }

    #[test]
    fn test_multiline_value_with_interior_lines() {
        let mut parser = LineParser::new();
        assert_eq!(parser.parse_line("/* c */"), None);
        assert_eq!(parser.parse_line("\"K\" = \"V1"), None);
        assert_eq!(parser.parse_line("V2"), None);
        let record = parser.parse_line("V3\";").unwrap();
        assert_eq!(record.value.as_deref(), Some("V1\nV2\nV3"));
    }

    #[test]
    fn test_multiline_comment() {
        let mut parser = LineParser::new();
        assert_eq!(parser.parse_line("/* Line 1"), None);
        assert_eq!(parser.parse_line(" Line 2"), None);
        assert_eq!(parser.parse_line(" Line 3 */"), None);
        let record = parser.parse_line("\"key\" = \"value\";").unwrap();
        assert_eq!(record.key, "key");
        assert_eq!(record.value.as_deref(), Some("value"));
        assert_eq!(record.comment.as_deref(), Some("Line 1\n Line 2\n Line 3 "));
    }

    #[test]
    fn test_stray_lines_are_skipped() {
        let mut parser = LineParser::new();
        assert_eq!(parser.parse_line("This line is no comment"), None);
        assert_eq!(parser.parse_line(""), None);
        // State is unchanged; a normal block still parses.
        assert_eq!(parser.parse_line("/* c */"), None);
        assert!(parser.parse_line("\"k\" = \"v\";").is_some());
    }

    #[test]
    fn test_pending_comment_survives_stray_lines() {
        let mut parser = LineParser::new();
        assert_eq!(parser.parse_line("/* c */"), None);
        assert_eq!(parser.parse_line("not a pair"), None);
        let record = parser.parse_line("\"k\" = \"v\";").unwrap();
        assert_eq!(record.comment.as_deref(), Some("c"));
    }

    #[test]
    fn test_whitespace_around_equals() {
        let mut parser = LineParser::new();
        let record = parser.parse_line("\"k\"=\"v\";").unwrap();
        assert_eq!(record.key, "k");
        assert_eq!(record.value.as_deref(), Some("v"));
    }

    #[test]
    fn test_parse_str_is_lazy_and_ordered() {
        let content = "/* a */\n\"a\" = \"1\";\n\n\"b\" = \"2\";\n";
        let keys: Vec<String> = parse_str(content).map(|record| record.key).collect();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_process_line_transition_into_multiline_comment() {
        let (state, record) = process_line(ParserState::AwaitingComment, "/* opening ");
        assert_eq!(record, None);
        assert_eq!(
            state,
            ParserState::InMultilineComment {
                partial: "opening ".to_string()
            }
        );
    }

    #[test]
    fn test_process_line_blank_line_keeps_multiline_state() {
        let state = ParserState::InMultilineValue {
            comment: "c".into(),
            key: "k".into(),
            partial: "v1".into(),
        };
        let (next, record) = process_line(state.clone(), "");
        assert_eq!(record, None);
        assert_eq!(next, state);
    }
}
