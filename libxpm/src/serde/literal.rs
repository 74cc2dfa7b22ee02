//! Tokenizer for the bracketed string list of an XPM source.
//!
//! An XPM file is a C array initializer: `static char *name[] = { "...", "...", ... };`.
//! Only the part between the first `{` and the last `}` matters, and inside it only a
//! comma-separated list of double-quoted strings (with an optional trailing comma) is accepted.

use nom::{
    bytes::complete::take_till,
    character::complete::{char, multispace0},
    sequence::delimited,
    IResult,
};
use tracing::trace;

use super::error::ParseError;

/// Returns the text between the first `{` and the last `}`
pub(crate) fn container_region(text: &str) -> Result<&str, ParseError> {
    let start = text.find('{').ok_or(ParseError::MalformedContainer)?;
    let end = text.rfind('}').ok_or(ParseError::MalformedContainer)?;
    if end < start {
        return Err(ParseError::MalformedContainer);
    }
    Ok(&text[start + 1..end])
}

fn quoted_string(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_till(|c: char| c == '"' || c == '\\'), char('"'))(input)
}

fn separator(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

fn malformed(index: usize, reason: impl Into<String>) -> ParseError {
    ParseError::MalformedEntry {
        index,
        reason: reason.into(),
    }
}

/// Splits the inside of the bracketed region into its string entries
pub(crate) fn split_entries(region: &str) -> Result<Vec<&str>, ParseError> {
    let mut entries = Vec::new();
    let mut rest = region.trim_start();
    while !rest.is_empty() {
        let index = entries.len();
        let Ok((after, entry)) = quoted_string(rest) else {
            return Err(describe_bad_token(index, rest));
        };
        trace!("entry {index}: {entry:?}");
        entries.push(entry);

        let after = after.trim_start();
        if after.is_empty() {
            break;
        }
        let Ok((after, _)) = separator(after) else {
            return Err(malformed(
                index,
                format!("expected ',' after entry, found {:?}", preview(after)),
            ));
        };
        rest = after;
    }
    Ok(entries)
}

fn describe_bad_token(index: usize, rest: &str) -> ParseError {
    let Some(body) = rest.strip_prefix('"') else {
        return malformed(
            index,
            format!("expected a quoted string, found {:?}", preview(rest)),
        );
    };
    match body.find(['"', '\\']) {
        Some(i) if body[i..].starts_with('\\') => {
            malformed(index, "escape sequences inside entries are not supported")
        }
        _ => malformed(index, "unterminated string"),
    }
}

fn preview(s: &str) -> String {
    s.chars().take(16).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_outermost_braces() {
        assert_eq!(container_region("x[] = {\"a\", \"{b}\"};").unwrap(), "\"a\", \"{b}\"");
        assert_eq!(container_region("no braces"), Err(ParseError::MalformedContainer));
        assert_eq!(container_region("} {"), Err(ParseError::MalformedContainer));
        assert_eq!(container_region("{ open"), Err(ParseError::MalformedContainer));
    }

    #[test]
    fn splits_quoted_entries() {
        let entries = split_entries(" \"2 1 2 1\" ,\"a c #ff0000\",\"\", \"ab\" ").unwrap();
        assert_eq!(entries, vec!["2 1 2 1", "a c #ff0000", "", "ab"]);
    }

    #[test]
    fn accepts_trailing_comma_and_empty_region() {
        assert_eq!(split_entries("\"a\",\"b\",").unwrap(), vec!["a", "b"]);
        assert!(split_entries("  ").unwrap().is_empty());
    }

    #[test]
    fn rejects_bare_tokens() {
        assert!(matches!(
            split_entries("\"a\", b"),
            Err(ParseError::MalformedEntry { index: 1, .. })
        ));
        assert!(matches!(
            split_entries("\"a\" \"b\""),
            Err(ParseError::MalformedEntry { index: 0, .. })
        ));
    }

    #[test]
    fn rejects_escapes_and_unterminated_strings() {
        let Err(ParseError::MalformedEntry { index, reason }) = split_entries("\"a\\\"b\"") else {
            panic!("expected MalformedEntry");
        };
        assert_eq!(index, 0);
        assert!(reason.contains("escape"));

        let Err(ParseError::MalformedEntry { reason, .. }) = split_entries("\"a\", \"b") else {
            panic!("expected MalformedEntry");
        };
        assert!(reason.contains("unterminated"));
    }
}
