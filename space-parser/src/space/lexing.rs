//! Line tokenizer
//!
//! The first stage of parsing: split the source into lines and classify each one as a
//! header (well-formed or malformed) or a content line. Grouping happens later, in
//! [`crate::space::parsing`].
//!
//! Lines are split on `\n` only and keep every other character, `\r` included, so body
//! text comes through exactly as written. Header classification ignores the `\r` of a CRLF
//! terminator (see [`header_text`](super::header::header_text)), so CRLF headers still
//! parse. Empty lines are kept: they are content and count towards body whitespace.

use super::header::{parse_header, Header};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum LineKind {
    Header { header: Header },
    Content,
}

/// A classified source line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineToken<'a> {
    /// 0-based line number
    pub number: usize,
    /// Line text without the `\n`. A `\r` before it is kept.
    pub text: &'a str,
    pub kind: LineKind,
}

impl LineToken<'_> {
    pub fn is_header(&self) -> bool {
        matches!(self.kind, LineKind::Header { .. })
    }
}

/// Split source text on `\n`.
///
/// Always yields at least one line; the number of lines is the number of `\n` plus one.
pub fn split_lines(source: &str) -> impl Iterator<Item = &str> {
    source.split('\n')
}

/// Classify every line of the source.
pub fn tokenize(source: &str) -> Vec<LineToken<'_>> {
    split_lines(source)
        .enumerate()
        .map(|(number, text)| LineToken {
            number,
            text,
            kind: classify_line(text),
        })
        .collect()
}

pub fn classify_line(line: &str) -> LineKind {
    match parse_header(line) {
        Some(header) => LineKind::Header { header },
        None => LineKind::Content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::header::HeaderFields;

    #[test]
    fn test_empty_source_is_one_empty_line() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].text, "");
        assert_eq!(tokens[0].kind, LineKind::Content);
    }

    #[test]
    fn test_blank_lines_are_preserved() {
        let texts: Vec<_> = tokenize("a\n\n\nb\n").iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["a", "", "", "b", ""]);
    }

    #[test]
    fn test_crlf_lines_keep_their_carriage_return() {
        let tokens = tokenize("⫻a:0\r\nbody\r\n\r\n");
        assert_eq!(tokens[0].text, "⫻a:0\r");
        assert_eq!(
            tokens[0].kind,
            LineKind::Header {
                header: Header::WellFormed(HeaderFields::new("a", "std", "0"))
            }
        );
        assert_eq!(tokens[1].text, "body\r");
        assert_eq!(tokens[2].text, "\r");
        assert_eq!(tokens[2].kind, LineKind::Content);
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn test_classification() {
        let tokens = tokenize("intro\n⫻a/b:c\ntext\n⫻ bad");
        let kinds: Vec<_> = tokens.iter().map(|t| t.is_header()).collect();
        assert_eq!(kinds, vec![false, true, false, true]);
        assert_eq!(
            tokens[3].kind,
            LineKind::Header {
                header: Header::Malformed
            }
        );
        assert_eq!(tokens[3].number, 3);
    }
}
