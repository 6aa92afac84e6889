//! Header line grammar
//!
//! A header line is the anchor glyph followed by a structured triple:
//!
//! ```text
//! ⫻name[/subtype][:place]
//! ```
//!
//! where each of `name`, `subtype` and `place` matches `[A-Za-z0-9_-]+`.
//!
//! Classification happens in two steps. Any line whose first character is the anchor is a
//! candidate header; anything else is content, whatever it looks like. A candidate is
//! well-formed when the rest of the line matches the grammar exactly. Otherwise it is
//! malformed: it still opens a new block, but the block gets the fixed error signature
//! `parse-error/raw:err`.
//!
//! A header line from a CRLF source ends in `\r`. That one `\r` is the line terminator,
//! not part of the header, and [`header_text`] removes it before matching. Content lines
//! are never touched.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// The reserved glyph that starts every header line.
pub const ANCHOR: char = '⫻';

pub const DEFAULT_SUBTYPE: &str = "std";
pub const DEFAULT_PLACE: &str = "0";

pub const ERROR_NAME: &str = "parse-error";
pub const ERROR_SUBTYPE: &str = "raw";
pub const ERROR_PLACE: &str = "err";

/// Anchored header grammar. No whitespace is allowed anywhere in the header.
static HEADER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^⫻([A-Za-z0-9_-]+)(?:/([A-Za-z0-9_-]+))?(?::([A-Za-z0-9_-]+))?$")
        .expect("header grammar is a valid regex")
});

/// Fields extracted from a header line, with defaults already applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderFields {
    pub name: String,
    pub subtype: String,
    pub place: String,
}

impl HeaderFields {
    pub fn new(
        name: impl Into<String>,
        subtype: impl Into<String>,
        place: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            subtype: subtype.into(),
            place: place.into(),
        }
    }

    /// The fixed signature given to blocks opened by a malformed header.
    pub fn parse_error() -> Self {
        Self::new(ERROR_NAME, ERROR_SUBTYPE, ERROR_PLACE)
    }

    /// Render the canonical header line for these fields (always with all three parts).
    pub fn to_header_line(&self) -> String {
        format!("{}{}/{}:{}", ANCHOR, self.name, self.subtype, self.place)
    }
}

/// A classified candidate header line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Header {
    WellFormed(HeaderFields),
    Malformed,
}

impl Header {
    pub fn is_malformed(&self) -> bool {
        matches!(self, Header::Malformed)
    }

    /// Resolve to the fields a record opened by this header carries.
    pub fn fields(&self) -> HeaderFields {
        match self {
            Header::WellFormed(fields) => fields.clone(),
            Header::Malformed => HeaderFields::parse_error(),
        }
    }
}

/// True when the line's first character is the anchor glyph.
pub fn is_candidate(line: &str) -> bool {
    line.starts_with(ANCHOR)
}

/// The header line without a trailing `\r` left over from a CRLF terminator.
pub fn header_text(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Classify a single line.
///
/// Returns `None` for content lines. Candidate headers always produce `Some`, either
/// well-formed with defaults applied, or malformed.
pub fn parse_header(line: &str) -> Option<Header> {
    if !is_candidate(line) {
        return None;
    }

    let header = match HEADER_REGEX.captures(header_text(line)) {
        Some(caps) => Header::WellFormed(HeaderFields {
            name: caps[1].to_string(),
            subtype: caps
                .get(2)
                .map_or(DEFAULT_SUBTYPE, |m| m.as_str())
                .to_string(),
            place: caps
                .get(3)
                .map_or(DEFAULT_PLACE, |m| m.as_str())
                .to_string(),
        }),
        None => Header::Malformed,
    };

    Some(header)
}

/// Check a single identifier (`name`, `subtype` or `place`) against the grammar.
pub fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
