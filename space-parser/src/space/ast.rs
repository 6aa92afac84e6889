//! Records and documents
//!
//!     A parse produces a [`Document`]: the preamble (unstructured text before the first
//!     header) plus the records in source order. Both are rebuilt from scratch on every
//!     parse; nothing is cached or mutated afterwards.
//!
//!     Record identities are only unique within one parse. Re-parsing edited text assigns
//!     fresh ones, so identity is not part of record equality. Neither is location: two
//!     records are equal when their header text, fields and body agree.

use super::header::{header_text, HeaderFields, DEFAULT_PLACE, DEFAULT_SUBTYPE};
use super::header::{ERROR_NAME, ERROR_PLACE, ERROR_SUBTYPE};
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Opaque per-parse record identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(pub usize);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rec-{}", self.0)
    }
}

/// Where a record came from in its source text (0-based line numbers).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordLocation {
    pub header_line: usize,
    /// Lines attributed to the body, before trimming. Empty when the next header (or the
    /// end of input) follows immediately.
    pub body: Range<usize>,
}

/// One parsed block: header fields plus the trimmed body text.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    pub id: RecordId,
    /// The header line as it appeared in the source, malformed or not, minus the `\r` of a
    /// CRLF terminator.
    pub raw_header: String,
    pub name: String,
    pub subtype: String,
    pub place: String,
    pub body: String,
    pub location: RecordLocation,
}

impl Record {
    /// Build a record from fields, with a canonical `⫻name/subtype:place` header.
    pub fn new(
        name: impl Into<String>,
        subtype: impl Into<String>,
        place: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        let fields = HeaderFields::new(name, subtype, place);
        Self::with_fields(fields.to_header_line(), fields, body)
    }

    /// Build a record from a header line, running it through the header grammar.
    ///
    /// A line that is not a candidate header at all is treated like a malformed one: the
    /// record gets the error signature and keeps the line as its raw header.
    pub fn from_header(line: impl Into<String>, body: impl Into<String>) -> Self {
        let mut line = line.into();
        line.truncate(header_text(&line).len());
        let fields = super::header::parse_header(&line)
            .map(|h| h.fields())
            .unwrap_or_else(HeaderFields::parse_error);
        Self::with_fields(line, fields, body)
    }

    pub(crate) fn with_fields(
        raw_header: String,
        fields: HeaderFields,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::default(),
            raw_header,
            name: fields.name,
            subtype: fields.subtype,
            place: fields.place,
            body: body.into(),
            location: RecordLocation::default(),
        }
    }

    /// True when the record carries the malformed-header signature.
    pub fn is_parse_error(&self) -> bool {
        self.name == ERROR_NAME && self.subtype == ERROR_SUBTYPE && self.place == ERROR_PLACE
    }

    /// True when subtype and place are both at their defaults.
    pub fn has_default_fields(&self) -> bool {
        self.subtype == DEFAULT_SUBTYPE && self.place == DEFAULT_PLACE
    }

    pub fn fields(&self) -> HeaderFields {
        HeaderFields::new(&self.name, &self.subtype, &self.place)
    }

    /// Canonical header for the record's fields. May differ from `raw_header`.
    pub fn header(&self) -> String {
        self.fields().to_header_line()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.raw_header == other.raw_header
            && self.name == other.name
            && self.subtype == other.subtype
            && self.place == other.place
            && self.body == other.body
    }
}

impl Eq for Record {}

/// The result of parsing a Space document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Trimmed text before the first header. Empty when the document starts with a header.
    pub preamble: String,
    #[serde(skip)]
    pub preamble_lines: Range<usize>,
    /// Line where the preamble text begins: its first non-blank line.
    #[serde(skip)]
    pub preamble_start: usize,
    /// Records in the order their headers appear.
    pub records: Vec<Record>,
}

impl Document {
    pub fn new(preamble: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            preamble: preamble.into(),
            preamble_lines: 0..0,
            preamble_start: 0,
            records,
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.preamble.is_empty() && self.records.is_empty()
    }

    /// First record with the given name, in document order.
    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn error_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_parse_error()).count()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
