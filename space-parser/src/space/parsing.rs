//! Parser
//!
//! Groups classified lines into records. This is a single left-to-right pass with two
//! states:
//!
//!     InPreamble        before the first header; content lines feed the preamble
//!     InRecord(open)    after a header; content lines feed that record's body
//!
//! Every header line flushes the accumulator into the preamble or the open record, then
//! opens a new record. The end of input flushes once more, since there is no terminator
//! line. The pass never fails: malformed headers open records with the error signature.
//!
//! Every line ends up in exactly one of: the preamble, a record header, or a record body.

use super::ast::{Document, Record, RecordId, RecordLocation};
use super::header::{header_text, HeaderFields};
use super::lexing::{tokenize, LineKind, LineToken};
use tracing::{debug, trace};

/// A record whose body is still being collected.
struct OpenRecord {
    id: RecordId,
    raw_header: String,
    fields: HeaderFields,
    header_line: usize,
}

enum State {
    InPreamble,
    InRecord(OpenRecord),
}

struct Parser<'a> {
    state: State,
    lines: Vec<&'a str>,
    /// Line number of the first accumulated line
    start: usize,
    next_id: usize,
    preamble: String,
    preamble_lines: std::ops::Range<usize>,
    preamble_start: usize,
    records: Vec<Record>,
}

impl<'a> Parser<'a> {
    fn new() -> Self {
        Self {
            state: State::InPreamble,
            lines: Vec::new(),
            start: 0,
            next_id: 0,
            preamble: String::new(),
            preamble_lines: 0..0,
            preamble_start: 0,
            records: Vec::new(),
        }
    }

    fn feed(&mut self, token: LineToken<'a>) {
        match token.kind {
            LineKind::Content => self.lines.push(token.text),
            LineKind::Header { header } => {
                trace!(
                    line = token.number,
                    malformed = header.is_malformed(),
                    "header boundary"
                );
                self.flush(token.number);

                let open = OpenRecord {
                    id: RecordId(self.next_id),
                    raw_header: header_text(token.text).to_string(),
                    fields: header.fields(),
                    header_line: token.number,
                };
                self.next_id += 1;
                self.state = State::InRecord(open);
                self.start = token.number + 1;
            }
        }
    }

    /// Close out the accumulator. `end` is the line number one past the last accumulated line.
    fn flush(&mut self, end: usize) {
        let text = self.lines.join("\n").trim().to_string();
        let first_text_line = self
            .lines
            .iter()
            .position(|line| !line.trim().is_empty())
            .map_or(self.start, |offset| self.start + offset);
        self.lines.clear();

        match std::mem::replace(&mut self.state, State::InPreamble) {
            State::InPreamble => {
                self.preamble = text;
                self.preamble_lines = self.start..end;
                self.preamble_start = first_text_line;
            }
            State::InRecord(open) => {
                let mut record = Record::with_fields(open.raw_header, open.fields, text);
                record.id = open.id;
                record.location = RecordLocation {
                    header_line: open.header_line,
                    body: self.start..end,
                };
                self.records.push(record);
            }
        }
    }

    fn finish(mut self, line_count: usize) -> Document {
        self.flush(line_count);
        Document {
            preamble: self.preamble,
            preamble_lines: self.preamble_lines,
            preamble_start: self.preamble_start,
            records: self.records,
        }
    }
}

/// Parse Space source text into a [`Document`].
pub fn parse(source: &str) -> Document {
    let tokens = tokenize(source);
    let line_count = tokens.len();

    let mut parser = Parser::new();
    for token in tokens {
        parser.feed(token);
    }
    let doc = parser.finish(line_count);

    debug!(
        lines = line_count,
        records = doc.records.len(),
        errors = doc.error_count(),
        preamble = !doc.preamble.is_empty(),
        "parsed space document"
    );
    doc
}
