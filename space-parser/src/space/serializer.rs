//! Serializer
//!
//! Renders records back to Space text: each record's raw header, a newline, then its body,
//! with one blank line between records.
//!
//! This is a near-inverse of [`crate::space::parsing::parse`]. For well-formed records,
//! parsing the output yields the same header text, fields and bodies. It is not an exact
//! round-trip for the preamble, which [`serialize`] never emits: it renders a record list,
//! not a whole document. Callers that want the preamble back use
//! [`serialize_with_preamble`].

use super::ast::Record;

/// Render records as Space text. The preamble is not part of the output.
pub fn serialize(records: &[Record]) -> String {
    records
        .iter()
        .map(|r| format!("{}\n{}", r.raw_header, r.body))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render records with a preamble in front, separated by a blank line.
///
/// An empty preamble is left out entirely, giving the same output as [`serialize`].
pub fn serialize_with_preamble(preamble: &str, records: &[Record]) -> String {
    let body = serialize(records);
    match (preamble.is_empty(), body.is_empty()) {
        (true, _) => body,
        (false, true) => preamble.to_string(),
        (false, false) => format!("{preamble}\n\n{body}"),
    }
}
