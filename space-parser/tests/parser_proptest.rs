//! Property-based tests for the parser and serializer
//!
//! These tests check the guarantees that hold for every input:
//! - parsing never panics, whatever the text
//! - every line lands in exactly one of preamble, header or body
//! - well-formed records survive serialize-then-parse unchanged
//! - parsing is deterministic

use proptest::prelude::*;
use space_parser::space::ast::Record;
use space_parser::space::header::header_text;
use space_parser::space::lexing::{split_lines, tokenize};
use space_parser::space::parsing::parse;
use space_parser::space::serializer::serialize;

/// Generate a header identifier
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_-]{1,8}"
}

/// Generate a well-formed header line, with and without the optional parts
fn header_strategy() -> impl Strategy<Value = String> {
    (
        identifier_strategy(),
        proptest::option::of(identifier_strategy()),
        proptest::option::of(identifier_strategy()),
    )
        .prop_map(|(name, subtype, place)| {
            let mut header = format!("⫻{name}");
            if let Some(subtype) = subtype {
                header.push('/');
                header.push_str(&subtype);
            }
            if let Some(place) = place {
                header.push(':');
                header.push_str(&place);
            }
            header
        })
}

/// Generate a content line that never starts with the anchor
fn content_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Prose
        "[a-zA-Z0-9 .,!?]{0,30}",
        // JSON-ish
        "\\{\"[a-z]{1,5}\": [0-9]{1,3}\\}",
        // Bullets, possibly mentioning the anchor
        "- [a-z⫻/:]{0,10}",
        // Blank
        "",
        // Carriage returns left inside the text
        "[a-z ]{0,8}\r",
        "\r",
    ]
}

/// Generate a body the way the parser would store it: joined lines, trimmed
fn body_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(content_line_strategy(), 0..6)
        .prop_map(|lines| lines.join("\n").trim().to_string())
}

/// Generate any line: well-formed headers, malformed headers and content
fn any_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        header_strategy(),
        "⫻[a-z /:.]{0,8}",
        // Indented anchors are content
        " +⫻[a-z]{0,6}",
        content_line_strategy(),
    ]
}

fn document_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(any_line_strategy(), 0..20),
        prop::bool::ANY,
    )
        .prop_map(|(lines, crlf)| lines.join(if crlf { "\r\n" } else { "\n" }))
}

proptest! {
    #[test]
    fn parse_never_panics(text in "\\PC*") {
        let doc = parse(&text);
        prop_assert_eq!(doc.records.len(), tokenize(&text).iter().filter(|t| t.is_header()).count());
    }

    #[test]
    fn round_trip_of_well_formed_records(
        records in prop::collection::vec((header_strategy(), body_strategy()), 0..8)
    ) {
        let records: Vec<Record> = records
            .into_iter()
            .map(|(header, body)| Record::from_header(header, body))
            .collect();

        let reparsed = parse(&serialize(&records));

        prop_assert_eq!(reparsed.preamble, "");
        prop_assert_eq!(reparsed.records, records);
    }

    #[test]
    fn every_line_is_attributed_exactly_once(text in document_strategy()) {
        let lines: Vec<&str> = split_lines(&text).collect();
        let doc = parse(&text);

        // The preamble starts the document and ends where the first header sits
        let first_header = doc
            .records
            .first()
            .map(|r| r.location.header_line)
            .unwrap_or(lines.len());
        prop_assert_eq!(doc.preamble_lines.clone(), 0..first_header);
        let preamble_text = lines[doc.preamble_lines.clone()].join("\n");
        prop_assert_eq!(preamble_text.trim(), doc.preamble.as_str());

        // Each record owns its header line and every line up to the next header
        for (i, record) in doc.records.iter().enumerate() {
            let next = doc
                .records
                .get(i + 1)
                .map(|r| r.location.header_line)
                .unwrap_or(lines.len());

            prop_assert_eq!(
                header_text(lines[record.location.header_line]),
                record.raw_header.as_str()
            );
            prop_assert_eq!(record.location.body.clone(), record.location.header_line + 1..next);
            let body_text = lines[record.location.body.clone()].join("\n");
            prop_assert_eq!(body_text.trim(), record.body.as_str());
        }
    }

    #[test]
    fn parsing_is_deterministic(text in document_strategy()) {
        let first = parse(&text);
        let second = parse(&text);
        let first_ids: Vec<_> = first.records.iter().map(|r| r.id).collect();
        let second_ids: Vec<_> = second.records.iter().map(|r| r.id).collect();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_ids, second_ids);
    }
}
