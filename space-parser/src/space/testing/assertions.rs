//! Fluent assertions for documents and records

use crate::space::ast::{Document, Record};

/// Create an assertion builder for a document
pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    pub fn preamble(self, expected: &str) -> Self {
        assert_eq!(
            self.doc.preamble, expected,
            "Document: expected preamble {:?}, found {:?}",
            expected, self.doc.preamble
        );
        self
    }

    pub fn record_count(self, expected: usize) -> Self {
        let names: Vec<_> = self.doc.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            self.doc.records.len(),
            expected,
            "Document: expected {} records, found {} ({:?})",
            expected,
            self.doc.records.len(),
            names
        );
        self
    }

    /// Assert record names, in document order
    pub fn names(self, expected: &[&str]) -> Self {
        let names: Vec<_> = self.doc.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, expected, "Document: record names differ");
        self
    }

    pub fn record<F>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(RecordAssertion<'a>),
    {
        let record = self.doc.records.get(index).unwrap_or_else(|| {
            panic!(
                "Document: no record at index {}, document has {}",
                index,
                self.doc.records.len()
            )
        });
        check(RecordAssertion {
            record,
            context: format!("records[{index}]"),
        });
        self
    }

    /// Run a check against every record
    pub fn all_records<F>(self, mut check: F) -> Self
    where
        F: FnMut(RecordAssertion<'a>),
    {
        for (index, record) in self.doc.records.iter().enumerate() {
            check(RecordAssertion {
                record,
                context: format!("records[{index}]"),
            });
        }
        self
    }
}

pub struct RecordAssertion<'a> {
    record: &'a Record,
    context: String,
}

impl<'a> RecordAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(
            self.record.name, expected,
            "{}: expected name {:?}, found {:?}",
            self.context, expected, self.record.name
        );
        self
    }

    pub fn subtype(self, expected: &str) -> Self {
        assert_eq!(
            self.record.subtype, expected,
            "{}: expected subtype {:?}, found {:?}",
            self.context, expected, self.record.subtype
        );
        self
    }

    pub fn place(self, expected: &str) -> Self {
        assert_eq!(
            self.record.place, expected,
            "{}: expected place {:?}, found {:?}",
            self.context, expected, self.record.place
        );
        self
    }

    /// Assert name, subtype and place at once
    pub fn fields(self, name: &str, subtype: &str, place: &str) -> Self {
        self.name(name).subtype(subtype).place(place)
    }

    pub fn body(self, expected: &str) -> Self {
        assert_eq!(
            self.record.body, expected,
            "{}: expected body {:?}, found {:?}",
            self.context, expected, self.record.body
        );
        self
    }

    pub fn body_contains(self, needle: &str) -> Self {
        assert!(
            self.record.body.contains(needle),
            "{}: expected body to contain {:?}, found {:?}",
            self.context,
            needle,
            self.record.body
        );
        self
    }

    pub fn raw_header(self, expected: &str) -> Self {
        assert_eq!(
            self.record.raw_header, expected,
            "{}: expected raw header {:?}, found {:?}",
            self.context, expected, self.record.raw_header
        );
        self
    }

    pub fn is_parse_error(self) -> Self {
        assert!(
            self.record.is_parse_error(),
            "{}: expected a parse-error record, found {}",
            self.context,
            self.record.header()
        );
        self
    }

    pub fn is_well_formed(self) -> Self {
        assert!(
            !self.record.is_parse_error(),
            "{}: expected a well-formed record, found parse error for {:?}",
            self.context,
            self.record.raw_header
        );
        self
    }

    /// 0-based source line of the header
    pub fn header_line(self, expected: usize) -> Self {
        assert_eq!(
            self.record.location.header_line, expected,
            "{}: expected header on line {}, found {}",
            self.context, expected, self.record.location.header_line
        );
        self
    }
}
