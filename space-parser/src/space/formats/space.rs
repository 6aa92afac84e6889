//! The Space format itself, as an output format

use super::registry::{FormatError, Formatter};
use crate::space::ast::Document;
use crate::space::serializer::serialize;

/// Re-serializes the records. The preamble is not emitted, matching [`serialize`].
pub struct SpaceFormatter;

impl Formatter for SpaceFormatter {
    fn name(&self) -> &str {
        "space"
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let mut out = serialize(&doc.records);
        if !out.is_empty() {
            out.push('\n');
        }
        Ok(out)
    }

    fn description(&self) -> &str {
        "Records re-serialized as Space text (preamble dropped)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::parsing::parse;

    #[test]
    fn test_space_output() {
        let doc = parse("notes\n⫻a\n\n  body  \n\n⫻b:1\nmore");
        let out = SpaceFormatter.serialize(&doc).unwrap();
        assert_eq!(out, "⫻a\nbody\n\n⫻b:1\nmore\n");
    }

    #[test]
    fn test_space_output_without_records_is_empty() {
        let doc = parse("only a preamble");
        assert_eq!(SpaceFormatter.serialize(&doc).unwrap(), "");
    }
}
