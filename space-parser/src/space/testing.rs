//! Testing utilities
//!
//!     Tests should check documents through the fluent assertions in this module instead of
//!     walking `Document` and `Record` fields by hand. The assertions read better, report
//!     which record failed and why, and only need updating here when the data model changes.
//!
//!     ```rust,ignore
//!     use space_parser::space::testing::assert_doc;
//!
//!     let doc = parse("intro\n⫻a/json:store\n{}");
//!     assert_doc(&doc)
//!         .preamble("intro")
//!         .record_count(1)
//!         .record(0, |r| {
//!             r.name("a").subtype("json").place("store").body("{}");
//!         });
//!     ```

mod assertions;

pub use assertions::{assert_doc, DocumentAssertion, RecordAssertion};
