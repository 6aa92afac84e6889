//! # space
//!
//! A parser for the Space record format.
//!
//! A Space document is a stream of header-delimited blocks. Each header starts with the
//! anchor glyph `⫻` followed by `name[/subtype][:place]`, and each block's body runs
//! until the next header or the end of the text:
//!
//! ```text
//! ⫻status/meta:0
//! SUCCESS. Processed inputs.
//!
//! ⫻data/json:store
//! {"processed_count": 4}
//! ```
//!
//! File Layout
//!
//!     src/space
//!       ├── ast          Records and documents
//!       ├── header       The header line grammar
//!       ├── lexing       Line classification
//!       ├── parsing      Grouping lines into records
//!       ├── serializer   Records back to text
//!       ├── formats      Output formats (json, yaml, treeviz, space)
//!       ├── loader       Reading sources from files or strings
//!       ├── generation   Boundary to generative text services
//!       └── testing      Fluent assertions for tests
//!
//! Parsing never fails: every text is a valid input. A header whose suffix does not match
//! the grammar still opens a new block, flagged with a fixed error signature.

pub mod space;

pub use space::ast::{Document, Record, RecordId};
pub use space::parsing::parse;
pub use space::serializer::serialize;
