//! Output formats for parsed documents
//!
//! Each format implements [`Formatter`] and is looked up by name through a
//! [`FormatRegistry`]. Bodies are always emitted as stored; no format interprets them.

pub mod registry;
pub mod serde_formats;
pub mod space;
pub mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serde_formats::{JsonFormatter, YamlFormatter};
pub use space::SpaceFormatter;
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_options, TreevizFormatter, TreevizOptions};
