//! Document loading utilities
//!
//! `DocumentLoader` reads Space source from a file or a string and hands out the parse
//! stages. It is used by the CLI and by tests.
//!
//! ```rust,ignore
//! use space_parser::space::loader::DocumentLoader;
//!
//! let doc = DocumentLoader::from_path("notes.space")?.parse();
//! let lines = DocumentLoader::from_string("⫻a\nbody").tokenize();
//! ```

use crate::space::ast::Document;
use crate::space::lexing::{tokenize, LineToken};
use crate::space::parsing::parse;
use std::fs;
use std::path::Path;

/// Error that can occur when loading documents
#[derive(Debug, Clone)]
pub enum LoaderError {
    /// IO error when reading file
    IoError(String),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

/// Source text plus shortcuts to the parse stages
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let source = fs::read_to_string(path)?;
        Ok(DocumentLoader { source })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn into_source(self) -> String {
        self.source
    }

    /// Classify every source line
    pub fn tokenize(&self) -> Vec<LineToken<'_>> {
        tokenize(&self.source)
    }

    /// Parse the source into a document
    pub fn parse(&self) -> Document {
        parse(&self.source)
    }
}
