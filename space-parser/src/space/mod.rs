//! Main module for space library functionality

pub mod ast;
pub mod formats;
pub mod generation;
pub mod header;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod serializer;
pub mod testing;
