//! Paradox script: the nesting `key = value` text format used by game
//! settings and mod descriptors.
//!
//! The subsystem is split into:
//! 1. **Element** -- the tagged tree node.
//! 2. **Document** -- top-level elements with case-insensitive lookup.
//! 3. **Parser** -- single-pass recursive descent over a character stream.

pub mod document;
pub mod element;
pub mod parser;

pub use document::Document;
pub use element::Element;
pub use parser::{decode, parse, parse_file, parse_reader, parse_strict, Parser, MAX_DEPTH};
