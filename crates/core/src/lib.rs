//! modclash core library.
//!
//! This crate provides the foundational components for finding file
//! conflicts between Paradox game mods: a parser for the game's script
//! format, mod descriptor resolution, pairwise conflict detection, report
//! writing, and configuration.

pub mod config;
pub mod conflict;
pub mod errors;
pub mod mods;
pub mod script;

// Re-exports for convenience.
pub use config::AppConfig;
pub use conflict::{Conflict, ConflictDetector};
pub use mods::{Mod, ModScanner};
pub use script::{parse, Document, Element};
