//! Enabled mods and the files they contribute.
//!
//! A settings file lists descriptor locators; each descriptor names either a
//! directory or a zip archive. The scanner turns every locator into a [`Mod`]
//! whose file set is in canonical path form (see [`paths`]).

pub mod descriptor;
pub mod paths;
pub mod scanner;
pub mod source;

pub use descriptor::ModDescriptor;
pub use scanner::{enabled_mods, Mod, ModScanner};
pub use source::{ArchiveLister, FileEnumerator, ModSource, WalkDirEnumerator, ZipLister};
