//! Conflict detection and reporting.
//!
//! The conflict subsystem is responsible for:
//! 1. **Detection** -- intersecting the file sets of every pair of mods.
//! 2. **Reporting** -- writing the overlaps as text lines or JSON.

pub mod detector;
pub mod report;

pub use detector::{Conflict, ConflictDetector, PairSummary, DESCRIPTOR_PATH};
pub use report::{write_report, write_report_file, ReportFormat};
