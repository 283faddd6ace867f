//! Conflict detection logic.
//!
//! Given the enabled mods in load order, the detector finds every file path
//! that two mods both ship. The later mod in load order silently overrides
//! the earlier one in game, which is what the report warns about.

use serde::Serialize;
use tracing::{debug, info};

use crate::mods::Mod;

/// Metadata file present in nearly every mod; never a meaningful conflict.
pub const DESCRIPTOR_PATH: &str = "/descriptor.mod";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A path shipped by two different mods.
#[derive(Debug, Clone, Serialize)]
pub struct Conflict<'a> {
    /// The mod earlier in load order.
    #[serde(serialize_with = "serialize_mod_name")]
    pub mod_a: &'a Mod,
    /// The mod later in load order.
    #[serde(serialize_with = "serialize_mod_name")]
    pub mod_b: &'a Mod,
    /// Normalized path present in both mods.
    pub path: String,
}

impl std::fmt::Display for Conflict<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} CONFLICTS WITH {} = {}",
            self.mod_a.display_name, self.mod_b.display_name, self.path
        )
    }
}

fn serialize_mod_name<S: serde::Serializer>(m: &&Mod, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&m.display_name)
}

/// Conflicts between one pair of mods, counted.
#[derive(Debug, Clone, Serialize)]
pub struct PairSummary {
    pub mod_a: String,
    pub mod_b: String,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Detector
// ---------------------------------------------------------------------------

/// Stateless pairwise conflict detector.
pub struct ConflictDetector;

impl ConflictDetector {
    /// Compare every pair of mods and return the paths they share, minus
    /// `excluded_path`.
    ///
    /// Pairs are visited as `(0, 1), (0, 2), ..., (1, 2), ...`; within a
    /// pair, paths come out in sorted order.
    pub fn detect<'a>(mods: &'a [Mod], excluded_path: &str) -> Vec<Conflict<'a>> {
        info!(mods = mods.len(), excluded_path, "detecting conflicts");

        let mut conflicts = Vec::new();
        for (i, mod_a) in mods.iter().enumerate() {
            for mod_b in &mods[i + 1..] {
                let before = conflicts.len();
                conflicts.extend(
                    mod_a
                        .file_paths
                        .intersection(&mod_b.file_paths)
                        .filter(|path| path.as_str() != excluded_path)
                        .map(|path| Conflict {
                            mod_a,
                            mod_b,
                            path: path.clone(),
                        }),
                );
                let found = conflicts.len() - before;
                if found > 0 {
                    debug!(
                        mod_a = %mod_a.display_name,
                        mod_b = %mod_b.display_name,
                        count = found,
                        "mods overlap"
                    );
                }
            }
        }

        info!(count = conflicts.len(), "conflict detection complete");
        conflicts
    }

    /// Group conflicts by mod pair, keeping the pair order of `conflicts`.
    ///
    /// Pairs are told apart by the identity of the borrowed mods, so a mod
    /// listed twice still yields one row per pair.
    pub fn summarize(conflicts: &[Conflict<'_>]) -> Vec<PairSummary> {
        let mut pairs: Vec<(&Mod, &Mod, usize)> = Vec::new();
        for conflict in conflicts {
            let existing = pairs.iter_mut().find(|(a, b, _)| {
                std::ptr::eq(*a, conflict.mod_a) && std::ptr::eq(*b, conflict.mod_b)
            });
            match existing {
                Some((_, _, count)) => *count += 1,
                None => pairs.push((conflict.mod_a, conflict.mod_b, 1)),
            }
        }

        pairs
            .into_iter()
            .map(|(mod_a, mod_b, count)| PairSummary {
                mod_a: mod_a.display_name.clone(),
                mod_b: mod_b.display_name.clone(),
                count,
            })
            .collect()
    }
}
