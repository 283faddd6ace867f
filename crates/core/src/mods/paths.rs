//! Canonical form for mod file paths.
//!
//! Every path a mod contributes is compared in the form `/dir/file.ext`:
//! lower-case, `/` between segments, a single separator, and a leading `/`.
//! Directory walks and archive listings both funnel through here so their
//! outputs intersect correctly.

use std::path::{Component, Path};

/// Normalize an archive entry name such as `common\Traits\x.txt` or
/// `gfx/icons/a.dds`.
pub fn normalize_entry(name: &str) -> String {
    join_segments(name.split(['/', '\\']))
}

/// Normalize `path`, a file found beneath `root`, relative to `root`.
///
/// Returns `None` when `path` does not live under `root`.
pub fn normalize_relative(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(join_segments(segments.iter().map(String::as_str)))
}

fn join_segments<'a>(segments: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for segment in segments.filter(|s| !s.is_empty() && *s != ".") {
        out.push('/');
        out.push_str(&segment.to_lowercase());
    }
    if out.is_empty() {
        out.push('/');
    }
    out
}
