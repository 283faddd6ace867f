//! Mod descriptor (`*.mod`) interpretation.

use std::path::Path;

use serde::Serialize;

use super::source::ModSource;
use crate::errors::ModError;
use crate::script::Document;

/// Prefix of descriptor files created for workshop subscriptions.
const WORKSHOP_PREFIX: &str = "ugc_";

/// The fields of a mod descriptor this tool cares about.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ModDescriptor {
    pub name: Option<String>,
    pub path: Option<String>,
    pub archive: Option<String>,
    pub remote_file_id: Option<String>,
    pub version: Option<String>,
    pub supported_version: Option<String>,
    pub tags: Vec<String>,
    pub dependencies: Vec<String>,
}

impl ModDescriptor {
    pub fn from_document(doc: &Document) -> Self {
        let text = |key: &str| {
            doc.value(key)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let list = |key: &str| -> Vec<String> {
            doc.get(key)
                .map(|block| block.scalar_values().map(str::to_string).collect())
                .unwrap_or_default()
        };

        Self {
            name: text("name"),
            path: text("path"),
            archive: text("archive"),
            remote_file_id: text("remote_file_id"),
            version: text("version"),
            supported_version: text("supported_version"),
            tags: list("tags"),
            dependencies: list("dependencies"),
        }
    }

    /// Where the mod's files live, relative to `base` unless the descriptor
    /// gives an absolute location. `path` takes precedence over `archive`.
    pub fn source(&self, base: &Path, locator: &str) -> Result<ModSource, ModError> {
        if let Some(path) = &self.path {
            return Ok(ModSource::Directory(base.join(path)));
        }
        if let Some(archive) = &self.archive {
            return Ok(ModSource::Archive(base.join(archive)));
        }
        Err(ModError::MissingSource {
            descriptor: locator.to_string(),
        })
    }

    /// Name shown in reports. Workshop descriptors get their remote file id
    /// appended so same-named subscriptions stay distinguishable.
    pub fn display_name(&self, locator: &str) -> Result<String, ModError> {
        let name = self.name.clone().ok_or_else(|| ModError::MissingField {
            descriptor: locator.to_string(),
            field: "name".into(),
        })?;

        match &self.remote_file_id {
            Some(id) if is_workshop_locator(locator) => Ok(format!("{} ({})", name, id)),
            _ => Ok(name),
        }
    }
}

fn is_workshop_locator(locator: &str) -> bool {
    let file_name = Path::new(locator)
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    file_name
        .get(..WORKSHOP_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(WORKSHOP_PREFIX))
}

/// Scalar entries of the block keyed `key`, e.g. the `last_mods` list of a
/// settings file.
pub fn list_entries<'a>(doc: &'a Document, key: &str) -> Option<Vec<&'a str>> {
    doc.get(key)
        .filter(|element| element.is_block())
        .map(|block| block.scalar_values().collect())
}
