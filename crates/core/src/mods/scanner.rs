//! Turns the enabled-mod list of a settings file into [`Mod`] records.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::descriptor::{list_entries, ModDescriptor};
use super::paths::{normalize_entry, normalize_relative};
use super::source::{ArchiveLister, FileEnumerator, ModSource, WalkDirEnumerator, ZipLister};
use crate::errors::ModError;
use crate::script::{parse_file, Document};

/// One enabled mod and the files it ships.
#[derive(Debug, Clone, Serialize)]
pub struct Mod {
    /// Descriptor locator as listed in the settings file.
    pub identifier: String,
    /// Name used in reports.
    pub display_name: String,
    /// Where the files were read from, when known.
    pub source: Option<ModSource>,
    /// Normalized file paths (`/dir/file.ext`).
    pub file_paths: BTreeSet<String>,
}

impl Mod {
    /// Build a mod from raw paths; each is brought into canonical form.
    pub fn new<I, S>(identifier: impl Into<String>, display_name: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            source: None,
            file_paths: paths.into_iter().map(|p| normalize_entry(p.as_ref())).collect(),
        }
    }

    pub fn with_source(mut self, source: ModSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn file_count(&self) -> usize {
        self.file_paths.len()
    }
}

/// Descriptor locators listed under `list_key` in a settings document, in
/// load order.
pub fn enabled_mods(settings: &Document, list_key: &str) -> Result<Vec<String>, ModError> {
    let entries = list_entries(settings, list_key).ok_or_else(|| ModError::MissingModList {
        key: list_key.to_string(),
    })?;
    Ok(entries.into_iter().map(str::to_string).collect())
}

/// Resolves mod descriptors beneath a game user directory.
pub struct ModScanner<E = WalkDirEnumerator, A = ZipLister> {
    user_dir: PathBuf,
    enumerator: E,
    lister: A,
}

impl ModScanner {
    /// Scanner over the real filesystem.
    pub fn new(user_dir: impl Into<PathBuf>) -> Self {
        Self::with_sources(user_dir, WalkDirEnumerator::new(), ZipLister)
    }
}

impl<E: FileEnumerator, A: ArchiveLister> ModScanner<E, A> {
    pub fn with_sources(user_dir: impl Into<PathBuf>, enumerator: E, lister: A) -> Self {
        Self {
            user_dir: user_dir.into(),
            enumerator,
            lister,
        }
    }

    pub fn user_dir(&self) -> &Path {
        &self.user_dir
    }

    /// Parse one descriptor and collect the files its mod provides.
    pub fn resolve(&self, locator: &str) -> Result<Mod, ModError> {
        let descriptor_path = self.user_dir.join(locator);
        let doc = parse_file(&descriptor_path).map_err(|source| ModError::Descriptor {
            descriptor: locator.to_string(),
            source,
        })?;
        let descriptor = ModDescriptor::from_document(&doc);

        let display_name = descriptor.display_name(locator)?;
        let source = descriptor.source(&self.user_dir, locator)?;
        let file_paths = self.collect_files(&source)?;

        info!(
            mod_name = %display_name,
            source = %source,
            files = file_paths.len(),
            "resolved mod"
        );

        Ok(Mod {
            identifier: locator.to_string(),
            display_name,
            source: Some(source),
            file_paths,
        })
    }

    /// Normalized file set for a mod source.
    pub fn collect_files(&self, source: &ModSource) -> Result<BTreeSet<String>, ModError> {
        match source {
            ModSource::Directory(root) => {
                let files = self.enumerator.list_files(root)?;
                Ok(files
                    .iter()
                    .filter_map(|file| {
                        let normalized = normalize_relative(root, file);
                        if normalized.is_none() {
                            debug!(file = %file.display(), "skipping file outside mod root");
                        }
                        normalized
                    })
                    .collect())
            }
            ModSource::Archive(archive) => {
                let names = self.lister.entry_names(archive)?;
                Ok(names.iter().map(|name| normalize_entry(name)).collect())
            }
        }
    }

    /// Resolve every enabled mod in `settings`. The first failure aborts the
    /// scan.
    pub fn scan(&self, settings: &Document, list_key: &str) -> Result<Vec<Mod>, ModError> {
        let locators = enabled_mods(settings, list_key)?;
        info!(
            user_dir = %self.user_dir.display(),
            count = locators.len(),
            "scanning enabled mods"
        );
        locators.iter().map(|locator| self.resolve(locator)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse;
    use std::collections::HashMap;

    /// In-memory listings keyed by absolute location.
    #[derive(Default)]
    struct FakeSources {
        dirs: HashMap<PathBuf, Vec<PathBuf>>,
        archives: HashMap<PathBuf, Vec<String>>,
    }

    impl FileEnumerator for FakeSources {
        fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>, ModError> {
            self.dirs.get(root).cloned().ok_or_else(|| ModError::Walk {
                path: root.to_path_buf(),
                detail: "missing".into(),
            })
        }
    }

    impl ArchiveLister for FakeSources {
        fn entry_names(&self, archive: &Path) -> Result<Vec<String>, ModError> {
            self.archives.get(archive).cloned().ok_or_else(|| ModError::Archive {
                path: archive.to_path_buf(),
                detail: "missing".into(),
            })
        }
    }

    #[test]
    fn test_mod_new_normalizes() {
        let m = Mod::new("mod/a.mod", "A", ["Common\\X.txt", "/descriptor.mod"]);
        assert!(m.file_paths.contains("/common/x.txt"));
        assert!(m.file_paths.contains("/descriptor.mod"));
        assert_eq!(m.file_count(), 2);
    }

    #[test]
    fn test_enabled_mods_in_order() {
        let settings = parse(r#"language="l_english" last_mods={ "mod/b.mod" "mod/a.mod" }"#);
        let mods = enabled_mods(&settings, "last_mods").unwrap();
        assert_eq!(mods, vec!["mod/b.mod", "mod/a.mod"]);
    }

    #[test]
    fn test_enabled_mods_missing_list() {
        let settings = parse(r#"language="l_english""#);
        let err = enabled_mods(&settings, "last_mods").unwrap_err();
        assert!(matches!(err, ModError::MissingModList { .. }));
    }

    #[test]
    fn test_collect_files_from_fake_sources() {
        let root = PathBuf::from("/user/mod/a");
        let archive = PathBuf::from("/user/mod/b.zip");
        let mut fake = FakeSources::default();
        fake.dirs.insert(
            root.clone(),
            vec![root.join("Common").join("A.txt"), PathBuf::from("/elsewhere/x")],
        );
        fake.archives
            .insert(archive.clone(), vec!["common\\a.TXT".into(), "descriptor.mod".into()]);

        let scanner = ModScanner::with_sources("/user", &fake, &fake);
        let dir_files = scanner
            .collect_files(&ModSource::Directory(root))
            .unwrap();
        assert_eq!(dir_files.into_iter().collect::<Vec<_>>(), vec!["/common/a.txt"]);

        let zip_files = scanner.collect_files(&ModSource::Archive(archive)).unwrap();
        assert!(zip_files.contains("/common/a.txt"));
        assert!(zip_files.contains("/descriptor.mod"));
    }

    #[test]
    fn test_resolve_directory_mod() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path();
        std::fs::create_dir_all(user.join("mod/local/events")).unwrap();
        std::fs::write(user.join("mod/local/events/Story.txt"), "").unwrap();
        std::fs::write(user.join("mod/local/descriptor.mod"), "").unwrap();
        std::fs::write(
            user.join("mod/local.mod"),
            "name=\"Local Story\"\npath=\"mod/local\"\n",
        )
        .unwrap();

        let scanner = ModScanner::new(user);
        let m = scanner.resolve("mod/local.mod").unwrap();
        assert_eq!(m.display_name, "Local Story");
        assert_eq!(m.identifier, "mod/local.mod");
        assert!(matches!(m.source, Some(ModSource::Directory(_))));
        assert_eq!(
            m.file_paths.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["/descriptor.mod", "/events/story.txt"]
        );
    }

    #[test]
    fn test_resolve_byte_order_mark_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let user = dir.path();
        std::fs::create_dir_all(user.join("mod/x/common")).unwrap();
        std::fs::write(user.join("mod/x/common/traits.txt"), "").unwrap();
        std::fs::write(
            user.join("mod/x.mod"),
            "\u{feff}name=\"Bom Mod\"\npath=\"mod/x\"\n",
        )
        .unwrap();
        std::fs::write(
            user.join("settings.txt"),
            "\u{feff}last_mods={ \"mod/x.mod\" }\n",
        )
        .unwrap();

        let settings = parse_file(user.join("settings.txt")).unwrap();
        let mods = ModScanner::new(user).scan(&settings, "last_mods").unwrap();
        assert_eq!(mods.len(), 1);
        assert_eq!(mods[0].display_name, "Bom Mod");
        assert!(mods[0].file_paths.contains("/common/traits.txt"));
    }

    #[test]
    fn test_resolve_without_source_aborts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("mod")).unwrap();
        std::fs::write(dir.path().join("mod/broken.mod"), "name=\"Broken\"").unwrap();

        let scanner = ModScanner::new(dir.path());
        let settings = parse(r#"last_mods={ "mod/broken.mod" }"#);
        let err = scanner.scan(&settings, "last_mods").unwrap_err();
        assert!(matches!(err, ModError::MissingSource { .. }));
    }

    #[test]
    fn test_resolve_missing_descriptor() {
        let dir = tempfile::tempdir().unwrap();
        let scanner = ModScanner::new(dir.path());
        let err = scanner.resolve("mod/nope.mod").unwrap_err();
        assert!(matches!(err, ModError::Descriptor { .. }));
    }
}
