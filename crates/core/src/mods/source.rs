//! Where a mod's files come from: an unpacked directory or a zip archive.
//!
//! The scanner only talks to the [`FileEnumerator`] and [`ArchiveLister`]
//! traits, so tests and alternative front ends can substitute their own
//! listings. [`WalkDirEnumerator`] and [`ZipLister`] are the real-disk
//! defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::errors::ModError;

/// Location of a mod's content, as named by its descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "snake_case")]
pub enum ModSource {
    /// An unpacked directory (`path = "..."`).
    Directory(PathBuf),
    /// A zip archive (`archive = "..."`).
    Archive(PathBuf),
}

impl ModSource {
    pub fn location(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Archive(path) => path,
        }
    }

    /// Short label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Directory(_) => "directory",
            Self::Archive(_) => "archive",
        }
    }
}

impl std::fmt::Display for ModSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.label(), self.location().display())
    }
}

/// Lists every file beneath a directory, recursively.
pub trait FileEnumerator {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>, ModError>;
}

/// Lists the entry names stored in an archive.
pub trait ArchiveLister {
    fn entry_names(&self, archive: &Path) -> Result<Vec<String>, ModError>;
}

impl<T: FileEnumerator + ?Sized> FileEnumerator for &T {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>, ModError> {
        (**self).list_files(root)
    }
}

impl<T: ArchiveLister + ?Sized> ArchiveLister for &T {
    fn entry_names(&self, archive: &Path) -> Result<Vec<String>, ModError> {
        (**self).entry_names(archive)
    }
}

/// [`FileEnumerator`] backed by `walkdir`. Only regular files are returned.
#[derive(Debug, Clone, Default)]
pub struct WalkDirEnumerator {
    follow_links: bool,
}

impl WalkDirEnumerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also descend into symlinked directories.
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }
}

impl FileEnumerator for WalkDirEnumerator {
    fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>, ModError> {
        if !root.is_dir() {
            return Err(ModError::Walk {
                path: root.to_path_buf(),
                detail: "not a directory".into(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(self.follow_links) {
            let entry = entry.map_err(|e| ModError::Walk {
                path: root.to_path_buf(),
                detail: e.to_string(),
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        debug!(root = %root.display(), count = files.len(), "walked mod directory");
        Ok(files)
    }
}

/// [`ArchiveLister`] backed by the `zip` crate. Directory entries are
/// skipped so archive listings match directory walks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipLister;

impl ArchiveLister for ZipLister {
    fn entry_names(&self, archive: &Path) -> Result<Vec<String>, ModError> {
        let file = File::open(archive).map_err(|source| ModError::Io {
            path: archive.to_path_buf(),
            source,
        })?;
        let zip = ZipArchive::new(BufReader::new(file)).map_err(|e| ModError::Archive {
            path: archive.to_path_buf(),
            detail: e.to_string(),
        })?;

        let names: Vec<String> = zip
            .file_names()
            .filter(|name| !name.ends_with('/') && !name.ends_with('\\'))
            .map(str::to_string)
            .collect();
        debug!(archive = %archive.display(), count = names.len(), "listed mod archive");
        Ok(names)
    }
}
