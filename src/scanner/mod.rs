//! File discovery: walks project trees and yields readable regular files.

mod filter;

pub use filter::{AcceptAll, ExcludeFilter, FileFilter};

use std::fs::File;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::path_utils::normalize_lexically;

/// Trait for scanning directories and finding files.
pub trait FileScanner {
    /// Scan a directory and return all matching file paths.
    ///
    /// # Errors
    /// Returns an error if the walk cannot be set up.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;

    /// Scan several roots in order, dropping duplicate paths.
    ///
    /// # Errors
    /// Returns an error if any individual scan fails.
    fn scan_all(&self, roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut seen = IndexSet::new();
        for root in roots {
            seen.extend(self.scan(root)?);
        }
        Ok(seen.into_iter().collect())
    }
}

/// Recursive directory walker that prunes version-control subtrees.
///
/// Entries are visited in file-name order so repeated walks report files in
/// the same sequence. Unreadable subtrees are logged and skipped.
pub struct DirectoryScanner<F: FileFilter = AcceptAll> {
    filter: F,
    vcs_dirs: Vec<String>,
}

impl DirectoryScanner<AcceptAll> {
    #[must_use]
    pub fn new(vcs_dirs: Vec<String>) -> Self {
        Self::with_filter(AcceptAll, vcs_dirs)
    }
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub const fn with_filter(filter: F, vcs_dirs: Vec<String>) -> Self {
        Self { filter, vcs_dirs }
    }

    fn is_vcs_dir(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.vcs_dirs.iter().any(|vcs| vcs == name))
    }

    fn scan_impl(&self, root: &Path) -> Vec<PathBuf> {
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_vcs_dir(e));

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() || !is_readable(entry.path()) {
                continue;
            }
            let path = normalize_lexically(entry.path());
            if self.filter.should_include(&path) {
                files.push(path);
            }
        }

        tracing::debug!(root = %root.display(), files = files.len(), "walk finished");
        files
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.scan_impl(root))
    }
}

/// Whether the current process can open `path` for reading.
#[must_use]
pub fn is_readable(path: &Path) -> bool {
    File::open(path).is_ok()
}

/// Roots a sweep walks: the given directories, or the parent of `origin_dir` when empty.
///
/// The parent default lets a test script at `t/` discover its whole project.
#[must_use]
pub fn default_roots(dirs: &[PathBuf], origin_dir: &Path) -> Vec<PathBuf> {
    if dirs.is_empty() {
        vec![normalize_lexically(&origin_dir.join(".."))]
    } else {
        dirs.to_vec()
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
