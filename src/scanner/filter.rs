use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, StrictGuardError};
use crate::path_utils::path_matches_suffix;

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;
}

impl<T: FileFilter + ?Sized> FileFilter for &T {
    fn should_include(&self, path: &Path) -> bool {
        (**self).should_include(path)
    }
}

/// Accepts every path.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl FileFilter for AcceptAll {
    fn should_include(&self, _path: &Path) -> bool {
        true
    }
}

/// Drops files named by the sweep exclusion list.
///
/// Each entry is tried both as a glob and as a trailing path suffix, so
/// `"lib/Legacy.pm"` excludes `./lib/Legacy.pm` and `"t/author/**"` excludes
/// every file under that directory.
pub struct ExcludeFilter {
    entries: Vec<String>,
    globs: GlobSet,
}

impl ExcludeFilter {
    /// Create a filter from exclusion entries.
    ///
    /// # Errors
    /// Returns an error if any entry is not a valid glob.
    pub fn new(entries: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in entries {
            let glob = Glob::new(pattern).map_err(|e| StrictGuardError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let globs = builder
            .build()
            .map_err(|e| StrictGuardError::InvalidPattern {
                pattern: "combined patterns".to_string(),
                source: e,
            })?;

        Ok(Self {
            entries: entries.to_vec(),
            globs,
        })
    }

    #[must_use]
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.globs.is_match(path) {
            return true;
        }
        let stripped = path.strip_prefix(".").unwrap_or(path);
        if stripped != path && self.globs.is_match(stripped) {
            return true;
        }
        self.entries
            .iter()
            .any(|entry| path_matches_suffix(path, entry))
    }
}

impl FileFilter for ExcludeFilter {
    fn should_include(&self, path: &Path) -> bool {
        !self.is_excluded(path)
    }
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
