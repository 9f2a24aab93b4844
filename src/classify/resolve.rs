use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::NAMESPACE_SEPARATOR;
use crate::scanner::is_readable;

/// Environment variable holding extra library roots.
pub const LIBRARY_PATH_ENV: &str = "PERL5LIB";

/// Maps module identifiers like `Foo::Bar` to files under library search roots.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    roots: Vec<PathBuf>,
    module_extension: String,
}

impl ModuleResolver {
    #[must_use]
    pub fn new(roots: Vec<PathBuf>, module_extension: impl Into<String>) -> Self {
        Self {
            roots,
            module_extension: module_extension.into(),
        }
    }

    #[must_use]
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Resolve a literal path or a namespaced module identifier.
    ///
    /// Literal paths (no `::`, or an existing file) come back unchanged. Identifiers
    /// resolve to the first existing, readable `root/Seg1/.../Last.<ext>`; when none
    /// exists the identifier is returned unchanged and the miss surfaces later as
    /// file-not-found.
    #[must_use]
    pub fn resolve(&self, target: &str) -> PathBuf {
        if !target.contains(NAMESPACE_SEPARATOR) || Path::new(target).exists() {
            return PathBuf::from(target);
        }

        let relative = self.relative_path(target);
        for root in &self.roots {
            let candidate = root.join(&relative);
            if candidate.is_file() && is_readable(&candidate) {
                tracing::debug!(module = target, path = %candidate.display(), "resolved module");
                return candidate;
            }
        }

        tracing::debug!(module = target, "module not found under library roots");
        PathBuf::from(target)
    }

    fn relative_path(&self, identifier: &str) -> PathBuf {
        let mut path: PathBuf = identifier.split(NAMESPACE_SEPARATOR).collect();
        path.set_extension(&self.module_extension);
        path
    }
}

/// Library roots: configured entries first, then entries of `PERL5LIB`.
#[must_use]
pub fn library_roots_from_env(configured: &[PathBuf], env_value: Option<&OsStr>) -> Vec<PathBuf> {
    let mut roots = configured.to_vec();
    if let Some(value) = env_value {
        roots.extend(std::env::split_paths(value).filter(|p| !p.as_os_str().is_empty()));
    }
    roots
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
