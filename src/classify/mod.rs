//! Module/script classification and module-identifier resolution.

mod resolve;

pub use resolve::{LIBRARY_PATH_ENV, ModuleResolver, library_roots_from_env};

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use regex::Regex;

use crate::config::ScannerConfig;
use crate::error::{Result, StrictGuardError};

/// Separator between segments of a namespaced module identifier.
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Upper bound on bytes read when looking for a shebang line.
const FIRST_LINE_LIMIT: u64 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Module,
    Script,
    Both,
    Neither,
}

impl FileKind {
    #[must_use]
    pub const fn from_flags(is_module: bool, is_script: bool) -> Self {
        match (is_module, is_script) {
            (true, true) => Self::Both,
            (true, false) => Self::Module,
            (false, true) => Self::Script,
            (false, false) => Self::Neither,
        }
    }

    #[must_use]
    pub const fn is_module(self) -> bool {
        matches!(self, Self::Module | Self::Both)
    }

    #[must_use]
    pub const fn is_script(self) -> bool {
        matches!(self, Self::Script | Self::Both)
    }

    #[must_use]
    pub const fn is_source(self) -> bool {
        !matches!(self, Self::Neither)
    }
}

/// Decides whether a file is a library module, an executable script, both or neither.
///
/// Classification is recomputed on every call; files may be regenerated between calls.
#[derive(Debug, Clone)]
pub struct FileClassifier {
    module_extensions: Vec<String>,
    script_extensions: Vec<String>,
    namespaced_modules: bool,
    shebang: Regex,
}

impl FileClassifier {
    /// Build a classifier from scanner settings and the interpreter name.
    ///
    /// # Errors
    /// Returns an error if the shebang pattern built from `interpreter_name` is invalid.
    pub fn new(scanner: &ScannerConfig, interpreter_name: &str) -> Result<Self> {
        let mut script_extensions = scanner.script_extensions.clone();
        script_extensions.extend(scanner.test_extensions.iter().cloned());

        Ok(Self {
            module_extensions: scanner.module_extensions.clone(),
            script_extensions,
            namespaced_modules: scanner.namespaced_modules,
            shebang: shebang_regex(interpreter_name)?,
        })
    }

    #[must_use]
    pub fn is_module(&self, path: &Path) -> bool {
        if has_extension(path, &self.module_extensions) {
            return true;
        }
        self.namespaced_modules && path.to_string_lossy().contains(NAMESPACE_SEPARATOR)
    }

    /// Script by extension; only when no name rule matches is the first line consulted.
    #[must_use]
    pub fn is_script(&self, path: &Path) -> bool {
        if has_extension(path, &self.script_extensions) {
            return true;
        }
        first_line(path).is_some_and(|line| self.shebang.is_match(&line))
    }

    #[must_use]
    pub fn classify(&self, path: &Path) -> FileKind {
        let kind = FileKind::from_flags(self.is_module(path), self.is_script(path));
        tracing::trace!(path = %path.display(), ?kind, "classified");
        kind
    }

    /// `is_module OR is_script`.
    #[must_use]
    pub fn is_source(&self, path: &Path) -> bool {
        self.is_module(path) || self.is_script(path)
    }

    /// The shebang pattern this classifier uses (`^#!.*\b<interpreter>[\d.]*\b`).
    #[must_use]
    pub const fn shebang(&self) -> &Regex {
        &self.shebang
    }
}

/// Build the shebang pattern for an interpreter name.
///
/// A trailing version (`perl5`, `perl5.36`) still names the interpreter.
///
/// # Errors
/// Returns an error if the resulting pattern does not compile.
pub fn shebang_regex(interpreter_name: &str) -> Result<Regex> {
    let pattern = format!(r"^#!.*\b{}[\d.]*\b", regex::escape(interpreter_name));
    Regex::new(&pattern).map_err(|source| StrictGuardError::InvalidRegex { pattern, source })
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Read only the first line of a file. Empty or unreadable files yield `None`.
fn first_line(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file).take(FIRST_LINE_LIMIT);
    let mut buf = Vec::new();
    let read = reader.read_until(b'\n', &mut buf).ok()?;
    if read == 0 {
        return None;
    }
    Some(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
