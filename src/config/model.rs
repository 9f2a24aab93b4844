use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Supported config version.
pub const CONFIG_VERSION: &str = "1";

/// Default minimum coverage percentage for `cover`.
pub const DEFAULT_COVER_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Config schema version. Only "1" (or missing) is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default)]
    pub interpreter: InterpreterConfig,

    #[serde(default)]
    pub checks: ChecksConfig,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub coverage: CoverageConfig,
}

/// The interpreter used for syntax checks and coverage runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Interpreter binary (name looked up on PATH, or explicit path).
    #[serde(default = "default_interpreter")]
    pub path: PathBuf,

    /// Interpreter name matched in shebang lines.
    #[serde(default = "default_interpreter_name")]
    pub name: String,

    /// Library search roots, searched before `PERL5LIB`.
    #[serde(default)]
    pub lib: Vec<PathBuf>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            path: default_interpreter(),
            name: default_interpreter_name(),
            lib: Vec::new(),
        }
    }
}

/// Which checks `all` runs per file, and pragma detection extras.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ChecksConfig {
    #[serde(default = "default_true")]
    pub syntax: bool,

    #[serde(default = "default_true")]
    pub strict: bool,

    #[serde(default)]
    pub warnings: bool,

    /// Whether the target runtime supports the warnings pragma at all.
    /// When false, warnings checks are reported as skipped.
    #[serde(default = "default_true")]
    pub warnings_pragma: bool,

    /// Extra modules whose `use` enables strict.
    #[serde(default)]
    pub strict_modules: Vec<String>,

    /// Extra modules whose `use` enables warnings.
    #[serde(default)]
    pub warnings_modules: Vec<String>,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            syntax: true,
            strict: true,
            warnings: false,
            warnings_pragma: true,
            strict_modules: Vec::new(),
            warnings_modules: Vec::new(),
        }
    }
}

/// File discovery and classification settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Directory names whose subtrees are never walked.
    #[serde(default = "default_vcs_dirs")]
    pub vcs_dirs: Vec<String>,

    /// Files skipped by `all` and `cover` (glob patterns or path suffixes).
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default = "default_module_extensions")]
    pub module_extensions: Vec<String>,

    #[serde(default = "default_script_extensions")]
    pub script_extensions: Vec<String>,

    #[serde(default = "default_test_extensions")]
    pub test_extensions: Vec<String>,

    /// Treat paths containing `::` as module identifiers.
    #[serde(default = "default_true")]
    pub namespaced_modules: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            vcs_dirs: default_vcs_dirs(),
            exclude: Vec::new(),
            module_extensions: default_module_extensions(),
            script_extensions: default_script_extensions(),
            test_extensions: default_test_extensions(),
            namespaced_modules: true,
        }
    }
}

/// Coverage run settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageConfig {
    /// Explicit coverage tool path; skips the PATH lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<PathBuf>,

    /// Binary name searched on PATH when `tool` is unset.
    #[serde(default = "default_tool_name")]
    pub tool_name: String,

    /// Minimum aggregate coverage percentage.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Interpreter flag that loads the instrumentation module.
    #[serde(default = "default_instrumentation")]
    pub instrumentation: String,
}

impl Default for CoverageConfig {
    fn default() -> Self {
        Self {
            tool: None,
            tool_name: default_tool_name(),
            threshold: DEFAULT_COVER_THRESHOLD,
            instrumentation: default_instrumentation(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_interpreter() -> PathBuf {
    PathBuf::from("perl")
}

fn default_interpreter_name() -> String {
    "perl".to_string()
}

fn default_vcs_dirs() -> Vec<String> {
    ["CVS", ".svn", ".git", ".hg", ".bzr", "_darcs"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_module_extensions() -> Vec<String> {
    vec!["pm".to_string()]
}

fn default_script_extensions() -> Vec<String> {
    vec!["pl".to_string()]
}

fn default_test_extensions() -> Vec<String> {
    vec!["t".to_string()]
}

fn default_tool_name() -> String {
    "cover".to_string()
}

const fn default_threshold() -> f64 {
    DEFAULT_COVER_THRESHOLD
}

fn default_instrumentation() -> String {
    "-MDevel::Cover".to_string()
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
