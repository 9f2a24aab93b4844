use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::classify::{FileClassifier, LIBRARY_PATH_ENV, ModuleResolver, library_roots_from_env};
use crate::config::Config;
use crate::coverage::resolve_tool;
use crate::error::Result;
use crate::path_utils::normalize_lexically;
use crate::pragma::{PragmaPattern, PragmaScanner};
use crate::scanner::{DirectoryScanner, ExcludeFilter, default_roots};
use crate::syntax::SyntaxChecker;

/// Process environment an audit depends on.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Value of `PERL5LIB`.
    pub library_path: Option<OsString>,
    /// Value of `PATH`, searched for the coverage tool.
    pub search_path: Option<OsString>,
    /// The invoking script, if any. Anchors default sweep roots and is never covered.
    pub script: Option<PathBuf>,
}

impl Environment {
    #[must_use]
    pub fn from_process(script: Option<PathBuf>) -> Self {
        Self {
            library_path: std::env::var_os(LIBRARY_PATH_ENV),
            search_path: std::env::var_os("PATH"),
            script,
        }
    }
}

/// Everything the check entry points share: settings, compiled patterns and the
/// memoized coverage-tool lookup.
///
/// One context replaces process-wide state; two contexts never interfere.
pub struct AuditContext {
    config: Config,
    classifier: FileClassifier,
    resolver: ModuleResolver,
    strict: PragmaScanner,
    warnings: PragmaScanner,
    exclude: ExcludeFilter,
    syntax: SyntaxChecker,
    script: Option<PathBuf>,
    search_path: Option<OsString>,
    coverage_tool: OnceLock<Option<PathBuf>>,
}

impl AuditContext {
    /// # Errors
    /// Returns an error if a configured pattern (module name, exclude glob,
    /// interpreter name) does not compile.
    pub fn new(config: Config, env: Environment) -> Result<Self> {
        let classifier = FileClassifier::new(&config.scanner, &config.interpreter.name)?;
        let lib = library_roots_from_env(&config.interpreter.lib, env.library_path.as_deref());
        let module_extension = config
            .scanner
            .module_extensions
            .first()
            .cloned()
            .unwrap_or_else(|| "pm".to_string());

        let strict = PragmaScanner::new(
            PragmaPattern::strict(&config.checks.strict_modules)?,
            classifier.shebang().clone(),
        );
        let warnings = PragmaScanner::new(
            PragmaPattern::warnings(&config.checks.warnings_modules)?,
            classifier.shebang().clone(),
        );
        let exclude = ExcludeFilter::new(&config.scanner.exclude)?;
        let syntax = SyntaxChecker::new(config.interpreter.path.clone(), lib.clone());

        tracing::debug!(roots = ?lib, "library search roots");
        Ok(Self {
            resolver: ModuleResolver::new(lib, module_extension),
            config,
            classifier,
            strict,
            warnings,
            exclude,
            syntax,
            script: env.script,
            search_path: env.search_path,
            coverage_tool: OnceLock::new(),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn classifier(&self) -> &FileClassifier {
        &self.classifier
    }

    #[must_use]
    pub const fn resolver(&self) -> &ModuleResolver {
        &self.resolver
    }

    #[must_use]
    pub const fn strict_scanner(&self) -> &PragmaScanner {
        &self.strict
    }

    #[must_use]
    pub const fn warnings_scanner(&self) -> &PragmaScanner {
        &self.warnings
    }

    #[must_use]
    pub const fn syntax_checker(&self) -> &SyntaxChecker {
        &self.syntax
    }

    /// Walker honoring the configured VCS directories and exclusions.
    #[must_use]
    pub fn directory_scanner(&self) -> DirectoryScanner<&ExcludeFilter> {
        DirectoryScanner::with_filter(&self.exclude, self.config.scanner.vcs_dirs.clone())
    }

    /// Directory sweeps are anchored at: the script's directory, else `.`.
    #[must_use]
    pub fn origin_dir(&self) -> PathBuf {
        self.script
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    /// Roots for a project sweep: `dirs`, else the parent of the script's
    /// directory, else `.` when there is no invoking script.
    #[must_use]
    pub fn sweep_roots(&self, dirs: &[PathBuf]) -> Vec<PathBuf> {
        if self.script.is_none() && dirs.is_empty() {
            return vec![PathBuf::from(".")];
        }
        default_roots(dirs, &self.origin_dir())
    }

    /// Whether `path` is the invoking script.
    #[must_use]
    pub fn is_self(&self, path: &Path) -> bool {
        let Some(script) = self.script.as_deref() else {
            return false;
        };
        match (dunce::canonicalize(script), dunce::canonicalize(path)) {
            (Ok(a), Ok(b)) => a == b,
            _ => normalize_lexically(script) == normalize_lexically(path),
        }
    }

    /// Coverage tool path, resolved on first use and reused for the life of the context.
    #[must_use]
    pub fn coverage_tool(&self) -> Option<&Path> {
        self.coverage_tool
            .get_or_init(|| {
                let coverage = &self.config.coverage;
                let tool = resolve_tool(
                    coverage.tool.as_deref(),
                    &coverage.tool_name,
                    self.search_path.as_deref(),
                );
                tracing::debug!(tool = ?tool, "resolved coverage tool");
                tool
            })
            .as_deref()
    }
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
