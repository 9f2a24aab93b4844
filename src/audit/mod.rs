//! Check entry points: single-file checks, the project sweep and the coverage gate.

mod context;

pub use context::{AuditContext, Environment};

use std::path::{Path, PathBuf};

use crate::coverage::{CoverOutcome, CoverageAggregator, Instrumentation};
use crate::error::{Result, StrictGuardError};
use crate::output::CoverageProgress;
use crate::pragma::{PragmaKind, PragmaScanner, ScanOptions, ScanOutcome};
use crate::process::ProcessRunner;
use crate::report::{CheckResult, Reporter, Summary};
use crate::scanner::{FileScanner, is_readable};
use crate::syntax::SyntaxOutcome;

const WARNINGS_UNSUPPORTED: &str = "warnings pragma not supported by the target runtime";

/// Runs checks against one context and emits every result to its reporter
/// at the point of evaluation.
///
/// Per-file failures are reported, never returned as `Err`; `Err` is reserved
/// for reporter I/O, plan misuse and a failed coverage reset.
pub struct Auditor<'a, R: Reporter, P: ProcessRunner> {
    context: &'a AuditContext,
    reporter: R,
    runner: P,
    quiet: bool,
}

impl<'a, R: Reporter, P: ProcessRunner> Auditor<'a, R, P> {
    #[must_use]
    pub const fn new(context: &'a AuditContext, reporter: R, runner: P) -> Self {
        Self {
            context,
            reporter,
            runner,
            quiet: false,
        }
    }

    /// Hide the coverage progress bar.
    #[must_use]
    pub const fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    #[must_use]
    pub const fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn into_reporter(self) -> R {
        self.reporter
    }

    /// # Errors
    /// Returns `Plan` if a plan was already declared or results were emitted.
    pub fn plan(&mut self, count: usize) -> Result<()> {
        self.reporter.plan(count)
    }

    /// # Errors
    /// Returns an error if the reporter cannot write.
    pub fn note(&mut self, message: &str) -> Result<()> {
        self.reporter.note(message)
    }

    /// # Errors
    /// Returns an error if the reporter cannot write.
    pub fn finish(&mut self) -> Result<Summary> {
        self.reporter.finish()
    }

    /// Compile-check a file or module identifier.
    ///
    /// # Errors
    /// Returns an error only if the reporter cannot write.
    pub fn syntax_ok(&mut self, target: &str, label: Option<&str>) -> Result<CheckResult> {
        let path = self.context.resolver().resolve(target);
        self.syntax_ok_at(&path, label)
    }

    /// Look for `use strict` (or an equivalent) in a file or module identifier.
    ///
    /// # Errors
    /// Returns an error only if the reporter cannot write.
    pub fn strict_ok(&mut self, target: &str, label: Option<&str>) -> Result<CheckResult> {
        let path = self.context.resolver().resolve(target);
        self.strict_ok_at(&path, label)
    }

    /// Look for `use warnings` (or an equivalent, or a `-w` shebang flag on scripts).
    ///
    /// Reported as skipped, without reading the file, when the target runtime
    /// has no warnings pragma.
    ///
    /// # Errors
    /// Returns an error only if the reporter cannot write.
    pub fn warnings_ok(&mut self, target: &str, label: Option<&str>) -> Result<CheckResult> {
        let path = self.context.resolver().resolve(target);
        self.warnings_ok_at(&path, label)
    }

    /// Run the configured per-file checks over every module and script under `dirs`.
    ///
    /// With no `dirs`, the parent of the script's directory is swept (`.` without
    /// a script). Files are checked in discovery order; for each file syntax runs
    /// before the pragma checks.
    /// Returns whether no check failed.
    ///
    /// # Errors
    /// Returns an error only if the reporter cannot write.
    pub fn all_perl_files_ok(&mut self, dirs: &[PathBuf]) -> Result<bool> {
        let roots = self.context.sweep_roots(dirs);
        let files = self.perl_files(&roots)?;
        let checks = self.context.config().checks.clone();
        tracing::info!(roots = ?roots, files = files.len(), "checking perl files");

        let mut all_ok = true;
        for file in &files {
            if checks.syntax {
                all_ok &= !self.syntax_ok_at(file, None)?.is_fail();
            }
            if checks.strict {
                all_ok &= !self.strict_ok_at(file, None)?.is_fail();
            }
            if checks.warnings {
                all_ok &= !self.warnings_ok_at(file, None)?.is_fail();
            }
        }
        Ok(all_ok)
    }

    /// Run every script under `dirs` with coverage instrumentation and gate on the total.
    ///
    /// `threshold` and `dirs` fall back to the configured threshold and the origin
    /// directory. The invoking script and excluded files are left out. A missing
    /// coverage tool is reported as a skip.
    ///
    /// # Errors
    /// Returns `CoverageReset` if the tool cannot reset its database, or an error if
    /// the reporter cannot write.
    pub fn all_cover_ok(&mut self, threshold: Option<f64>, dirs: &[PathBuf]) -> Result<CoverOutcome> {
        let context = self.context;
        let config = context.config();
        let threshold = threshold.unwrap_or(config.coverage.threshold);

        let Some(tool) = context.coverage_tool() else {
            self.emit(CheckResult::skip(
                "Coverage",
                format!("coverage tool '{}' not found", config.coverage.tool_name),
            ))?;
            return Ok(CoverOutcome::ToolMissing);
        };

        let roots = if dirs.is_empty() {
            vec![context.origin_dir()]
        } else {
            dirs.to_vec()
        };
        let scripts: Vec<PathBuf> = context
            .directory_scanner()
            .scan_all(&roots)?
            .into_iter()
            .filter(|path| context.classifier().is_script(path))
            .filter(|path| !context.is_self(path))
            .collect();
        tracing::info!(tool = %tool.display(), files = scripts.len(), threshold, "coverage sweep");

        let instrumentation = Instrumentation {
            interpreter: &config.interpreter.path,
            lib: context.resolver().roots(),
            flag: &config.coverage.instrumentation,
        };
        let progress = CoverageProgress::new(scripts.len() as u64, self.quiet);
        let aggregator = CoverageAggregator::new(&self.runner, tool, instrumentation);
        let run = aggregator.run(&scripts, threshold, &mut self.reporter, &progress)?;
        Ok(CoverOutcome::Completed(run))
    }

    fn perl_files(&self, roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let classifier = self.context.classifier();
        Ok(self
            .context
            .directory_scanner()
            .scan_all(roots)?
            .into_iter()
            .filter(|path| classifier.is_source(path))
            .collect())
    }

    fn syntax_ok_at(&mut self, path: &Path, label: Option<&str>) -> Result<CheckResult> {
        let label = label.map_or_else(|| format!("Syntax check {}", path.display()), str::to_string);
        if let Some(problem) = access_problem(path) {
            return self.emit(CheckResult::fail(label, problem));
        }
        if !self.context.classifier().is_source(path) {
            return self.emit(CheckResult::fail(
                label,
                format!("{} is not a perl module or a perl script", path.display()),
            ));
        }

        let result = match self
            .context
            .syntax_checker()
            .check(&self.runner, path)
        {
            Ok(SyntaxOutcome::Valid) => CheckResult::pass(label),
            Ok(SyntaxOutcome::Invalid { output }) => CheckResult::fail(label, output),
            Err(err) => CheckResult::fail(label, describe(&err)),
        };
        self.emit(result)
    }

    fn strict_ok_at(&mut self, path: &Path, label: Option<&str>) -> Result<CheckResult> {
        let label = label.map_or_else(|| format!("use strict   {}", path.display()), str::to_string);
        let context = self.context;
        let result = scan(context.strict_scanner(), path, label, ScanOptions::default());
        self.emit(result)
    }

    fn warnings_ok_at(&mut self, path: &Path, label: Option<&str>) -> Result<CheckResult> {
        let label = label.map_or_else(|| format!("use warnings {}", path.display()), str::to_string);
        let context = self.context;
        if !context.config().checks.warnings_pragma {
            return self.emit(CheckResult::skip(label, WARNINGS_UNSUPPORTED));
        }
        let options = ScanOptions {
            check_shebang_flag: context.classifier().is_script(path),
        };
        let result = scan(context.warnings_scanner(), path, label, options);
        self.emit(result)
    }

    fn emit(&mut self, result: CheckResult) -> Result<CheckResult> {
        self.reporter.report(&result)?;
        Ok(result)
    }
}

fn scan(scanner: &PragmaScanner, path: &Path, label: String, options: ScanOptions) -> CheckResult {
    if let Some(problem) = access_problem(path) {
        return CheckResult::fail(label, problem);
    }
    match scanner.scan_file(path, options) {
        Ok(ScanOutcome::Found { .. } | ScanOutcome::ShebangFlag) => CheckResult::pass(label),
        Ok(ScanOutcome::NotFound { lines_scanned }) => CheckResult::fail(
            label,
            missing_pragma(scanner.pattern().kind(), path, lines_scanned),
        ),
        Err(err) => CheckResult::fail(label, describe(&err)),
    }
}

fn access_problem(path: &Path) -> Option<String> {
    if !path.exists() {
        return Some(format!("{} does not exist", path.display()));
    }
    if !is_readable(path) {
        return Some(format!("{} is not readable", path.display()));
    }
    None
}

fn missing_pragma(kind: PragmaKind, path: &Path, lines_scanned: usize) -> String {
    format!(
        "use {kind} not found in {} ({lines_scanned} lines scanned)",
        path.display()
    )
}

fn describe(err: &StrictGuardError) -> String {
    match err.detail() {
        Some(detail) => format!("{err}: {detail}"),
        None => err.to_string(),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
