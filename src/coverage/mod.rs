//! Coverage sweep: reset the database, run each file instrumented, read the total.

mod report;
mod tool;

pub use report::{meets_threshold, parse_total};
pub use tool::{find_on_path, resolve_tool};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{Result, StrictGuardError};
use crate::output::CoverageProgress;
use crate::process::ProcessRunner;
use crate::report::{CheckResult, Reporter};

/// Tool argument that wipes previously collected data.
pub const RESET_ARG: &str = "-delete";

/// One instrumented run of a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRun {
    pub path: PathBuf,
    pub success: bool,
}

/// Result of a completed sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRun {
    pub files: Vec<FileRun>,
    /// Aggregate percentage; `None` when the report had no usable `Total` line.
    pub total: Option<f64>,
    pub threshold: f64,
}

impl CoverageRun {
    /// A total was parsed and it meets the threshold.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.total
            .is_some_and(|total| meets_threshold(total, self.threshold))
    }
}

/// What `all_cover_ok` ended with.
#[derive(Debug, Clone, PartialEq)]
pub enum CoverOutcome {
    /// No coverage tool could be resolved; the sweep was skipped.
    ToolMissing,
    Completed(CoverageRun),
}

impl CoverOutcome {
    #[must_use]
    pub fn total(&self) -> Option<f64> {
        match self {
            Self::ToolMissing => None,
            Self::Completed(run) => run.total,
        }
    }
}

/// Interpreter settings shared by every instrumented run.
#[derive(Debug, Clone)]
pub struct Instrumentation<'a> {
    pub interpreter: &'a Path,
    pub lib: &'a [PathBuf],
    /// Flag that loads the instrumentation module, e.g. `-MDevel::Cover`.
    pub flag: &'a str,
}

impl Instrumentation<'_> {
    #[must_use]
    pub fn args(&self, file: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self
            .lib
            .iter()
            .map(|root| {
                let mut arg = OsString::from("-I");
                arg.push(root);
                arg
            })
            .collect();
        args.push(OsString::from(self.flag));
        args.push(file.as_os_str().to_owned());
        args
    }
}

/// Drives one coverage sweep, strictly in sequence.
pub struct CoverageAggregator<'a, P: ProcessRunner> {
    runner: &'a P,
    tool: &'a Path,
    instrumentation: Instrumentation<'a>,
}

impl<'a, P: ProcessRunner> CoverageAggregator<'a, P> {
    #[must_use]
    pub const fn new(runner: &'a P, tool: &'a Path, instrumentation: Instrumentation<'a>) -> Self {
        Self {
            runner,
            tool,
            instrumentation,
        }
    }

    /// Reset, run every file, read the report and gate on `threshold`.
    ///
    /// Every step emits its result to `reporter` as it completes. Spawn failures
    /// of individual files are recorded and the sweep continues.
    ///
    /// # Errors
    /// Returns `CoverageReset` if the reset step fails; no results are emitted then.
    /// Reporter I/O errors are propagated.
    pub fn run<R: Reporter>(
        &self,
        files: &[PathBuf],
        threshold: f64,
        reporter: &mut R,
        progress: &CoverageProgress,
    ) -> Result<CoverageRun> {
        self.reset()?;

        let mut file_runs = Vec::with_capacity(files.len());
        for file in files {
            progress.start_file(&file.display().to_string());
            let run = self.run_file(file);
            progress.inc();
            reporter.report(&run)?;
            file_runs.push(FileRun {
                path: file.clone(),
                success: run.is_pass(),
            });
        }
        progress.finish();

        let report = self.capture_report();
        let text = match report {
            Ok(text) => {
                reporter.report(&CheckResult::pass("Coverage report"))?;
                Some(text)
            }
            Err(diagnostic) => {
                reporter.report(&CheckResult::fail("Coverage report", diagnostic))?;
                None
            }
        };

        let total = text.as_deref().and_then(parse_total);
        let run = CoverageRun {
            files: file_runs,
            total,
            threshold,
        };
        reporter.report(&total_result(&run))?;
        Ok(run)
    }

    fn reset(&self) -> Result<()> {
        let output = self
            .runner
            .run_captured(self.tool, &[OsString::from(RESET_ARG)])
            .map_err(|err| StrictGuardError::CoverageReset {
                tool: self.tool.to_path_buf(),
                detail: err.to_string(),
            })?;
        if output.success {
            return Ok(());
        }
        let status = exit_status(output.code);
        let detail = match output.text.trim() {
            "" => status,
            text => format!("{status}: {text}"),
        };
        Err(StrictGuardError::CoverageReset {
            tool: self.tool.to_path_buf(),
            detail,
        })
    }

    fn run_file(&self, file: &Path) -> CheckResult {
        let label = format!("Coverage run {}", file.display());
        let args = self.instrumentation.args(file);
        match self
            .runner
            .run_discarding_stdout(self.instrumentation.interpreter, &args)
        {
            Ok(output) if output.success => CheckResult::pass(label),
            Ok(output) => {
                let status = exit_status(output.code);
                match output.text.trim_end() {
                    "" => CheckResult::fail(label, status),
                    text => CheckResult::fail(label, format!("{status}\n{text}")),
                }
            }
            Err(err) => CheckResult::fail(label, err.to_string()),
        }
    }

    fn capture_report(&self) -> std::result::Result<String, String> {
        match self.runner.run_captured(self.tool, &[]) {
            Ok(output) if output.text.trim().is_empty() => {
                Err(format!("{} produced no report", self.tool.display()))
            }
            Ok(output) => Ok(output.text),
            Err(err) => Err(err.to_string()),
        }
    }
}

fn exit_status(code: Option<i32>) -> String {
    code.map_or_else(
        || "terminated by signal".to_string(),
        |c| format!("exit status {c}"),
    )
}

fn total_result(run: &CoverageRun) -> CheckResult {
    match run.total {
        Some(total) => CheckResult::from_bool(
            run.passed(),
            format!("Coverage total {total}% >= {}%", run.threshold),
            format!("coverage {total}% is below the {}% threshold", run.threshold),
        ),
        None => CheckResult::fail(
            "Coverage total",
            "no Total line found in the coverage report",
        ),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
