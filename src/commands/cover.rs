use std::path::PathBuf;

use crate::audit::Auditor;
use crate::cli::{Cli, CoverArgs};
use crate::config::Config;
use crate::coverage::CoverOutcome;
use crate::error::Result;
use crate::process::ProcessRunner;
use crate::report::{Reporter, Summary};

use super::context::{build_context, cli_auditor, exit_code, report_error};

#[must_use]
pub fn run_cover(args: &CoverArgs, cli: &Cli) -> i32 {
    match run_cover_impl(args, cli) {
        Ok(code) => code,
        Err(e) => report_error(&e, cli),
    }
}

fn run_cover_impl(args: &CoverArgs, cli: &Cli) -> Result<i32> {
    let context = build_context(cli, |config| apply_cover_overrides(config, args))?;
    let mut auditor = cli_auditor(&context, cli)?;
    let summary = cover(&mut auditor, &args.dirs)?;
    Ok(exit_code(&summary))
}

/// `--threshold` and `--cover` on top of `[coverage]`.
pub(crate) fn apply_cover_overrides(config: &mut Config, args: &CoverArgs) {
    if let Some(threshold) = args.threshold {
        config.coverage.threshold = threshold;
    }
    if let Some(tool) = &args.cover {
        config.coverage.tool = Some(tool.clone());
    }
}

/// Run the coverage sweep, note the aggregate and close the stream.
///
/// # Errors
/// Returns `CoverageReset` if the database cannot be reset, or an error if the
/// reporter cannot write.
pub(crate) fn cover<R: Reporter, P: ProcessRunner>(
    auditor: &mut Auditor<'_, R, P>,
    dirs: &[PathBuf],
) -> Result<Summary> {
    let outcome = auditor.all_cover_ok(None, dirs)?;
    if let Some(line) = describe_outcome(&outcome) {
        auditor.note(&line)?;
    }
    auditor.finish()
}

/// One-line aggregate for a finished sweep; nothing when the tool was missing.
#[must_use]
pub fn describe_outcome(outcome: &CoverOutcome) -> Option<String> {
    let CoverOutcome::Completed(run) = outcome else {
        return None;
    };
    let failed = run.files.iter().filter(|f| !f.success).count();
    let total = run
        .total
        .map_or_else(|| "unavailable".to_string(), |t| format!("{t}%"));
    Some(format!(
        "Coverage total: {total} (threshold {}%, {} file{} run, {failed} failed)",
        run.threshold,
        run.files.len(),
        if run.files.len() == 1 { "" } else { "s" }
    ))
}

#[cfg(test)]
#[path = "cover_tests.rs"]
mod tests;
