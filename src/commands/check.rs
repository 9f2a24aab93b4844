use crate::audit::Auditor;
use crate::cli::{AllArgs, Cli, TargetArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::print_warning;
use crate::process::ProcessRunner;
use crate::report::{Reporter, Summary};

use super::context::{build_context, check_label, cli_auditor, exit_code, report_error};

/// Which single-target check a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    Syntax,
    Strict,
    Warnings,
}

#[must_use]
pub fn run_check(kind: CheckKind, args: &TargetArgs, cli: &Cli) -> i32 {
    match run_check_impl(kind, args, cli) {
        Ok(code) => code,
        Err(e) => report_error(&e, cli),
    }
}

fn run_check_impl(kind: CheckKind, args: &TargetArgs, cli: &Cli) -> Result<i32> {
    let label = args.label.as_deref();
    check_label(&args.targets, label)?;

    let context = build_context(cli, |_| {})?;
    let mut auditor = cli_auditor(&context, cli)?;
    let summary = check_targets(&mut auditor, kind, &args.targets, label)?;
    Ok(exit_code(&summary))
}

/// Run one kind of check on each target in order, then close the stream.
///
/// # Errors
/// Returns an error if the reporter cannot write.
pub(crate) fn check_targets<R: Reporter, P: ProcessRunner>(
    auditor: &mut Auditor<'_, R, P>,
    kind: CheckKind,
    targets: &[String],
    label: Option<&str>,
) -> Result<Summary> {
    for target in targets {
        match kind {
            CheckKind::Syntax => auditor.syntax_ok(target, label)?,
            CheckKind::Strict => auditor.strict_ok(target, label)?,
            CheckKind::Warnings => auditor.warnings_ok(target, label)?,
        };
    }
    auditor.finish()
}

#[must_use]
pub fn run_all(args: &AllArgs, cli: &Cli) -> i32 {
    match run_all_impl(args, cli) {
        Ok(code) => code,
        Err(e) => report_error(&e, cli),
    }
}

fn run_all_impl(args: &AllArgs, cli: &Cli) -> Result<i32> {
    let context = build_context(cli, |config| apply_check_selection(config, args))?;
    let checks = &context.config().checks;
    if checks.warnings && !checks.warnings_pragma && !cli.quiet {
        print_warning(
            cli.color_mode(),
            "warnings checks are enabled but checks.warnings_pragma is false; they will be skipped",
        );
    }
    let mut auditor = cli_auditor(&context, cli)?;
    auditor.all_perl_files_ok(&args.dirs)?;
    let summary = auditor.finish()?;
    Ok(exit_code(&summary))
}

/// `--warnings`, `--no-syntax` and `--no-strict` on top of `[checks]`.
pub(crate) const fn apply_check_selection(config: &mut Config, args: &AllArgs) {
    if args.warnings {
        config.checks.warnings = true;
    }
    if args.no_syntax {
        config.checks.syntax = false;
    }
    if args.no_strict {
        config.checks.strict = false;
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
