use std::io::{self, Stderr, Stdout};
use std::path::Path;

use crate::audit::{AuditContext, Auditor, Environment};
use crate::cli::Cli;
use crate::config::{Config, ConfigLoader, FileConfigLoader, validate_config_semantics};
use crate::error::{Result, StrictGuardError};
use crate::process::{ProcessRunner, SystemRunner};
use crate::report::{Reporter, Summary, TapReporter};
use crate::{EXIT_CHECK_FAILED, EXIT_CONFIG_ERROR, EXIT_SUCCESS};

/// Auditor wired to the real terminal and real subprocesses.
pub type CliAuditor<'a> = Auditor<'a, TapReporter<Stdout, Stderr>, SystemRunner>;

/// Load configuration: nothing with `--no-config`, the explicit file with
/// `--config`, else the default search.
///
/// # Errors
/// Returns an error if the chosen file cannot be read or parsed.
pub(crate) fn load_config(
    loader: &impl ConfigLoader,
    config_path: Option<&Path>,
    no_config: bool,
) -> Result<Config> {
    if no_config {
        return Ok(Config::default());
    }
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

/// Apply the global command-line overrides to a loaded configuration.
pub(crate) fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(perl) = &cli.perl {
        config.interpreter.path.clone_from(perl);
    }
    if !cli.lib.is_empty() {
        let mut lib = cli.lib.clone();
        lib.append(&mut config.interpreter.lib);
        config.interpreter.lib = lib;
    }
    config.scanner.exclude.extend(cli.exclude.iter().cloned());
}

/// Load, override and validate the effective configuration.
///
/// `adjust` applies command-specific overrides before validation.
///
/// # Errors
/// Returns an error if loading fails or the result is semantically invalid.
pub(crate) fn effective_config(cli: &Cli, adjust: impl FnOnce(&mut Config)) -> Result<Config> {
    let mut config = load_config(&FileConfigLoader::new(), cli.config.as_deref(), cli.no_config)?;
    apply_cli_overrides(&mut config, cli);
    adjust(&mut config);
    validate_config_semantics(&config)?;
    Ok(config)
}

/// Build the audit context for a command from the real process environment.
///
/// # Errors
/// Returns an error if the configuration cannot be loaded or compiled.
pub(crate) fn build_context(cli: &Cli, adjust: impl FnOnce(&mut Config)) -> Result<AuditContext> {
    let config = effective_config(cli, adjust)?;
    AuditContext::new(config, Environment::from_process(cli.script.clone()))
}

/// TAP on stdout, diagnostics on stderr, real subprocesses.
///
/// # Errors
/// Returns `Plan` if `--plan` cannot be declared.
pub(crate) fn cli_auditor<'a>(context: &'a AuditContext, cli: &Cli) -> Result<CliAuditor<'a>> {
    let mode = cli.color_mode();
    let reporter = TapReporter::new(io::stdout(), io::stderr()).with_colors(mode.for_stdout());
    let auditor = Auditor::new(context, reporter, SystemRunner).quiet(cli.quiet);
    declare_plan(auditor, cli.plan)
}

/// Declare `plan`, if given, before any result is emitted.
///
/// # Errors
/// Returns `Plan` if the reporter rejects the plan.
pub(crate) fn declare_plan<R: Reporter, P: ProcessRunner>(
    mut auditor: Auditor<'_, R, P>,
    plan: Option<usize>,
) -> Result<Auditor<'_, R, P>> {
    if let Some(count) = plan {
        auditor.plan(count)?;
    }
    Ok(auditor)
}

/// Reject `--label` when it would be applied to several targets.
///
/// # Errors
/// Returns a configuration error for a label with more than one target.
pub(crate) fn check_label(targets: &[String], label: Option<&str>) -> Result<()> {
    if label.is_some() && targets.len() > 1 {
        return Err(StrictGuardError::Config(
            "--label can only be used with a single target".to_string(),
        ));
    }
    Ok(())
}

/// Map a finished run to the process exit code.
#[must_use]
pub const fn exit_code(summary: &Summary) -> i32 {
    if summary.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_CHECK_FAILED
    }
}

/// Print a fatal error with its detail and suggestion.
pub(crate) fn report_error(err: &StrictGuardError, cli: &Cli) -> i32 {
    crate::output::print_error_full(
        cli.color_mode(),
        err.error_type(),
        &err.to_string(),
        err.detail().as_deref(),
        err.suggestion(),
    );
    EXIT_CONFIG_ERROR
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
