use std::fs;
use std::path::Path;

use crate::cli::{Cli, ConfigAction, ConfigArgs, ConfigOutputFormat};
use crate::config::{Config, FileConfigLoader, RealFileSystem, validate_config_semantics};
use crate::error::{Result, StrictGuardError};
use crate::EXIT_SUCCESS;

use super::context::{effective_config, report_error};

#[must_use]
pub fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    match args.action {
        ConfigAction::Validate => run_config_validate(cli),
        ConfigAction::Show { format } => run_config_show(format, cli),
    }
}

fn run_config_validate(cli: &Cli) -> i32 {
    let config_path = cli.config_path_or_default();
    match run_config_validate_impl(&config_path) {
        Ok(()) => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Err(e) => report_error(&e, cli),
    }
}

/// Validates a configuration file.
///
/// # Errors
/// Returns an error if the file doesn't exist, contains invalid TOML, has an
/// unsupported version, or has semantic errors.
pub(crate) fn run_config_validate_impl(config_path: &Path) -> Result<()> {
    if !config_path.exists() {
        return Err(StrictGuardError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let content = fs::read_to_string(config_path).map_err(|source| StrictGuardError::FileRead {
        path: config_path.to_path_buf(),
        source,
    })?;
    let config = FileConfigLoader::<RealFileSystem>::parse_config(&content)?;
    validate_config_semantics(&config)
}

fn run_config_show(format: ConfigOutputFormat, cli: &Cli) -> i32 {
    let rendered = effective_config(cli, |_| {}).and_then(|config| format_config(&config, format));
    match rendered {
        Ok(text) => {
            print!("{text}");
            EXIT_SUCCESS
        }
        Err(e) => report_error(&e, cli),
    }
}

/// Render the effective configuration, command-line overrides included.
///
/// # Errors
/// Returns an error if serialization fails.
pub fn format_config(config: &Config, format: ConfigOutputFormat) -> Result<String> {
    match format {
        ConfigOutputFormat::Text => format_config_text(config),
        ConfigOutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(config)?)),
    }
}

/// # Errors
/// Returns an error if the configuration cannot be expressed as TOML.
pub fn format_config_text(config: &Config) -> Result<String> {
    let body = toml::to_string_pretty(config)
        .map_err(|e| StrictGuardError::Config(format!("cannot render configuration: {e}")))?;
    Ok(format!("# Effective strict-guard configuration\n\n{body}"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
