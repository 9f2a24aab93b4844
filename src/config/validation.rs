use globset::Glob;

use crate::error::{Result, StrictGuardError};

use super::Config;

/// Validate semantic constraints that deserialization alone cannot express.
///
/// # Errors
/// Returns the first violated constraint as a configuration error.
pub fn validate_config_semantics(config: &Config) -> Result<()> {
    let threshold = config.coverage.threshold;
    if !(0.0..=100.0).contains(&threshold) {
        return Err(StrictGuardError::Config(format!(
            "coverage.threshold must be between 0 and 100, got {threshold}"
        )));
    }

    if config.interpreter.name.trim().is_empty() {
        return Err(StrictGuardError::Config(
            "interpreter.name cannot be empty".to_string(),
        ));
    }

    if config.coverage.tool_name.trim().is_empty() {
        return Err(StrictGuardError::Config(
            "coverage.tool_name cannot be empty".to_string(),
        ));
    }

    let scanner = &config.scanner;
    validate_extensions("scanner.module_extensions", &scanner.module_extensions)?;
    validate_extensions("scanner.script_extensions", &scanner.script_extensions)?;
    validate_extensions("scanner.test_extensions", &scanner.test_extensions)?;

    for pattern in &scanner.exclude {
        Glob::new(pattern).map_err(|e| StrictGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
    }

    validate_module_names("checks.strict_modules", &config.checks.strict_modules)?;
    validate_module_names("checks.warnings_modules", &config.checks.warnings_modules)?;

    Ok(())
}

fn validate_extensions(field: &str, extensions: &[String]) -> Result<()> {
    if extensions.is_empty() {
        return Err(StrictGuardError::Config(format!("{field} cannot be empty")));
    }
    for (i, ext) in extensions.iter().enumerate() {
        if ext.is_empty() || ext.starts_with('.') {
            return Err(StrictGuardError::Config(format!(
                "{field}[{i}] must be a bare extension without a leading dot, got '{ext}'"
            )));
        }
    }
    Ok(())
}

fn is_module_name(name: &str) -> bool {
    !name.is_empty()
        && name.split("::").all(|segment| {
            !segment.is_empty() && segment.chars().all(|c| c.is_alphanumeric() || c == '_')
        })
}

fn validate_module_names(field: &str, names: &[String]) -> Result<()> {
    for (i, name) in names.iter().enumerate() {
        if !is_module_name(name) {
            return Err(StrictGuardError::Config(format!(
                "{field}[{i}] is not a module name: '{name}'"
            )));
        }
    }
    Ok(())
}
