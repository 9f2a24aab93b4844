use std::fs;

use crate::cli::{Cli, InitArgs};
use crate::error::{Result, StrictGuardError};
use crate::EXIT_SUCCESS;

use super::context::report_error;

#[must_use]
pub fn run_init(args: &InitArgs, cli: &Cli) -> i32 {
    match run_init_impl(args) {
        Ok(()) => {
            if !cli.quiet {
                println!("Created configuration file: {}", args.output.display());
            }
            EXIT_SUCCESS
        }
        Err(e) => report_error(&e, cli),
    }
}

/// Writes the configuration template.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(StrictGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;
    tracing::debug!(path = %output_path.display(), "wrote configuration template");
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# strict-guard configuration file
version = "1"

[interpreter]
# Interpreter used for `-c` syntax checks and coverage runs
path = "perl"

# Interpreter name recognized in shebang lines
name = "perl"

# Library search roots, searched before PERL5LIB entries
# lib = ["lib", "t/lib"]

[checks]
# Checks run per file by `strict-guard all`
syntax = true
strict = true
warnings = false

# Set to false when the target runtime predates the warnings pragma;
# warnings checks are then reported as skipped
warnings_pragma = true

# Extra modules whose `use` also enables strict / warnings
# strict_modules = ["My::Base"]
# warnings_modules = ["My::Base"]

[scanner]
# Directory names never descended into
vcs_dirs = ["CVS", ".svn", ".git", ".hg", ".bzr", "_darcs"]

# Files skipped by `all` and `cover` (glob syntax or path suffix)
exclude = [
    "**/blib/**",
]

module_extensions = ["pm"]
script_extensions = ["pl"]
test_extensions = ["t"]

# Treat paths containing `::` as module identifiers
namespaced_modules = true

[coverage]
# Coverage tool looked up on PATH (or set `tool` to an explicit path)
tool_name = "cover"
# tool = "/usr/local/bin/cover"

# Minimum aggregate coverage percentage
threshold = 50.0

# Interpreter flag that loads the instrumentation
instrumentation = "-MDevel::Cover"
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
