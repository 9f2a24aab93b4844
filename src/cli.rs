use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::LOCAL_CONFIG_NAME;
use crate::output::ColorMode;

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

/// Output format for `config show`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ConfigOutputFormat {
    /// TOML, as it would appear in a configuration file
    #[default]
    Text,
    /// JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "strict-guard")]
#[command(author, version, about = "Audit Perl sources for syntax, strict/warnings pragmas and coverage")]
#[command(long_about = "Checks that Perl modules and scripts compile, declare `use strict` \
    and `use warnings` (or an equivalent), and that the test suite reaches a coverage threshold.\n\
    Results are written to stdout as TAP.\n\n\
    Exit codes:\n  \
    0 - All checks passed (skips allowed)\n  \
    1 - At least one check failed\n  \
    2 - Configuration or runtime error")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Interpreter used for syntax checks and coverage runs (overrides config)
    #[arg(long, global = true)]
    pub perl: Option<PathBuf>,

    /// Extra library search root, searched first (can be specified multiple times)
    #[arg(short = 'I', long = "lib", global = true)]
    pub lib: Vec<PathBuf>,

    /// Exclude patterns for sweeps (glob syntax or path suffix, repeatable)
    #[arg(short = 'x', long, global = true)]
    pub exclude: Vec<String>,

    /// The invoking test script: anchors default sweep roots, never covered
    #[arg(long, global = true)]
    pub script: Option<PathBuf>,

    /// Declare the number of results up front
    #[arg(long, global = true)]
    pub plan: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    #[must_use]
    pub fn color_mode(&self) -> ColorMode {
        self.color.into()
    }

    /// Config file `config validate` should read.
    #[must_use]
    pub fn config_path_or_default(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_NAME))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile-check files or module identifiers
    Syntax(TargetArgs),

    /// Check files or modules for `use strict` or an equivalent
    Strict(TargetArgs),

    /// Check files or modules for `use warnings` or an equivalent
    Warnings(TargetArgs),

    /// Check every module and script under the given directories
    All(AllArgs),

    /// Run scripts with coverage instrumentation and check the total
    Cover(CoverArgs),

    /// Generate a default configuration file
    Init(InitArgs),

    /// Configuration file utilities
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
pub struct TargetArgs {
    /// Files or module identifiers (e.g. `lib/Foo.pm`, `Foo::Bar`)
    #[arg(required = true)]
    pub targets: Vec<String>,

    /// Label for the reported result (single target only)
    #[arg(long)]
    pub label: Option<String>,
}

#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct AllArgs {
    /// Directories to sweep (default: the parent of the script's directory)
    pub dirs: Vec<PathBuf>,

    /// Also check for `use warnings`
    #[arg(long)]
    pub warnings: bool,

    /// Skip the syntax check
    #[arg(long)]
    pub no_syntax: bool,

    /// Skip the strict check
    #[arg(long)]
    pub no_strict: bool,
}

#[derive(Parser, Debug)]
pub struct CoverArgs {
    /// Directories holding the scripts to run (default: the script's directory)
    pub dirs: Vec<PathBuf>,

    /// Minimum coverage percentage (overrides config)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Coverage tool binary (overrides config)
    #[arg(long)]
    pub cover: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = LOCAL_CONFIG_NAME)]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate configuration file syntax and values (reads --config, default .strict-guard.toml)
    Validate,

    /// Display the effective configuration
    Show {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ConfigOutputFormat,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
