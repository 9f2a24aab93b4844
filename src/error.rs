use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StrictGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid regular expression: {pattern}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Failed to run {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Plan error: {0}")]
    Plan(String),

    #[error("Coverage reset failed: {tool} -delete: {detail}")]
    CoverageReset { tool: PathBuf, detail: String },
}

impl StrictGuardError {
    /// Returns the error type name for display purposes.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::InvalidPattern { .. } => "InvalidPattern",
            Self::InvalidRegex { .. } => "InvalidRegex",
            Self::Io(_) => "Io",
            Self::TomlParse(_) => "TomlParse",
            Self::JsonSerialize(_) => "JsonSerialize",
            Self::Spawn { .. } => "Spawn",
            Self::Plan(_) => "Plan",
            Self::CoverageReset { .. } => "CoverageReset",
        }
    }

    /// Returns the underlying cause, if any, as display text.
    #[must_use]
    pub fn detail(&self) -> Option<String> {
        match self {
            Self::FileRead { source, .. } | Self::Spawn { source, .. } => Some(source.to_string()),
            Self::InvalidPattern { source, .. } => Some(source.to_string()),
            Self::InvalidRegex { source, .. } => Some(source.to_string()),
            _ => None,
        }
    }

    /// Returns an actionable hint for the user, if one applies.
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Config(_) | Self::TomlParse(_) => {
                Some("Run `strict-guard config validate` to check the configuration file")
            }
            Self::InvalidPattern { .. } => Some("Check the glob syntax in scanner.exclude"),
            Self::Spawn { .. } => {
                Some("Check that the interpreter is installed or pass --perl <PATH>")
            }
            Self::CoverageReset { .. } => {
                Some("The coverage tool is unusable; pass --cover <PATH> to pick another binary")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StrictGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
