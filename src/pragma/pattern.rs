use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, StrictGuardError};

/// Modules whose `use` turns on strict mode.
pub const MODULES_ENABLING_STRICT: &[&str] = &[
    "strict",
    "Moose",
    "Moose::Role",
    "Moose::Exporter",
    "MooseX::Declare",
    "MooseX::Role::Parameterized",
    "MooseX::Types",
    "Mouse",
    "Mouse::Role",
    "Moo",
    "Moo::Role",
    "Role::Tiny",
    "Any::Moose",
    "Class::Moose",
    "Modern::Perl",
    "common::sense",
    "strictures",
    "Dancer",
    "Dancer2",
    "Mojo::Base",
    "Mojolicious::Lite",
    "perl5i::1",
    "perl5i::2",
    "perl5i::latest",
    "Spiffy",
];

/// Modules whose `use` turns on warnings.
pub const MODULES_ENABLING_WARNINGS: &[&str] = &[
    "warnings",
    "Moose",
    "Moose::Role",
    "Moose::Exporter",
    "MooseX::Declare",
    "MooseX::Role::Parameterized",
    "MooseX::Types",
    "Mouse",
    "Mouse::Role",
    "Moo",
    "Moo::Role",
    "Role::Tiny",
    "Any::Moose",
    "Class::Moose",
    "Modern::Perl",
    "common::sense",
    "strictures",
    "Dancer",
    "Dancer2",
    "Mojo::Base",
    "Mojolicious::Lite",
    "perl5i::1",
    "perl5i::2",
    "perl5i::latest",
    "Spiffy",
];

/// `use VERSION` at or above this enables strict implicitly.
pub const STRICT_BY_VERSION: PerlVersion = PerlVersion::new(5, 11, 0);

/// `use VERSION` at or above this enables warnings implicitly.
pub const WARNINGS_BY_VERSION: PerlVersion = PerlVersion::new(5, 35, 0);

// SAFETY: static pattern, checked by tests.
static USE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\buse\s+(v\d+(?:\.\d+)*|\d+(?:\.\d+)*)(?:[;\s]|$)").expect("valid regex")
});

/// Which pragma a pattern detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PragmaKind {
    Strict,
    Warnings,
}

impl fmt::Display for PragmaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Warnings => write!(f, "warnings"),
        }
    }
}

/// Line-level detector for a pragma.
///
/// A line matches when it contains `use <module>` for a module enabling the pragma,
/// followed by whitespace, `::`, `;` or end of line, or a `use VERSION` declaration
/// new enough to enable the pragma.
#[derive(Debug, Clone)]
pub struct PragmaPattern {
    kind: PragmaKind,
    modules: Regex,
    min_version: PerlVersion,
}

impl PragmaPattern {
    /// Strict detection with the built-in module list plus `extra_modules`.
    ///
    /// # Errors
    /// Returns an error if the combined pattern does not compile.
    pub fn strict(extra_modules: &[String]) -> Result<Self> {
        Self::build(
            PragmaKind::Strict,
            MODULES_ENABLING_STRICT,
            extra_modules,
            STRICT_BY_VERSION,
        )
    }

    /// Warnings detection with the built-in module list plus `extra_modules`.
    ///
    /// # Errors
    /// Returns an error if the combined pattern does not compile.
    pub fn warnings(extra_modules: &[String]) -> Result<Self> {
        Self::build(
            PragmaKind::Warnings,
            MODULES_ENABLING_WARNINGS,
            extra_modules,
            WARNINGS_BY_VERSION,
        )
    }

    fn build(
        kind: PragmaKind,
        builtin: &[&str],
        extra: &[String],
        min_version: PerlVersion,
    ) -> Result<Self> {
        let alternatives: Vec<String> = builtin
            .iter()
            .copied()
            .chain(extra.iter().map(String::as_str))
            .map(regex::escape)
            .collect();
        let pattern = format!(r"\buse\s+(?:{})(?:[;\s]|::|$)", alternatives.join("|"));
        let modules = Regex::new(&pattern)
            .map_err(|source| StrictGuardError::InvalidRegex { pattern, source })?;

        Ok(Self {
            kind,
            modules,
            min_version,
        })
    }

    #[must_use]
    pub const fn kind(&self) -> PragmaKind {
        self.kind
    }

    #[must_use]
    pub fn is_match(&self, line: &str) -> bool {
        if self.modules.is_match(line) {
            return true;
        }
        USE_VERSION
            .captures(line)
            .and_then(|caps| PerlVersion::parse(&caps[1]))
            .is_some_and(|version| version >= self.min_version)
    }
}

/// A `use VERSION` value in either dotted (`v5.36.0`, `5.12.1`) or decimal (`5.012`) form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PerlVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl PerlVersion {
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        if let Some(dotted) = text.strip_prefix('v') {
            return Self::parse_dotted(dotted);
        }
        if text.matches('.').count() >= 2 {
            return Self::parse_dotted(text);
        }
        Self::parse_decimal(text)
    }

    fn parse_dotted(text: &str) -> Option<Self> {
        let mut parts = text.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next().map_or(Some(0), |p| p.parse().ok())?;
        let patch = parts.next().map_or(Some(0), |p| p.parse().ok())?;
        Some(Self::new(major, minor, patch))
    }

    /// `5.012003` → 5.12.3: the fraction is read in groups of three digits.
    fn parse_decimal(text: &str) -> Option<Self> {
        let (major, fraction) = text.split_once('.').unwrap_or((text, ""));
        let major = major.parse().ok()?;
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let padded = format!("{fraction:0<6}");
        let minor = padded[0..3].parse().ok()?;
        let patch = padded[3..6].parse().ok()?;
        Some(Self::new(major, minor, patch))
    }
}

impl fmt::Display for PerlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
