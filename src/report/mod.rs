//! Check results and the reporters that emit them.

mod tap;

pub use tap::TapReporter;

use crate::error::Result;

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    Fail { diagnostic: Option<String> },
    /// The check does not apply to this runtime; not counted as a pass.
    Skip { reason: String },
}

/// One labeled pass, fail or skip record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub label: String,
    pub outcome: Outcome,
}

impl CheckResult {
    #[must_use]
    pub fn pass(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            outcome: Outcome::Pass,
        }
    }

    #[must_use]
    pub fn fail(label: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        let diagnostic = diagnostic.into();
        Self {
            label: label.into(),
            outcome: Outcome::Fail {
                diagnostic: (!diagnostic.is_empty()).then_some(diagnostic),
            },
        }
    }

    #[must_use]
    pub fn skip(label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            outcome: Outcome::Skip {
                reason: reason.into(),
            },
        }
    }

    /// Pass or fail depending on `ok`; `diagnostic` is only kept on failure.
    #[must_use]
    pub fn from_bool(ok: bool, label: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        if ok {
            Self::pass(label)
        } else {
            Self::fail(label, diagnostic)
        }
    }

    #[must_use]
    pub const fn is_pass(&self) -> bool {
        matches!(self.outcome, Outcome::Pass)
    }

    #[must_use]
    pub const fn is_fail(&self) -> bool {
        matches!(self.outcome, Outcome::Fail { .. })
    }

    #[must_use]
    pub const fn is_skip(&self) -> bool {
        matches!(self.outcome, Outcome::Skip { .. })
    }
}

/// Totals over everything a reporter emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Count declared up front, if any.
    pub planned: Option<usize>,
}

impl Summary {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    #[must_use]
    pub const fn plan_matches(&self) -> bool {
        match self.planned {
            Some(n) => n == self.total(),
            None => true,
        }
    }

    /// No failures and, when a plan was declared, exactly that many results.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.failed == 0 && self.plan_matches()
    }

    pub(crate) fn record(&mut self, result: &CheckResult) {
        match result.outcome {
            Outcome::Pass => self.passed += 1,
            Outcome::Fail { .. } => self.failed += 1,
            Outcome::Skip { .. } => self.skipped += 1,
        }
    }
}

/// Receives check results as they happen.
///
/// The result counter lives in the reporter; sharing one across threads
/// needs external serialization.
pub trait Reporter {
    /// Declare the number of results up front.
    ///
    /// # Errors
    /// Returns `Plan` if a plan was already declared or results were already emitted.
    fn plan(&mut self, count: usize) -> Result<()>;

    /// Emit one result immediately.
    ///
    /// # Errors
    /// Returns an I/O error if the output cannot be written.
    fn report(&mut self, result: &CheckResult) -> Result<()>;

    /// Emit a free-form diagnostic note.
    ///
    /// # Errors
    /// Returns an I/O error if the output cannot be written.
    fn note(&mut self, message: &str) -> Result<()>;

    /// Close the stream, emitting a trailing plan if none was declared.
    ///
    /// # Errors
    /// Returns an I/O error if the output cannot be written.
    fn finish(&mut self) -> Result<Summary>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
