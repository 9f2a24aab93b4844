use std::io::Write;

use super::{CheckResult, Outcome, Reporter, Summary};
use crate::error::{Result, StrictGuardError};
use crate::output::ansi;

/// Test Anything Protocol writer.
///
/// Results go to `out`; failure diagnostics and notes go to `diag` as `# ` lines.
/// Without an explicit plan the `1..N` line is written by [`Reporter::finish`].
pub struct TapReporter<W: Write, E: Write> {
    out: W,
    diag: E,
    use_colors: bool,
    summary: Summary,
    finished: bool,
}

impl<W: Write, E: Write> TapReporter<W, E> {
    #[must_use]
    pub fn new(out: W, diag: E) -> Self {
        Self {
            out,
            diag,
            use_colors: false,
            summary: Summary::default(),
            finished: false,
        }
    }

    #[must_use]
    pub const fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Results emitted so far.
    #[must_use]
    pub const fn emitted(&self) -> usize {
        self.summary.total()
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.diag)
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn write_diag_block(&mut self, text: &str) -> Result<()> {
        for line in text.lines() {
            writeln!(self.diag, "# {line}")?;
        }
        Ok(())
    }
}

impl<W: Write, E: Write> Reporter for TapReporter<W, E> {
    fn plan(&mut self, count: usize) -> Result<()> {
        if self.summary.planned.is_some() {
            return Err(StrictGuardError::Plan("plan already declared".to_string()));
        }
        if self.emitted() > 0 {
            return Err(StrictGuardError::Plan(format!(
                "plan declared after {} results were emitted",
                self.emitted()
            )));
        }
        self.summary.planned = Some(count);
        writeln!(self.out, "1..{count}")?;
        Ok(())
    }

    fn report(&mut self, result: &CheckResult) -> Result<()> {
        self.summary.record(result);
        let number = self.emitted();

        match &result.outcome {
            Outcome::Pass => {
                let ok = self.paint("ok", ansi::GREEN);
                writeln!(self.out, "{ok} {number} - {}", result.label)?;
            }
            Outcome::Skip { reason } => {
                let ok = self.paint("ok", ansi::YELLOW);
                writeln!(self.out, "{ok} {number} - {} # skip {reason}", result.label)?;
            }
            Outcome::Fail { diagnostic } => {
                let not_ok = self.paint("not ok", ansi::RED);
                writeln!(self.out, "{not_ok} {number} - {}", result.label)?;
                self.out.flush()?;
                writeln!(self.diag, "#   Failed test '{}'", result.label)?;
                if let Some(text) = diagnostic {
                    self.write_diag_block(text)?;
                }
            }
        }
        Ok(())
    }

    fn note(&mut self, message: &str) -> Result<()> {
        self.write_diag_block(message)
    }

    fn finish(&mut self) -> Result<Summary> {
        if self.finished {
            return Ok(self.summary);
        }
        self.finished = true;

        let ran = self.emitted();
        match self.summary.planned {
            None => writeln!(self.out, "1..{ran}")?,
            Some(planned) if planned != ran => {
                writeln!(
                    self.diag,
                    "# Looks like you planned {planned} test{} but ran {ran}.",
                    plural(planned)
                )?;
            }
            Some(_) => {}
        }
        if self.summary.failed > 0 {
            writeln!(
                self.diag,
                "# Looks like you failed {} test{} of {ran}.",
                self.summary.failed,
                plural(self.summary.failed)
            )?;
        }
        self.out.flush()?;
        self.diag.flush()?;

        tracing::debug!(
            passed = self.summary.passed,
            failed = self.summary.failed,
            skipped = self.summary.skipped,
            "report finished"
        );
        Ok(self.summary)
    }
}

const fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
#[path = "tap_tests.rs"]
mod tests;
