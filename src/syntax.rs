//! Compile-only syntax check through the external interpreter.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::process::ProcessRunner;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxOutcome {
    Valid,
    /// Anything other than the interpreter's confirmation line; carries the full output.
    Invalid { output: String },
}

impl SyntaxOutcome {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Runs `<interpreter> -I<root>... -c <file>` and looks for `"<file> syntax OK"`.
#[derive(Debug, Clone)]
pub struct SyntaxChecker {
    interpreter: PathBuf,
    lib: Vec<PathBuf>,
}

impl SyntaxChecker {
    #[must_use]
    pub const fn new(interpreter: PathBuf, lib: Vec<PathBuf>) -> Self {
        Self { interpreter, lib }
    }

    #[must_use]
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    #[must_use]
    pub fn args(&self, file: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self
            .lib
            .iter()
            .map(|root| {
                let mut arg = OsString::from("-I");
                arg.push(root);
                arg
            })
            .collect();
        args.push(OsString::from("-c"));
        args.push(file.as_os_str().to_owned());
        args
    }

    /// # Errors
    /// Returns `Spawn` if the interpreter cannot be started.
    pub fn check<P: ProcessRunner>(&self, runner: &P, file: &Path) -> Result<SyntaxOutcome> {
        let output = runner.run_captured(&self.interpreter, &self.args(file))?;
        if confirms_syntax(&output.text, file) {
            Ok(SyntaxOutcome::Valid)
        } else {
            Ok(SyntaxOutcome::Invalid {
                output: output.text,
            })
        }
    }
}

/// Whether interpreter output contains the literal `"<file> syntax OK"` line.
#[must_use]
pub fn confirms_syntax(output: &str, file: &Path) -> bool {
    output.contains(&format!("{} syntax OK", file.display()))
}

#[cfg(test)]
#[path = "syntax_tests.rs"]
mod tests;
