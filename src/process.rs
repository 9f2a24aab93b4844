//! Subprocess seam for the interpreter and coverage tool.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use crate::error::{Result, StrictGuardError};

/// What a finished subprocess left behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` when terminated by a signal.
    pub code: Option<i32>,
    pub success: bool,
    /// Captured text: stdout followed by stderr, or stderr alone when stdout was discarded.
    pub text: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            success: true,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn failure(code: i32, text: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            success: false,
            text: text.into(),
        }
    }
}

/// Runs external programs to completion, blocking the caller.
pub trait ProcessRunner {
    /// Run and capture stdout and stderr into one text.
    ///
    /// # Errors
    /// Returns `Spawn` if the program cannot be started.
    fn run_captured(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput>;

    /// Run with stdout sent to the null device; stderr is still captured.
    ///
    /// # Errors
    /// Returns `Spawn` if the program cannot be started.
    fn run_discarding_stdout(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput>;
}

/// `ProcessRunner` backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn spawn_error(program: &Path, source: std::io::Error) -> StrictGuardError {
        StrictGuardError::Spawn {
            program: program.display().to_string(),
            source,
        }
    }

    fn log_command(program: &Path, args: &[OsString]) {
        let rendered: Vec<_> = args.iter().map(|a| a.to_string_lossy()).collect();
        tracing::debug!(program = %program.display(), args = ?rendered, "spawning");
    }

    fn finish(program: &Path, output: &Output, text: String) -> CommandOutput {
        let code = output.status.code();
        tracing::debug!(program = %program.display(), ?code, "process exited");
        CommandOutput {
            code,
            success: output.status.success(),
            text,
        }
    }
}

impl ProcessRunner for SystemRunner {
    fn run_captured(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
        Self::log_command(program, args);
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Self::spawn_error(program, e))?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(Self::finish(program, &output, text))
    }

    fn run_discarding_stdout(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
        Self::log_command(program, args);
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Self::spawn_error(program, e))?;

        let text = String::from_utf8_lossy(&output.stderr).into_owned();
        Ok(Self::finish(program, &output, text))
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
