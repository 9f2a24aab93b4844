//! Shared test fixtures: a scripted `ProcessRunner` and file helpers.

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::process::{CommandOutput, ProcessRunner};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub stdout_discarded: bool,
}

/// Runner that answers every call through `respond` and records what was asked.
pub struct FakeRunner<F> {
    respond: F,
    calls: RefCell<Vec<RecordedCall>>,
}

impl<F> FakeRunner<F>
where
    F: Fn(&Path, &[String]) -> Result<CommandOutput>,
{
    pub const fn new(respond: F) -> Self {
        Self {
            respond,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    fn record(&self, program: &Path, args: &[OsString], stdout_discarded: bool) -> Result<CommandOutput> {
        let args: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let result = (self.respond)(program, &args);
        self.calls.borrow_mut().push(RecordedCall {
            program: program.to_path_buf(),
            args,
            stdout_discarded,
        });
        result
    }
}

impl<F> ProcessRunner for FakeRunner<F>
where
    F: Fn(&Path, &[String]) -> Result<CommandOutput>,
{
    fn run_captured(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
        self.record(program, args, false)
    }

    fn run_discarding_stdout(&self, program: &Path, args: &[OsString]) -> Result<CommandOutput> {
        self.record(program, args, true)
    }
}

/// Write `content` to `dir/relative`, creating parent directories.
pub fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
