use std::path::{Path, PathBuf};

use super::*;
use crate::process::CommandOutput;
use crate::report::{Outcome, TapReporter};
use crate::test_fixtures::FakeRunner;

type Buffers = TapReporter<Vec<u8>, Vec<u8>>;

const PERL: &str = "perl";
const COVER: &str = "/usr/bin/cover";

fn instrumentation() -> Instrumentation<'static> {
    Instrumentation {
        interpreter: Path::new(PERL),
        lib: &[],
        flag: "-MDevel::Cover",
    }
}

fn files(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

fn report_with_total(total: &str) -> String {
    format!("File   stmt  total\nt/a.t  100.0  {total}\nTotal  100.0  {total}\n")
}

/// Fake tool: reset succeeds, report prints `report`, files named `*bad*` exit 1.
fn scripted(report: String) -> impl Fn(&Path, &[String]) -> crate::error::Result<CommandOutput> {
    move |program: &Path, args: &[String]| {
        if program == Path::new(COVER) {
            return Ok(if args.is_empty() {
                CommandOutput::success(report.clone())
            } else {
                CommandOutput::success("Deleting database\n")
            });
        }
        let file = args.last().cloned().unwrap_or_default();
        if file.contains("bad") {
            Ok(CommandOutput::failure(1, "died at t/bad.t line 3.\n"))
        } else {
            Ok(CommandOutput::success(""))
        }
    }
}

fn run_sweep(
    runner: &FakeRunner<impl Fn(&Path, &[String]) -> crate::error::Result<CommandOutput>>,
    targets: &[PathBuf],
    threshold: f64,
) -> (crate::error::Result<CoverageRun>, String) {
    let mut reporter: Buffers = TapReporter::new(Vec::new(), Vec::new());
    let aggregator = CoverageAggregator::new(runner, Path::new(COVER), instrumentation());
    let result = aggregator.run(targets, threshold, &mut reporter, &CoverageProgress::hidden());
    reporter.finish().unwrap();
    let (out, _) = reporter.into_inner();
    (result, String::from_utf8(out).unwrap())
}

#[test]
fn total_below_threshold_fails_but_returns_total() {
    let runner = FakeRunner::new(scripted(report_with_total("73.5")));
    let (result, out) = run_sweep(&runner, &files(&["t/a.t"]), 80.0);

    let run = result.unwrap();
    assert_eq!(run.total, Some(73.5));
    assert!(!run.passed());
    assert!(out.contains("not ok 3 - Coverage total 73.5% >= 80%"));
}

#[test]
fn total_equal_to_threshold_passes() {
    let runner = FakeRunner::new(scripted(report_with_total("50.0")));
    let (result, out) = run_sweep(&runner, &files(&["t/a.t"]), 50.0);

    let run = result.unwrap();
    assert!(run.passed());
    assert!(out.contains("ok 3 - Coverage total 50% >= 50%"));
}

#[test]
fn total_just_below_threshold_fails() {
    let runner = FakeRunner::new(scripted(report_with_total("49.99")));
    let (result, _) = run_sweep(&runner, &files(&["t/a.t"]), 50.0);
    assert!(!result.unwrap().passed());
}

#[test]
fn steps_run_in_order() {
    let runner = FakeRunner::new(scripted(report_with_total("90")));
    let (result, _) = run_sweep(&runner, &files(&["t/a.t", "t/b.t"]), 50.0);
    result.unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0].program, PathBuf::from(COVER));
    assert_eq!(calls[0].args, ["-delete"]);
    assert_eq!(calls[1].args, ["-MDevel::Cover", "t/a.t"]);
    assert!(calls[1].stdout_discarded);
    assert_eq!(calls[2].args, ["-MDevel::Cover", "t/b.t"]);
    assert_eq!(calls[3].program, PathBuf::from(COVER));
    assert!(calls[3].args.is_empty());
}

#[test]
fn failing_file_is_recorded_and_sweep_continues() {
    let runner = FakeRunner::new(scripted(report_with_total("90")));
    let (result, out) = run_sweep(&runner, &files(&["t/bad.t", "t/good.t"]), 50.0);

    let run = result.unwrap();
    assert_eq!(
        run.files,
        vec![
            FileRun {
                path: PathBuf::from("t/bad.t"),
                success: false
            },
            FileRun {
                path: PathBuf::from("t/good.t"),
                success: true
            },
        ]
    );
    assert!(out.contains("not ok 1 - Coverage run t/bad.t"));
    assert!(out.contains("ok 2 - Coverage run t/good.t"));
    assert!(run.passed());
}

#[test]
fn spawn_failure_of_one_file_does_not_abort() {
    let runner = FakeRunner::new(|program: &Path, args: &[String]| {
        if program == Path::new(COVER) {
            return Ok(if args.is_empty() {
                CommandOutput::success(report_with_total("60"))
            } else {
                CommandOutput::success("")
            });
        }
        Err(StrictGuardError::Spawn {
            program: program.display().to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
    });
    let (result, _) = run_sweep(&runner, &files(&["t/a.t", "t/b.t"]), 50.0);

    let run = result.unwrap();
    assert_eq!(run.files.len(), 2);
    assert!(run.files.iter().all(|f| !f.success));
    assert_eq!(run.total, Some(60.0));
}

#[test]
fn reset_failure_is_fatal() {
    let runner = FakeRunner::new(|program: &Path, args: &[String]| {
        if program == Path::new(COVER) && args.first().is_some_and(|a| a == RESET_ARG) {
            Ok(CommandOutput::failure(2, "cannot delete cover_db\n"))
        } else {
            Ok(CommandOutput::success(""))
        }
    });
    let (result, out) = run_sweep(&runner, &files(&["t/a.t"]), 50.0);

    let err = result.unwrap_err();
    assert!(matches!(err, StrictGuardError::CoverageReset { .. }));
    assert!(err.to_string().contains("exit status 2: cannot delete cover_db"));
    assert_eq!(runner.calls().len(), 1);
    assert_eq!(out, "1..0\n");
}

#[test]
fn unparsed_total_is_distinct_failure() {
    let runner = FakeRunner::new(scripted("No coverage data\n".to_string()));
    let (result, out) = run_sweep(&runner, &files(&["t/a.t"]), 50.0);

    let run = result.unwrap();
    assert_eq!(run.total, None);
    assert!(!run.passed());
    assert!(out.contains("ok 2 - Coverage report"));
    assert!(out.contains("not ok 3 - Coverage total\n"));
}

#[test]
fn empty_report_fails_capture_step() {
    let runner = FakeRunner::new(scripted(String::new()));
    let (result, out) = run_sweep(&runner, &files(&[]), 50.0);

    assert_eq!(result.unwrap().total, None);
    assert!(out.contains("not ok 1 - Coverage report"));
}

#[test]
fn instrumentation_args_include_library_roots() {
    let lib = [PathBuf::from("lib")];
    let inst = Instrumentation {
        interpreter: Path::new(PERL),
        lib: &lib,
        flag: "-MDevel::Cover=-silent,1",
    };
    let args: Vec<String> = inst
        .args(Path::new("t/a.t"))
        .iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    assert_eq!(args, ["-Ilib", "-MDevel::Cover=-silent,1", "t/a.t"]);
}

#[test]
fn cover_outcome_total() {
    assert_eq!(CoverOutcome::ToolMissing.total(), None);
    let run = CoverageRun {
        files: Vec::new(),
        total: Some(12.5),
        threshold: 50.0,
    };
    assert_eq!(CoverOutcome::Completed(run).total(), Some(12.5));
}

#[test]
fn file_result_outcome_carries_exit_status() {
    let runner = FakeRunner::new(scripted(report_with_total("90")));
    let aggregator = CoverageAggregator::new(&runner, Path::new(COVER), instrumentation());
    let result = aggregator.run_file(Path::new("t/bad.t"));
    assert_eq!(
        result.outcome,
        Outcome::Fail {
            diagnostic: Some("exit status 1\ndied at t/bad.t line 3.".to_string())
        }
    );
}
