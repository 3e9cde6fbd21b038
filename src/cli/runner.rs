//! Catalogue runner (pytest-style reporting)
//!
//! Drives every case in the catalogue through the invoker and prints
//! per-case status lines, a FAILURES section, and a colored summary.
//!
//! A wrong answer reports as FAILED; an invocation or parse failure
//! reports as ERROR, so "execution broke" stays distinguishable from
//! "wrong answer" in the output.

use std::time::{Duration, Instant};

use tracing::debug;

use super::{CliError, CliResult, ExitCode};
use crate::harness::cases::{CheckFailure, TestCase, catalogue};
use crate::harness::invoker::Invoker;

/// Result of running a single case
#[derive(Debug)]
pub enum CaseResult {
    Passed(Duration),
    /// Wrong answer: the converted value did not equal the expectation
    Failed(Duration, String),
    /// Execution broke: invocation or conversion failed before comparison
    Errored(Duration, String),
}

impl CaseResult {
    fn from_check(outcome: Result<(), CheckFailure>, elapsed: Duration) -> Self {
        match outcome {
            Ok(()) => CaseResult::Passed(elapsed),
            Err(f @ CheckFailure::Mismatch { .. }) => CaseResult::Failed(elapsed, f.to_string()),
            Err(f) => CaseResult::Errored(elapsed, f.to_string()),
        }
    }
}

/// Run the catalogue and report. Exit code 0 iff nothing failed or errored.
pub fn run_catalogue(
    invoker: &Invoker,
    verbose: bool,
    stop_on_fail: bool,
    filter: Option<&str>,
) -> CliResult<ExitCode> {
    let start_time = Instant::now();

    let selected: Vec<&TestCase> = catalogue()
        .iter()
        .filter(|c| filter.is_none_or(|keyword| c.name.contains(keyword)))
        .collect();

    if selected.is_empty() {
        eprintln!("No cases selected");
        return Ok(ExitCode::SUCCESS); // "no cases selected" is not a failure
    }

    println!("\x1b[1m=================== lox harness starts ===================\x1b[0m");
    println!("collected {} case(s)", selected.len());
    println!();

    let mut results: Vec<(&TestCase, CaseResult)> = Vec::new();
    let mut passed = 0;
    let mut failed = 0;
    let mut errored = 0;

    for case in selected {
        debug!(case = case.name, script = case.script, "running case");
        let start = Instant::now();
        let result = CaseResult::from_check(case.check(invoker), start.elapsed());

        match &result {
            CaseResult::Passed(_) => passed += 1,
            CaseResult::Failed(_, _) => failed += 1,
            CaseResult::Errored(_, _) => errored += 1,
        }

        print_case_result(case, &result, verbose);

        let broke = !matches!(result, CaseResult::Passed(_));
        results.push((case, result));
        if stop_on_fail && broke {
            break;
        }
    }

    let failures: Vec<_> = results
        .iter()
        .filter(|(_, r)| !matches!(r, CaseResult::Passed(_)))
        .collect();

    if !failures.is_empty() {
        println!();
        println!("\x1b[1;31m=================== FAILURES ===================\x1b[0m");
        for (case, result) in failures {
            println!();
            println!("\x1b[1m___________ {} ___________\x1b[0m", case.name);
            if let CaseResult::Failed(_, msg) | CaseResult::Errored(_, msg) = result {
                println!();
                println!("    {}", msg);
            }
            println!();
            println!("    {}::{}", case.script, case.name);
        }
    }

    let total_time = start_time.elapsed();
    println!();
    let summary_color = if failed > 0 || errored > 0 {
        "\x1b[1;31m"
    } else {
        "\x1b[1;32m"
    };
    print!("{}===================", summary_color);

    let mut parts = Vec::new();
    if passed > 0 {
        parts.push(format!("{} passed", passed));
    }
    if failed > 0 {
        parts.push(format!("{} failed", failed));
    }
    if errored > 0 {
        parts.push(format!("{} errored", errored));
    }

    print!(" {} in {:.2}s ", parts.join(", "), total_time.as_secs_f64());
    println!("===================\x1b[0m");

    if failed > 0 || errored > 0 {
        // Cases failed - return error with empty message (summary already printed)
        Err(CliError::new("", ExitCode::FAILURE))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_case_result(case: &TestCase, result: &CaseResult, verbose: bool) {
    let status = match result {
        CaseResult::Passed(d) => {
            if verbose {
                format!("\x1b[32mPASSED\x1b[0m ({:.0}ms)", d.as_millis())
            } else {
                "\x1b[32mPASSED\x1b[0m".to_string()
            }
        }
        CaseResult::Failed(d, _) => {
            if verbose {
                format!("\x1b[31mFAILED\x1b[0m ({:.0}ms)", d.as_millis())
            } else {
                "\x1b[31mFAILED\x1b[0m".to_string()
            }
        }
        CaseResult::Errored(d, _) => {
            if verbose {
                format!("\x1b[31mERROR\x1b[0m ({:.0}ms)", d.as_millis())
            } else {
                "\x1b[31mERROR\x1b[0m".to_string()
            }
        }
    };

    println!("{} {}", case.name, status);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::harness::invoker::InvokeError;

    fn elapsed() -> Duration {
        Duration::from_millis(1)
    }

    #[test]
    fn passing_check_classifies_as_passed() {
        let result = CaseResult::from_check(Ok(()), elapsed());
        assert!(matches!(result, CaseResult::Passed(_)));
    }

    #[test]
    fn mismatch_classifies_as_failed() {
        let failure = CheckFailure::Mismatch {
            expected: crate::harness::cases::Expected::Int(2),
            actual: "3".to_string(),
        };
        let result = CaseResult::from_check(Err(failure), elapsed());
        match result {
            CaseResult::Failed(_, msg) => {
                assert!(msg.contains("expected 2"), "message: {msg}");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn parse_failure_classifies_as_errored() {
        let failure = CheckFailure::Parse {
            expected_type: "integer",
            raw: "Undefined variable".to_string(),
        };
        let result = CaseResult::from_check(Err(failure), elapsed());
        assert!(matches!(result, CaseResult::Errored(_, _)));
    }

    #[test]
    fn invoke_failure_classifies_as_errored() {
        let failure = CheckFailure::Invoke(InvokeError::NotFound {
            path: "/x/lox".to_string(),
        });
        let result = CaseResult::from_check(Err(failure), elapsed());
        match result {
            CaseResult::Errored(_, msg) => {
                assert!(msg.contains("executable not found"), "message: {msg}");
            }
            other => panic!("expected Errored, got {other:?}"),
        }
    }

    #[test]
    fn empty_filter_selects_nothing_gracefully() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = Invoker::new(dir.path());
        let code = run_catalogue(&invoker, false, false, Some("no_such_case")).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn missing_executable_makes_the_run_fail() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = Invoker::new(dir.path());
        let err = run_catalogue(&invoker, false, true, None).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }
}
