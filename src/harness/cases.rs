//! The fixed test-case catalogue and per-case comparison rules
//!
//! Cases are data: a script path, an expected literal, and the comparison
//! rule implied by the literal's type. Assertion logic lives in one place
//! ([`TestCase::check`]) so adding a case is a one-line table edit.

use std::fmt;

use thiserror::Error;

use super::invoker::{InvokeError, Invoker};

/// Expected value of a test case. The variant selects the comparison rule:
/// trim surrounding whitespace, then parse as the matching type (or compare
/// the trimmed text directly for `Text`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expected {
    Int(i64),
    Float(f64),
    Text(&'static str),
}

impl Expected {
    /// Human-readable name of the expected type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Expected::Int(_) => "integer",
            Expected::Float(_) => "float",
            Expected::Text(_) => "string",
        }
    }
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Int(v) => write!(f, "{v}"),
            Expected::Float(v) => write!(f, "{v}"),
            Expected::Text(v) => write!(f, "{v:?}"),
        }
    }
}

/// One named expectation: run `script`, trim the output, compare against
/// `expected`. Statically defined, never mutated.
#[derive(Debug, Clone, Copy)]
pub struct TestCase {
    /// Identifier for reporting
    pub name: &'static str,
    /// Script path relative to the project root
    pub script: &'static str,
    pub expected: Expected,
}

/// Why a test case did not pass.
///
/// `Mismatch` is a wrong answer; `Invoke` and `Parse` mean execution broke
/// before a comparable value existed, and reporters should surface them as
/// errors rather than failures.
#[derive(Debug, Error)]
pub enum CheckFailure {
    #[error(transparent)]
    Invoke(#[from] InvokeError),

    /// Trimmed output was not a valid value of the expected type. This is
    /// the expected signal when the interpreter printed an error message
    /// instead of a result.
    #[error("could not parse {raw:?} as {expected_type}")]
    Parse {
        expected_type: &'static str,
        raw: String,
    },

    #[error("expected {expected}, got {actual}")]
    Mismatch { expected: Expected, actual: String },
}

impl TestCase {
    /// Run this case through the invoker and compare per the rule.
    pub fn check(&self, invoker: &Invoker) -> Result<(), CheckFailure> {
        let raw = invoker.invoke(self.script)?;
        let trimmed = raw.trim();

        match self.expected {
            Expected::Int(want) => {
                let got: i64 = trimmed.parse().map_err(|_| CheckFailure::Parse {
                    expected_type: self.expected.type_name(),
                    raw: trimmed.to_string(),
                })?;
                if got != want {
                    return Err(self.mismatch(got));
                }
            }
            Expected::Float(want) => {
                let got: f64 = trimmed.parse().map_err(|_| CheckFailure::Parse {
                    expected_type: self.expected.type_name(),
                    raw: trimmed.to_string(),
                })?;
                if got != want {
                    return Err(self.mismatch(got));
                }
            }
            Expected::Text(want) => {
                // no case-folding, no internal-whitespace collapsing
                if trimmed != want {
                    return Err(self.mismatch(format!("{trimmed:?}")));
                }
            }
        }

        Ok(())
    }

    fn mismatch(&self, actual: impl fmt::Display) -> CheckFailure {
        CheckFailure::Mismatch {
            expected: self.expected,
            actual: actual.to_string(),
        }
    }
}

/// The arithmetic suite: each script prints one value, the interpreter's
/// answer must equal the literal.
pub fn catalogue() -> &'static [TestCase] {
    const CASES: &[TestCase] = &[
        TestCase {
            name: "addition",
            script: "tests/testArithmatic/test_addition.lox",
            expected: Expected::Int(2),
        },
        TestCase {
            name: "subtraction",
            script: "tests/testArithmatic/test_minus.lox",
            expected: Expected::Int(2),
        },
        TestCase {
            name: "multiplication",
            script: "tests/testArithmatic/test_multiply.lox",
            expected: Expected::Int(2),
        },
        TestCase {
            name: "division",
            script: "tests/testArithmatic/test_divide.lox",
            expected: Expected::Int(2),
        },
        TestCase {
            name: "negate",
            script: "tests/testArithmatic/test_negate.lox",
            expected: Expected::Float(-2.2),
        },
        TestCase {
            name: "string_addition",
            script: "tests/testArithmatic/test_string_addition.lox",
            expected: Expected::Text("Hello World!"),
        },
    ];
    CASES
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    #[cfg(unix)]
    fn invoker_printing(dir: &Path, body: &str) -> Invoker {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("lox");
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        Invoker::new(dir)
    }

    fn case(expected: Expected) -> TestCase {
        TestCase {
            name: "case",
            script: "tests/case.lox",
            expected,
        }
    }

    #[test]
    fn catalogue_is_the_six_arithmetic_cases() {
        let names: Vec<_> = catalogue().iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [
                "addition",
                "subtraction",
                "multiplication",
                "division",
                "negate",
                "string_addition"
            ]
        );
        assert!(
            catalogue()
                .iter()
                .all(|c| c.script.starts_with("tests/testArithmatic/"))
        );
    }

    #[cfg(unix)]
    #[test]
    fn integer_output_is_trimmed_and_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = invoker_printing(dir.path(), "printf '  2  \\n'");
        case(Expected::Int(2)).check(&invoker).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn float_output_compares_after_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = invoker_printing(dir.path(), "printf '%s\\n' '-2.2'");
        case(Expected::Float(-2.2)).check(&invoker).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn string_output_compares_trimmed_only() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = invoker_printing(dir.path(), "printf 'Hello World!\\n'");
        case(Expected::Text("Hello World!")).check(&invoker).unwrap();

        // internal whitespace and case are significant
        let err = case(Expected::Text("hello world!"))
            .check(&invoker)
            .unwrap_err();
        assert!(matches!(err, CheckFailure::Mismatch { .. }), "got {err:?}");
    }

    #[cfg(unix)]
    #[test]
    fn non_numeric_output_is_a_parse_failure_not_a_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = invoker_printing(dir.path(), "printf 'Undefined variable a.\\n'");

        let err = case(Expected::Int(2)).check(&invoker).unwrap_err();
        match &err {
            CheckFailure::Parse { expected_type, raw } => {
                assert_eq!(*expected_type, "integer");
                assert_eq!(raw, "Undefined variable a.");
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn wrong_answer_reports_expected_and_actual() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = invoker_printing(dir.path(), "printf '3\\n'");

        let err = case(Expected::Int(2)).check(&invoker).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("expected 2"), "message: {msg}");
        assert!(msg.contains("got 3"), "message: {msg}");
    }

    #[test]
    fn adapter_failures_propagate_as_invoke_errors() {
        let dir = tempfile::tempdir().unwrap();
        let invoker = Invoker::new(dir.path()); // no executable in the root

        let err = case(Expected::Int(2)).check(&invoker).unwrap_err();
        assert!(
            matches!(err, CheckFailure::Invoke(InvokeError::NotFound { .. })),
            "got {err:?}"
        );
    }
}
