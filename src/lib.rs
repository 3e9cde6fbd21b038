#![forbid(unsafe_code)]
//! Black-box test harness for the `lox` interpreter executable.
//!
//! The interpreter is built separately and treated as an opaque binary:
//! this crate resolves it against a project root, runs it against a script
//! file, and checks the captured output against expected literal values.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `harness` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod harness;

pub use harness::cases::{CheckFailure, Expected, TestCase, catalogue};
pub use harness::invoker::{InvokeError, Invoker};
