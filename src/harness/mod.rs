//! Harness core: executable invocation and the test-case catalogue
//!
//! ## Modules
//!
//! - `invoker` - resolves paths against a project root and runs the
//!   interpreter executable as a child process
//! - `cases` - the fixed catalogue of script/expected-value pairs and the
//!   per-case comparison rules

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod cases;
pub mod invoker;
