//! Executable invocation adapter
//!
//! Wraps a single run of the interpreter executable: resolve the executable
//! and script paths against a configured project root, spawn the process
//! with the script as its only argument, block until it exits, and hand the
//! captured stdout back to the caller untouched.
//!
//! Failure is a tagged [`InvokeError`] rather than an error-shaped string,
//! so callers branch on kind instead of sniffing message prefixes. The
//! `Display` renderings keep the traditional message templates
//! (`Error running '...'`, `'...' executable not found`).

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::debug;

/// Default name of the interpreter binary at the project root.
const EXECUTABLE_NAME: &str = "lox";

/// Environment variable overriding the project root.
pub const ROOT_ENV_VAR: &str = "LOX_ROOT";

/// Poll interval while waiting on a deadline-bounded child.
const WAIT_POLL: Duration = Duration::from_millis(10);

/// Errors that occur while invoking the interpreter executable
#[derive(Debug, Error)]
pub enum InvokeError {
    /// The executable ran but exited non-zero. `stderr` may be empty when
    /// the interpreter died without a diagnostic; both count as the same
    /// failure kind.
    #[error("Error running '{executable}':\n{stderr}")]
    ProcessFailed { executable: String, stderr: String },

    /// The executable could not be found at the resolved path.
    #[error("'{path}' executable not found. Please specify the correct path to '{path}'.")]
    NotFound { path: String },

    /// The configured deadline elapsed; the child has been killed.
    #[error("'{executable}' did not finish within {}s", timeout.as_secs_f64())]
    TimedOut {
        executable: String,
        timeout: Duration,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Invokes the interpreter executable against script files.
///
/// All paths are resolved against an explicitly injected project root, so
/// invocation is independent of the caller's working directory and the
/// adapter can be pointed at a fabricated root in tests.
#[derive(Debug, Clone)]
pub struct Invoker {
    /// Project root that the executable and script paths resolve against
    root: PathBuf,
    /// Interpreter binary, `<root>/lox` unless overridden
    executable: PathBuf,
    /// Per-invocation deadline; `None` blocks until the child exits
    timeout: Option<Duration>,
}

impl Invoker {
    /// Create an invoker anchored at the given project root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let executable = root.join(EXECUTABLE_NAME);
        Self {
            root,
            executable,
            timeout: None,
        }
    }

    /// Create an invoker from the environment: `LOX_ROOT` if set, else the
    /// crate's own manifest directory.
    pub fn from_env() -> Self {
        let root = std::env::var_os(ROOT_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")));
        Self::new(root)
    }

    /// Use a different binary name under the root.
    pub fn with_executable_name(mut self, name: &str) -> Self {
        self.executable = self.root.join(name);
        self
    }

    /// Bound each invocation by a deadline. The child is killed when it
    /// expires and the invocation reports [`InvokeError::TimedOut`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The resolved executable path.
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Resolve a script path given relative to the project root.
    pub fn script_path(&self, script_relative_path: &str) -> PathBuf {
        self.root.join(script_relative_path)
    }

    /// Run the executable against one script and return its raw stdout.
    ///
    /// The script path is resolved against the project root and passed as
    /// the sole argument. Stdout is returned verbatim on a zero exit
    /// status, trailing newline included; trimming and parsing are the
    /// caller's concern. Spawns exactly one child per call, no retries.
    pub fn invoke(&self, script_relative_path: &str) -> Result<String, InvokeError> {
        let script = self.script_path(script_relative_path);
        debug!(
            executable = %self.executable.display(),
            script = %script.display(),
            "invoking interpreter"
        );

        let child = Command::new(&self.executable)
            .arg(&script)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let output = self.wait(child)?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Ok(stdout)
        } else {
            debug!(status = ?output.status.code(), "interpreter exited non-zero");
            Err(InvokeError::ProcessFailed {
                executable: self.executable_name().to_string(),
                stderr,
            })
        }
    }

    /// Wait for the child, enforcing the deadline when one is configured.
    ///
    /// Output is collected only after the process has fully terminated, so
    /// a successful wait always observes complete output.
    fn wait(&self, mut child: Child) -> Result<Output, InvokeError> {
        let Some(timeout) = self.timeout else {
            return Ok(child.wait_with_output()?);
        };

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait()? {
                Some(_status) => return Ok(child.wait_with_output()?),
                None if Instant::now() >= deadline => {
                    child.kill()?;
                    // reap so the kill is not left as a zombie
                    let _ = child.wait_with_output()?;
                    return Err(InvokeError::TimedOut {
                        executable: self.executable_name().to_string(),
                        timeout,
                    });
                }
                None => std::thread::sleep(WAIT_POLL),
            }
        }
    }

    /// Map a spawn failure: a missing binary gets the guidance message,
    /// anything else surfaces as plain I/O.
    fn spawn_error(&self, e: io::Error) -> InvokeError {
        if e.kind() == io::ErrorKind::NotFound {
            InvokeError::NotFound {
                path: self.executable.display().to_string(),
            }
        } else {
            InvokeError::Io(e)
        }
    }

    fn executable_name(&self) -> &str {
        self.executable
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(EXECUTABLE_NAME)
    }
}
