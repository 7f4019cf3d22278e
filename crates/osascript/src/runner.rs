//! Launching the automation interpreter.
//!
//! Every call spawns exactly one interpreter process. There is no pooling,
//! no timeout and no cancellation: a hung interpreter hangs the caller.

use crate::error::{OsascriptError, Result};
use crate::script::{osascript_args, Script};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::debug;

/// Default interpreter program.
pub const DEFAULT_PROGRAM: &str = "osascript";

/// Environment variable naming an alternative interpreter program.
pub const PROGRAM_ENV: &str = "OSASCRIPT_BIN";

/// How a single standard stream of the interpreter is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdioMode {
    /// Share the caller's stream
    Inherit,

    /// Capture the stream
    Piped,

    /// Discard the stream
    Null,
}

impl StdioMode {
    fn to_stdio(self) -> Stdio {
        match self {
            StdioMode::Inherit => Stdio::inherit(),
            StdioMode::Piped => Stdio::piped(),
            StdioMode::Null => Stdio::null(),
        }
    }
}

/// Caller-supplied stream configuration.
///
/// Unset keys fall back to the defaults of the invocation mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdioOptions {
    pub stdin: Option<StdioMode>,
    pub stdout: Option<StdioMode>,
    pub stderr: Option<StdioMode>,
}

impl StdioOptions {
    /// Defaults for capturing mode: stdin inherited, output streams captured.
    pub const CAPTURING: StdioOptions = StdioOptions {
        stdin: Some(StdioMode::Inherit),
        stdout: Some(StdioMode::Piped),
        stderr: Some(StdioMode::Piped),
    };

    /// Defaults for interactive mode: everything inherited.
    pub const INTERACTIVE: StdioOptions = StdioOptions {
        stdin: Some(StdioMode::Inherit),
        stdout: Some(StdioMode::Inherit),
        stderr: Some(StdioMode::Inherit),
    };

    /// Capture stdout and stderr, leave stdin inherited.
    pub fn piped() -> Self {
        Self {
            stdin: None,
            stdout: Some(StdioMode::Piped),
            stderr: Some(StdioMode::Piped),
        }
    }

    /// Merge `self` over `defaults`, key by key. Keys set on `self` win.
    pub fn merged_over(&self, defaults: &StdioOptions) -> StdioOptions {
        StdioOptions {
            stdin: self.stdin.or(defaults.stdin),
            stdout: self.stdout.or(defaults.stdout),
            stderr: self.stderr.or(defaults.stderr),
        }
    }

    fn apply(&self, command: &mut Command) {
        if let Some(mode) = self.stdin {
            command.stdin(mode.to_stdio());
        }
        if let Some(mode) = self.stdout {
            command.stdout(mode.to_stdio());
        }
        if let Some(mode) = self.stderr {
            command.stderr(mode.to_stdio());
        }
    }
}

/// Completion descriptor of an interactive invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Exit code, absent when terminated by a signal
    pub code: Option<i32>,

    /// Terminating signal, if any
    pub signal: Option<i32>,

    /// Standard output, when the caller piped it
    pub stdout: Option<String>,

    /// Standard error, when the caller piped it
    pub stderr: Option<String>,
}

impl Completion {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    fn from_parts(status: ExitStatus, stdout: Option<String>, stderr: Option<String>) -> Self {
        Self {
            code: status.code(),
            signal: exit_signal(&status),
            stdout,
            stderr,
        }
    }
}

#[cfg(unix)]
fn exit_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn exit_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Executes scripts with the automation interpreter.
///
/// Everything above the invoker talks to the interpreter through this trait.
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    /// Capturing mode: return decoded stdout, fail on nonzero exit.
    async fn exec(&self, script: &Script, options: &StdioOptions) -> Result<String>;

    /// Interactive mode: resolve with the completion descriptor whatever the
    /// exit status. Only a failure to launch is an error.
    async fn spawn(&self, script: &Script, options: &StdioOptions) -> Result<Completion>;
}

/// Runner backed by a real interpreter process.
#[derive(Debug, Clone)]
pub struct Osascript {
    program: OsString,
}

impl Osascript {
    pub fn new() -> Self {
        Self::with_program(DEFAULT_PROGRAM)
    }

    /// Interpreter named by `OSASCRIPT_BIN`, else the default program.
    pub fn from_env() -> Self {
        match std::env::var_os(PROGRAM_ENV) {
            Some(program) if !program.is_empty() => Self::with_program(program),
            _ => Self::new(),
        }
    }

    /// Use a different interpreter executable.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &OsString {
        &self.program
    }

    fn command(&self, script: &Script, stdio: &StdioOptions) -> Command {
        let mut command = Command::new(&self.program);
        command.args(osascript_args(script));
        stdio.apply(&mut command);
        command
    }
}

impl Default for Osascript {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptRunner for Osascript {
    async fn exec(&self, script: &Script, options: &StdioOptions) -> Result<String> {
        let stdio = options.merged_over(&StdioOptions::CAPTURING);
        debug!(statements = script.len(), ?stdio, "exec osascript");

        // `Command::output` forces pipes; spawning keeps the configured stdio
        let child = self.command(script, &stdio).spawn()?;
        let output = child.wait_with_output().await?;
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

        if !output.status.success() {
            return Err(OsascriptError::ProcessFailure {
                code: output.status.code(),
                stdout,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(stdout)
    }

    async fn spawn(&self, script: &Script, options: &StdioOptions) -> Result<Completion> {
        let stdio = options.merged_over(&StdioOptions::INTERACTIVE);
        debug!(statements = script.len(), ?stdio, "spawn osascript");

        let child = self.command(script, &stdio).spawn()?;
        let output = child.wait_with_output().await?;

        let stdout = (stdio.stdout == Some(StdioMode::Piped))
            .then(|| String::from_utf8_lossy(&output.stdout).into_owned());
        let stderr = (stdio.stderr == Some(StdioMode::Piped))
            .then(|| String::from_utf8_lossy(&output.stderr).into_owned());

        let completion = Completion::from_parts(output.status, stdout, stderr);
        debug!(code = ?completion.code, signal = ?completion.signal, "osascript finished");
        Ok(completion)
    }
}
