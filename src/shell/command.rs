//! External command execution.
//!
//! Everything asmago delegates to the `aws` client goes through the
//! [`CommandRunner`] trait so flows can be exercised against
//! [`MockRunner`](super::MockRunner) in tests.

use crate::error::{AsmagoError, Result};
use std::fmt;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::platform::{find_executable, InterruptGuard};

/// A program plus its arguments, never passed through a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    /// Create a command for an arbitrary program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Create an `aws` command with the given arguments.
    pub fn aws<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("aws").args(args)
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments, excluding the program name.
    pub fn arguments(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                write!(f, " '{}'", arg.replace('\'', r"'\''"))?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Terminating signal number, if any (Unix only).
    pub signal: Option<i32>,

    /// Captured standard output (empty when inherited).
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            signal: None,
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            signal: None,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Create a result for a process terminated by a signal.
    pub fn signalled(signal: i32, stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: None,
            signal: Some(signal),
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Whether the process was ended by an operator interrupt.
    ///
    /// Covers both a SIGINT death and a child that caught the interrupt
    /// and exited with the shell convention `128 + SIGINT`, as `aws` does.
    pub fn was_interrupted(&self) -> bool {
        self.signal == Some(SIGINT) || self.exit_code == Some(INTERRUPTED_EXIT_CODE)
    }

    /// Stdout followed by stderr, as the operator would have seen them.
    pub fn combined_output(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (true, _) => self.stderr.clone(),
            (false, true) => self.stdout.clone(),
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr),
        }
    }

    fn from_status(status: ExitStatus, stdout: String, stderr: String, duration: Duration) -> Self {
        if status.success() {
            return Self::success(stdout, stderr, duration);
        }
        match terminating_signal(&status) {
            Some(signal) => Self::signalled(signal, stdout, stderr, duration),
            None => Self::failure(status.code(), stdout, stderr, duration),
        }
    }
}

/// SIGINT's number on every platform asmago supports.
pub const SIGINT: i32 = 2;

/// Exit code of a process that handled SIGINT and exited on its own.
pub const INTERRUPTED_EXIT_CODE: i32 = 128 + SIGINT;

#[cfg(unix)]
fn terminating_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn terminating_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Executes external programs on behalf of the core.
pub trait CommandRunner {
    /// Run a command with stdout and stderr captured.
    fn capture(&self, command: &ExternalCommand) -> Result<CommandResult>;

    /// Run a command attached to the operator's terminal.
    ///
    /// Stdin and stdout are inherited. Stderr is echoed to the terminal as
    /// it arrives and also captured into the result for failure matching.
    fn interactive(&self, command: &ExternalCommand) -> Result<CommandResult>;

    /// Locate a program on the search path.
    fn locate(&self, program: &str) -> Option<PathBuf>;
}

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner.
    pub fn new() -> Self {
        Self
    }
}

fn spawn_error(command: &ExternalCommand, e: std::io::Error) -> AsmagoError {
    AsmagoError::CommandFailed {
        command: command.to_string(),
        code: None,
        output: e.to_string(),
    }
}

impl CommandRunner for SystemRunner {
    fn capture(&self, command: &ExternalCommand) -> Result<CommandResult> {
        let start = Instant::now();
        tracing::debug!("Running (captured): {}", command);

        let output = Command::new(command.program())
            .args(command.arguments())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| spawn_error(command, e))?;

        Ok(CommandResult::from_status(
            output.status,
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            start.elapsed(),
        ))
    }

    fn interactive(&self, command: &ExternalCommand) -> Result<CommandResult> {
        let start = Instant::now();
        tracing::debug!("Running (interactive): {}", command);

        let mut child = Command::new(command.program())
            .args(command.arguments())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(command, e))?;

        // Installed after spawn so the child keeps the default disposition.
        let _guard = InterruptGuard::ignore();

        let tee = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut captured = Vec::new();
                let mut buf = [0u8; 4096];
                let mut terminal = std::io::stderr();
                while let Ok(n) = pipe.read(&mut buf) {
                    if n == 0 {
                        break;
                    }
                    terminal.write_all(&buf[..n]).ok();
                    terminal.flush().ok();
                    captured.extend_from_slice(&buf[..n]);
                }
                String::from_utf8_lossy(&captured).to_string()
            })
        });

        let status = child.wait().map_err(|e| spawn_error(command, e))?;
        let stderr = tee
            .map(|handle| handle.join().unwrap_or_default())
            .unwrap_or_default();

        Ok(CommandResult::from_status(
            status,
            String::new(),
            stderr,
            start.elapsed(),
        ))
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        find_executable(program)
    }
}
