//! Mock command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! answers each command with a scripted [`CommandResult`] chosen by the
//! longest registered prefix of the rendered command line, and records every
//! invocation for later assertion.
//!
//! # Example
//!
//! ```
//! use asmago::shell::{mock, CommandRunner, ExternalCommand, MockRunner};
//!
//! let runner = MockRunner::new();
//! runner.respond("aws configure get region", mock::ok("eu-west-1\n"));
//!
//! let cmd = ExternalCommand::aws(["configure", "get", "region", "--profile", "dev"]);
//! let result = runner.capture(&cmd).unwrap();
//! assert_eq!(result.stdout.trim(), "eu-west-1");
//! assert_eq!(runner.count("aws configure get region"), 1);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;

use super::command::{CommandResult, CommandRunner, ExternalCommand, SIGINT};

/// How a command was run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Capture,
    Interactive,
}

/// A recorded call.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: String,
    pub mode: RunMode,
}

/// Successful result with the given stdout.
pub fn ok(stdout: &str) -> CommandResult {
    CommandResult::success(stdout.to_string(), String::new(), Duration::ZERO)
}

/// Failed result with the given exit code and stderr.
pub fn fail(code: i32, stderr: &str) -> CommandResult {
    CommandResult::failure(Some(code), String::new(), stderr.to_string(), Duration::ZERO)
}

/// Result of a process ended by Ctrl-C.
pub fn interrupted() -> CommandResult {
    CommandResult::signalled(SIGINT, String::new(), String::new(), Duration::ZERO)
}

/// Mock [`CommandRunner`].
///
/// Unmatched commands fail with exit code 1 and no output, which is what
/// `aws configure get` does for an unset key.
#[derive(Debug, Default)]
pub struct MockRunner {
    responses: RefCell<HashMap<String, CommandResult>>,
    queues: RefCell<HashMap<String, VecDeque<CommandResult>>>,
    invocations: RefCell<Vec<Invocation>>,
    missing: HashSet<String>,
}

impl MockRunner {
    /// Create a runner where every program is installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every command starting with `prefix` with `result`.
    pub fn respond(&self, prefix: &str, result: CommandResult) {
        self.responses
            .borrow_mut()
            .insert(prefix.to_string(), result);
    }

    /// Queue results for commands starting with `prefix`.
    ///
    /// Queued results are used in order; once exhausted, falls back to
    /// [`respond`](Self::respond) or the unmatched default.
    pub fn queue(&self, prefix: &str, results: Vec<CommandResult>) {
        self.queues
            .borrow_mut()
            .insert(prefix.to_string(), results.into_iter().collect());
    }

    /// Make [`locate`](CommandRunner::locate) fail for `program`.
    pub fn set_missing(&mut self, program: &str) {
        self.missing.insert(program.to_string());
    }

    /// All recorded invocations, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.borrow().clone()
    }

    /// Rendered command lines, in order.
    pub fn commands(&self) -> Vec<String> {
        self.invocations
            .borrow()
            .iter()
            .map(|i| i.command.clone())
            .collect()
    }

    /// Number of invocations whose command line starts with `prefix`.
    pub fn count(&self, prefix: &str) -> usize {
        self.invocations
            .borrow()
            .iter()
            .filter(|i| i.command.starts_with(prefix))
            .count()
    }

    fn answer(&self, command: &ExternalCommand, mode: RunMode) -> CommandResult {
        let line = command.to_string();
        self.invocations.borrow_mut().push(Invocation {
            command: line.clone(),
            mode,
        });

        let mut queues = self.queues.borrow_mut();
        if let Some(key) = longest_prefix(queues.keys(), &line, |k| {
            queues.get(k).is_some_and(|q| !q.is_empty())
        }) {
            if let Some(result) = queues.get_mut(&key).and_then(VecDeque::pop_front) {
                return result;
            }
        }

        let responses = self.responses.borrow();
        if let Some(key) = longest_prefix(responses.keys(), &line, |_| true) {
            if let Some(result) = responses.get(&key) {
                return result.clone();
            }
        }

        fail(1, "")
    }
}

fn longest_prefix<'a>(
    keys: impl Iterator<Item = &'a String>,
    line: &str,
    usable: impl Fn(&String) -> bool,
) -> Option<String> {
    keys.filter(|k| line.starts_with(k.as_str()) && usable(k))
        .max_by_key(|k| k.len())
        .cloned()
}

impl CommandRunner for MockRunner {
    fn capture(&self, command: &ExternalCommand) -> Result<CommandResult> {
        Ok(self.answer(command, RunMode::Capture))
    }

    fn interactive(&self, command: &ExternalCommand) -> Result<CommandResult> {
        Ok(self.answer(command, RunMode::Interactive))
    }

    fn locate(&self, program: &str) -> Option<PathBuf> {
        if self.missing.contains(program) {
            None
        } else {
            Some(PathBuf::from("/usr/local/bin").join(program))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmatched_command_fails_quietly() {
        let runner = MockRunner::new();
        let result = runner.capture(&ExternalCommand::aws(["sts"])).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(1));
        assert!(result.stderr.is_empty());
    }

    #[test]
    fn longest_prefix_wins() {
        let runner = MockRunner::new();
        runner.respond("aws", ok("generic"));
        runner.respond("aws configure get region", ok("specific"));

        let cmd = ExternalCommand::aws(["configure", "get", "region"]);
        assert_eq!(runner.capture(&cmd).unwrap().stdout, "specific");

        let cmd = ExternalCommand::aws(["configure", "get", "sso_session"]);
        assert_eq!(runner.capture(&cmd).unwrap().stdout, "generic");
    }

    #[test]
    fn queue_is_consumed_before_fallback() {
        let runner = MockRunner::new();
        runner.queue("aws ec2", vec![fail(255, "Token has expired"), ok("[]")]);
        runner.respond("aws ec2", ok("fallback"));

        let cmd = ExternalCommand::aws(["ec2", "describe-instances"]);
        assert!(!runner.capture(&cmd).unwrap().success);
        assert_eq!(runner.capture(&cmd).unwrap().stdout, "[]");
        assert_eq!(runner.capture(&cmd).unwrap().stdout, "fallback");
    }

    #[test]
    fn records_invocations_with_mode() {
        let runner = MockRunner::new();
        runner
            .interactive(&ExternalCommand::aws(["sso", "login", "--profile", "dev"]))
            .unwrap();
        runner
            .capture(&ExternalCommand::aws(["configure", "get", "region"]))
            .unwrap();

        let calls = runner.invocations();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].mode, RunMode::Interactive);
        assert_eq!(calls[0].command, "aws sso login --profile dev");
        assert_eq!(runner.count("aws sso login"), 1);
        assert_eq!(runner.count("aws"), 2);
    }

    #[test]
    fn locate_respects_missing_set() {
        let mut runner = MockRunner::new();
        assert!(runner.locate("aws").is_some());
        runner.set_missing("aws");
        assert!(runner.locate("aws").is_none());
    }

    #[test]
    fn interrupted_helper_is_sigint() {
        assert!(interrupted().was_interrupted());
    }
}
