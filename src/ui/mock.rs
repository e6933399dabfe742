//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use asmago::ui::{MockUI, Prompt, PromptOption, PromptResult, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("profile", "dev");
//! ui.cancel_prompt("region");
//!
//! let prompt = Prompt::search("profile", "Select AWS profile", vec![
//!     PromptOption::new("dev", "dev"),
//!     PromptOption::new("qa", "qa"),
//! ]);
//! assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::String("dev".into()));
//!
//! ui.success("Done!");
//! assert!(ui.has_success("Done"));
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::Result;

use super::prompts::default_bool;
use super::{OutputMode, Prompt, PromptOption, PromptResult, PromptType, SpinnerHandle, UserInterface};

#[derive(Debug, Clone)]
enum Answer {
    Value(String),
    Cancel,
}

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses.
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked more than once.
///
/// A select prompt answer may name an option by value or by label.
/// Unanswered selections are cancelled; unanswered confirms and inputs
/// take the prompt default.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    commands: Vec<String>,
    spinners: Vec<String>,
    answers: HashMap<String, Answer>,
    queues: HashMap<String, VecDeque<Answer>>,
    prompts_shown: Vec<String>,
    options_shown: HashMap<String, Vec<PromptOption>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::new()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.answers
            .insert(key.to_string(), Answer::Value(response.to_string()));
    }

    /// Make every prompt with this key come back cancelled.
    pub fn cancel_prompt(&mut self, key: &str) {
        self.answers.insert(key.to_string(), Answer::Cancel);
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or defaults.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses
            .into_iter()
            .map(|s| Answer::Value(s.to_string()))
            .collect();
        self.queues.insert(key.to_string(), queue);
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all command lines shown.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Whether a prompt with this key was shown.
    pub fn was_prompted(&self, key: &str) -> bool {
        self.prompts_shown.iter().any(|k| k == key)
    }

    /// Labels offered by the most recent select prompt with this key.
    pub fn option_labels(&self, key: &str) -> Vec<String> {
        self.options_shown
            .get(key)
            .map(|options| options.iter().map(|o| o.label.clone()).collect())
            .unwrap_or_default()
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    fn next_answer(&mut self, key: &str) -> Option<Answer> {
        if let Some(answer) = self.queues.get_mut(key).and_then(VecDeque::pop_front) {
            return Some(answer);
        }
        self.answers.get(key).cloned()
    }
}

fn resolve_option(options: &[PromptOption], response: &str) -> String {
    options
        .iter()
        .find(|o| o.value == response || o.label == response)
        .map(|o| o.value.clone())
        .unwrap_or_else(|| response.to_string())
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());
        let answer = self.next_answer(&prompt.key);

        let result = match (&prompt.prompt_type, answer) {
            (_, Some(Answer::Cancel)) => PromptResult::Cancelled,
            (PromptType::Confirm, Some(Answer::Value(v))) => {
                PromptResult::Bool(default_bool(Some(&v)))
            }
            (PromptType::Confirm, None) => {
                PromptResult::Bool(default_bool(prompt.default.as_deref()))
            }
            (PromptType::Input, Some(Answer::Value(v))) => PromptResult::String(v),
            (PromptType::Input, None) => {
                PromptResult::String(prompt.default.clone().unwrap_or_default())
            }
            (PromptType::Select { options } | PromptType::FuzzySelect { options }, answer) => {
                self.options_shown
                    .insert(prompt.key.clone(), options.clone());
                match answer {
                    Some(Answer::Value(v)) => PromptResult::String(resolve_option(options, &v)),
                    _ => PromptResult::Cancelled,
                }
            }
        };
        Ok(result)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_command(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }
}

/// Mock spinner that remembers whether it was cleared.
#[derive(Debug, Default)]
pub struct MockSpinner {
    cleared: bool,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `finish_clear` has been called.
    pub fn is_cleared(&self) -> bool {
        self.cleared
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish_clear(&mut self) {
        self.cleared = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions() -> Prompt {
        Prompt::select(
            "region",
            "Region",
            vec![
                PromptOption::new("Singapore", "ap-southeast-1"),
                PromptOption::new("Ireland", "eu-west-1"),
            ],
        )
    }

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();

        ui.message("Hello");
        ui.success("Done");
        ui.warning("Be careful");
        ui.error("Oops");
        ui.show_command("aws ssm start-session");

        assert_eq!(ui.messages(), &["Hello"]);
        assert_eq!(ui.successes(), &["Done"]);
        assert_eq!(ui.warnings(), &["Be careful"]);
        assert_eq!(ui.errors(), &["Oops"]);
        assert_eq!(ui.commands(), &["aws ssm start-session"]);
    }

    #[test]
    fn select_answer_by_value_or_label() {
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("region", vec!["eu-west-1", "Singapore"]);

        assert_eq!(
            ui.prompt(&regions()).unwrap(),
            PromptResult::String("eu-west-1".into())
        );
        assert_eq!(
            ui.prompt(&regions()).unwrap(),
            PromptResult::String("ap-southeast-1".into())
        );
        assert_eq!(ui.option_labels("region"), vec!["Singapore", "Ireland"]);
    }

    #[test]
    fn unanswered_select_is_cancelled() {
        let mut ui = MockUI::new();
        assert_eq!(ui.prompt(&regions()).unwrap(), PromptResult::Cancelled);
        assert!(ui.was_prompted("region"));
    }

    #[test]
    fn cancel_prompt_applies_to_every_type() {
        let mut ui = MockUI::new();
        ui.cancel_prompt("confirm_clean");
        let prompt = Prompt::confirm("confirm_clean", "Delete?", true);
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Cancelled);
    }

    #[test]
    fn queue_falls_back_to_fixed_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("region", "ap-southeast-1");
        ui.queue_prompt_responses("region", vec!["eu-west-1"]);

        assert_eq!(
            ui.prompt(&regions()).unwrap(),
            PromptResult::String("eu-west-1".into())
        );
        assert_eq!(
            ui.prompt(&regions()).unwrap(),
            PromptResult::String("ap-southeast-1".into())
        );
    }

    #[test]
    fn input_and_confirm_fall_back_to_default() {
        let mut ui = MockUI::new();
        let input = Prompt::input("region", "Region", Some("ap-southeast-1"));
        assert_eq!(
            ui.prompt(&input).unwrap(),
            PromptResult::String("ap-southeast-1".into())
        );
        let confirm = Prompt::confirm("confirm_refresh", "Refresh?", true);
        assert_eq!(ui.prompt(&confirm).unwrap(), PromptResult::Bool(true));
    }

    #[test]
    fn mock_ui_captures_spinners() {
        let mut ui = MockUI::new();
        let mut spinner = ui.start_spinner("Fetching running instances...");
        spinner.finish_clear();
        assert_eq!(ui.spinners(), &["Fetching running instances..."]);
    }

    #[test]
    fn mock_spinner_records_clear() {
        let mut spinner = MockSpinner::new();
        assert!(!spinner.is_cleared());
        spinner.finish_clear();
        assert!(spinner.is_cleared());
    }
}
