//! Operator-facing terminal interface.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for piped or headless runs
//! - [`MockUI`] for tests
//! - Prompts, spinners and relative-time formatting
//!
//! # Example
//!
//! ```
//! use asmago::ui::{create_ui, OutputMode};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("asmago");
//! ui.success("Shortcut executed successfully.");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod progress;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::{MockSpinner, MockUI};
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use progress::format_relative_time;
pub use prompts::prompt_user;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, AsmagoTheme};

use crate::error::Result;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a prompt and get user input.
    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    /// Start a spinner for an operation.
    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a command line the way it would be run.
    fn show_command(&mut self, command: &str);
}

/// Handle for controlling a spinner.
///
/// Outcomes are reported through the UI once the spinner is gone, so the
/// only way to finish one is to clear it.
pub trait SpinnerHandle {
    /// Remove the spinner without a final line.
    fn finish_clear(&mut self);
}

/// A prompt to show to the user.
#[derive(Debug, Clone)]
pub struct Prompt {
    /// Unique key for the prompt (used for lookup in tests and overrides).
    pub key: String,
    /// The question to display.
    pub question: String,
    /// The type of prompt.
    pub prompt_type: PromptType,
    /// Default value if user just presses enter.
    pub default: Option<String>,
}

impl Prompt {
    /// A yes/no question.
    pub fn confirm(key: &str, question: &str, default: bool) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Confirm,
            default: Some(default.to_string()),
        }
    }

    /// A free-form text question.
    pub fn input(key: &str, question: &str, default: Option<&str>) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Input,
            default: default.map(String::from),
        }
    }

    /// A short list picked with the arrow keys.
    pub fn select(key: &str, question: &str, options: Vec<PromptOption>) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::Select { options },
            default: None,
        }
    }

    /// A list the operator can narrow by typing.
    pub fn search(key: &str, question: &str, options: Vec<PromptOption>) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type: PromptType::FuzzySelect { options },
            default: None,
        }
    }

    /// Options for select-style prompts.
    pub fn options(&self) -> &[PromptOption] {
        match &self.prompt_type {
            PromptType::Select { options } | PromptType::FuzzySelect { options } => options,
            PromptType::Confirm | PromptType::Input => &[],
        }
    }
}

/// The type of prompt.
#[derive(Debug, Clone)]
pub enum PromptType {
    /// Yes/no confirmation.
    Confirm,
    /// Free-form text input.
    Input,
    /// Select one from a list of options.
    Select { options: Vec<PromptOption> },
    /// Select one from a list, filtering as the operator types.
    FuzzySelect { options: Vec<PromptOption> },
}

/// An option in a select prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOption {
    /// Display label.
    pub label: String,
    /// Value returned when selected.
    pub value: String,
}

impl PromptOption {
    /// Create an option.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Result of a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    /// Boolean result from confirm.
    Bool(bool),
    /// String result from input or select.
    String(String),
    /// The operator backed out (Esc or Ctrl-C).
    Cancelled,
}

impl PromptResult {
    /// Get as string, if a value was given.
    pub fn into_value(self) -> Option<String> {
        match self {
            Self::String(s) => Some(s),
            Self::Bool(b) => Some(b.to_string()),
            Self::Cancelled => None,
        }
    }

    /// Get as bool if this is a Bool result. Cancelling reads as "no".
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Cancelled => Some(false),
            Self::String(_) => None,
        }
    }

    /// Whether the operator cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
