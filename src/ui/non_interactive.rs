//! Non-interactive UI for piped or headless runs.

use std::collections::HashMap;

use crate::error::{AsmagoError, Result};

use super::prompts::default_bool;
use super::theme::AsmagoTheme;
use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Prefix of environment variables that answer prompts by key.
pub const PROMPT_ENV_PREFIX: &str = "ASMAGO_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `ASMAGO_PROMPT_<KEY>` variables, then from the
/// prompt's default. A selection with neither is cancelled; free-form input
/// with neither is an error.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
    theme: AsmagoTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
            theme: AsmagoTheme::plain(),
        }
    }

    fn answer<'a>(&'a self, prompt: &'a Prompt) -> Option<&'a String> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        self.env_overrides.get(&env_key).or(prompt.default.as_ref())
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let answer = self.answer(prompt).cloned();
        tracing::debug!("Non-interactive answer for '{}': {:?}", prompt.key, answer);

        match &prompt.prompt_type {
            PromptType::Confirm => Ok(PromptResult::Bool(default_bool(answer.as_deref()))),
            PromptType::Input => answer.map(PromptResult::String).ok_or_else(|| {
                AsmagoError::Other(anyhow::anyhow!(
                    "Cannot prompt for '{}' in non-interactive mode (set {}{})",
                    prompt.key,
                    PROMPT_ENV_PREFIX,
                    prompt.key.to_uppercase()
                ))
            }),
            PromptType::Select { options } | PromptType::FuzzySelect { options } => {
                Ok(answer
                    .filter(|value| options.iter().any(|o| o.value == *value))
                    .map_or(PromptResult::Cancelled, PromptResult::String))
            }
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("{}", message);
        }
        Box::new(NoopSpinner)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("\n{}\n", title);
        }
    }

    fn show_command(&mut self, command: &str) {
        println!("{}", self.theme.format_command(command));
    }
}

/// Spinner with nothing to animate.
struct NoopSpinner;

impl SpinnerHandle for NoopSpinner {
    fn finish_clear(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::PromptOption;

    fn profiles() -> Prompt {
        Prompt::search(
            "profile",
            "Select AWS profile",
            vec![
                PromptOption::new("dev", "dev"),
                PromptOption::new("qa", "qa"),
            ],
        )
    }

    #[test]
    fn input_uses_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::input("region", "Region", Some("ap-southeast-1"));
        assert_eq!(
            ui.prompt(&prompt).unwrap(),
            PromptResult::String("ap-southeast-1".to_string())
        );
    }

    #[test]
    fn input_without_default_fails() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::input("region", "Region", None);
        let err = ui.prompt(&prompt).unwrap_err();
        assert!(err.to_string().contains("ASMAGO_PROMPT_REGION"));
    }

    #[test]
    fn select_without_answer_is_cancelled() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        assert_eq!(ui.prompt(&profiles()).unwrap(), PromptResult::Cancelled);
    }

    #[test]
    fn select_uses_env_override() {
        let mut overrides = HashMap::new();
        overrides.insert("ASMAGO_PROMPT_PROFILE".to_string(), "qa".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        assert_eq!(
            ui.prompt(&profiles()).unwrap(),
            PromptResult::String("qa".to_string())
        );
    }

    #[test]
    fn select_ignores_unknown_override() {
        let mut overrides = HashMap::new();
        overrides.insert("ASMAGO_PROMPT_PROFILE".to_string(), "prod".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        assert_eq!(ui.prompt(&profiles()).unwrap(), PromptResult::Cancelled);
    }

    #[test]
    fn confirm_uses_default() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let prompt = Prompt::confirm("confirm_clean", "Delete?", false);
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(false));
    }

    #[test]
    fn confirm_override() {
        let mut overrides = HashMap::new();
        overrides.insert("ASMAGO_PROMPT_CONFIRM_CLEAN".to_string(), "yes".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);
        let prompt = Prompt::confirm("confirm_clean", "Delete?", false);
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(true));
    }

    #[test]
    fn output_mode_preserved() {
        let ui = NonInteractiveUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn spinner_is_silent_and_clears() {
        let mut ui = NonInteractiveUI::new(OutputMode::Quiet);
        let mut spinner = ui.start_spinner("Fetching running instances...");
        spinner.finish_clear();
    }
}
