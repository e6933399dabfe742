//! Interactive prompts.
//!
//! Select and confirm prompts use dialoguer's `interact_on_opt`, so Esc
//! and `q` come back as [`PromptResult::Cancelled`] instead of an error.
//! Ctrl-C reaches dialoguer as an `Interrupted` read error in raw mode and
//! is treated the same way.

use std::io;

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, FuzzySelect, Input, Select};

use crate::error::{AsmagoError, Result};

use super::{Prompt, PromptOption, PromptResult, PromptType};

/// Convert dialoguer errors to AsmagoError.
fn map_dialoguer_err(e: dialoguer::Error) -> AsmagoError {
    AsmagoError::Io(e.into())
}

/// Turn a Ctrl-C during a prompt into a cancelled answer.
fn cancel_on_interrupt<T>(result: std::result::Result<T, dialoguer::Error>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(map_dialoguer_err(e)),
    }
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Select { options } => prompt_select(prompt, options, term),
        PromptType::FuzzySelect { options } => prompt_fuzzy_select(prompt, options, term),
    }
}

/// Parse a prompt default as a yes/no answer.
pub(crate) fn default_bool(default: Option<&str>) -> bool {
    default
        .map(|s| matches!(s.to_lowercase().as_str(), "true" | "y" | "yes"))
        .unwrap_or(false)
}

/// Index of the option whose value matches the default.
fn default_index(prompt: &Prompt, options: &[PromptOption]) -> usize {
    prompt
        .default
        .as_ref()
        .and_then(|d| options.iter().position(|o| o.value == *d))
        .unwrap_or(0)
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = prompt_theme();
    let result = Confirm::with_theme(&theme)
        .with_prompt(&prompt.question)
        .default(default_bool(prompt.default.as_deref()))
        .interact_on_opt(term);
    let result = cancel_on_interrupt(result)?.flatten();

    Ok(result.map_or(PromptResult::Cancelled, PromptResult::Bool))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = prompt_theme();
    let input = Input::<String>::with_theme(&theme).with_prompt(&prompt.question);

    let result = if let Some(default) = &prompt.default {
        input.default(default.clone()).interact_on(term)
    } else {
        input.interact_on(term)
    };

    Ok(cancel_on_interrupt(result)?.map_or(PromptResult::Cancelled, PromptResult::String))
}

fn prompt_select(prompt: &Prompt, options: &[PromptOption], term: &Term) -> Result<PromptResult> {
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

    let theme = prompt_theme();
    let selection = Select::with_theme(&theme)
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(default_index(prompt, options))
        .interact_on_opt(term);
    let selection = cancel_on_interrupt(selection)?.flatten();

    Ok(selected(options, selection))
}

fn prompt_fuzzy_select(
    prompt: &Prompt,
    options: &[PromptOption],
    term: &Term,
) -> Result<PromptResult> {
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

    let theme = prompt_theme();
    let selection = FuzzySelect::with_theme(&theme)
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(default_index(prompt, options))
        .interact_on_opt(term);
    let selection = cancel_on_interrupt(selection)?.flatten();

    Ok(selected(options, selection))
}

fn selected(options: &[PromptOption], selection: Option<usize>) -> PromptResult {
    selection
        .and_then(|i| options.get(i))
        .map_or(PromptResult::Cancelled, |o| PromptResult::String(o.value.clone()))
}
