//! Interactive renderers backed by cliclack

use super::kinds::{
    ConfirmPrompt, MultiSelectPrompt, PasswordPrompt, SelectPrompt, SuggestPrompt, TextPrompt,
};
use super::validate::ValidationOutcome;
use std::io;

/// Print a prompt's hint above the widget
pub fn remark(hint: Option<&str>) -> io::Result<()> {
    if let Some(hint) = hint {
        cliclack::log::remark(hint)?;
    }
    Ok(())
}

pub fn text(prompt: &TextPrompt) -> io::Result<ValidationOutcome<String>> {
    let mut input = cliclack::input(&prompt.label).required(false);
    if let Some(placeholder) = &prompt.placeholder {
        input = input.placeholder(placeholder);
    }
    if let Some(default) = &prompt.default {
        input = input.default_input(default);
    }

    let value: String = input.interact()?;
    Ok(ValidationOutcome::Accepted(value))
}

pub fn password(prompt: &PasswordPrompt) -> io::Result<ValidationOutcome<String>> {
    let value = cliclack::password(&prompt.label).mask('▪').interact()?;
    Ok(ValidationOutcome::Accepted(value))
}

pub fn confirm(prompt: &ConfirmPrompt) -> io::Result<ValidationOutcome<bool>> {
    let value = cliclack::confirm(&prompt.label)
        .initial_value(prompt.default)
        .interact()?;
    Ok(ValidationOutcome::Accepted(value))
}

pub fn select(prompt: &SelectPrompt) -> io::Result<ValidationOutcome<String>> {
    let mut select = cliclack::select(&prompt.label);
    for (value, label) in &prompt.options {
        select = select.item(value.clone(), label, "");
    }
    if let Some(default) = &prompt.default {
        select = select.initial_value(default.clone());
    }

    let value: String = select.interact()?;
    Ok(ValidationOutcome::Accepted(value))
}

pub fn multi_select(prompt: &MultiSelectPrompt) -> io::Result<ValidationOutcome<Vec<String>>> {
    let mut multi = cliclack::multiselect(&prompt.label);
    for (value, label) in &prompt.options {
        multi = multi.item(value.clone(), label, "");
    }

    let values: Vec<String> = multi
        .initial_values(prompt.default.clone())
        .required(false)
        .interact()?;
    Ok(ValidationOutcome::Accepted(values))
}

pub fn suggest(prompt: &SuggestPrompt) -> io::Result<ValidationOutcome<String>> {
    // cliclack has no completion support; the first candidate becomes the placeholder
    let candidates = prompt.suggestions.candidates("");
    let mut input = cliclack::input(&prompt.label).required(false);
    if let Some(placeholder) = prompt.placeholder.as_ref().or(candidates.first()) {
        input = input.placeholder(placeholder);
    }
    if let Some(default) = &prompt.default {
        input = input.default_input(default);
    }

    let value: String = input.interact()?;
    Ok(ValidationOutcome::Accepted(value))
}
