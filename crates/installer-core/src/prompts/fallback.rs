//! Line-based renderers, one per prompt kind
//!
//! Each renderer prints the question, reads a single line, and turns it into
//! a candidate answer. Required and custom validation happen afterwards in
//! [`super::retry::prompt_until_valid`].

use super::io::LineIo;
use super::kinds::{
    ConfirmPrompt, MultiSelectPrompt, Options, PasswordPrompt, SelectPrompt, SuggestPrompt,
    TextPrompt,
};
use super::validate::ValidationOutcome;
use colored::Colorize;
use std::io;

/// Display label of the sentinel that lets a multi-select pick nothing
pub const NONE_OPTION: &str = "None";

fn question(label: &str, default: Option<&str>) -> String {
    match default {
        Some(default) if !default.is_empty() => {
            format!(" {} [{}]:", label.green(), default.yellow())
        }
        _ => format!(" {}:", label.green()),
    }
}

fn write_hint(io: &mut dyn LineIo, hint: &Option<String>) -> io::Result<()> {
    if let Some(hint) = hint {
        io.write_line(&format!(" {}", hint.dimmed()))?;
    }
    Ok(())
}

fn write_options(io: &mut dyn LineIo, options: &Options, with_none: bool) -> io::Result<()> {
    if with_none {
        io.write_line(&format!("  [{}] {}", "0".yellow(), NONE_OPTION))?;
    }
    for (position, (_, label)) in options.iter().enumerate() {
        io.write_line(&format!("  [{}] {}", (position + 1).to_string().yellow(), label))?;
    }
    Ok(())
}

fn read_trimmed(line: Option<String>) -> String {
    line.map(|l| l.trim().to_string()).unwrap_or_default()
}

/// Resolve a typed choice to an option value.
///
/// Accepts the 1-based displayed position, the exact value, or the display
/// label compared case-insensitively.
pub fn resolve_choice(options: &Options, typed: &str) -> Option<String> {
    if let Ok(position) = typed.parse::<usize>() {
        if position >= 1 && position <= options.len() {
            return Some(options[position - 1].0.clone());
        }
    }

    options
        .iter()
        .find(|(value, _)| value == typed)
        .or_else(|| {
            options
                .iter()
                .find(|(_, label)| label.eq_ignore_ascii_case(typed))
        })
        .map(|(value, _)| value.clone())
}

fn label_for<'a>(options: &'a Options, value: &'a str) -> &'a str {
    options
        .iter()
        .find(|(v, _)| v == value)
        .map(|(_, label)| label.as_str())
        .unwrap_or(value)
}

fn invalid_value(typed: &str) -> String {
    format!("Value \"{}\" is invalid.", typed)
}

fn ensure_options(options: &Options, label: &str) -> io::Result<()> {
    if options.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("prompt \"{}\" has no options", label),
        ));
    }
    Ok(())
}

pub fn text(prompt: &TextPrompt, io: &mut dyn LineIo) -> io::Result<ValidationOutcome<String>> {
    io.write_line(&question(&prompt.label, prompt.default.as_deref()))?;
    write_hint(io, &prompt.hint)?;

    let answer = read_trimmed(io.read_line()?);
    if answer.is_empty() {
        if let Some(default) = &prompt.default {
            return Ok(ValidationOutcome::Accepted(default.clone()));
        }
    }
    Ok(ValidationOutcome::Accepted(answer))
}

pub fn password(
    prompt: &PasswordPrompt,
    io: &mut dyn LineIo,
) -> io::Result<ValidationOutcome<String>> {
    io.write_line(&question(&prompt.label, None))?;
    write_hint(io, &prompt.hint)?;

    Ok(ValidationOutcome::Accepted(io.read_secret()?.unwrap_or_default()))
}

/// Interpret a confirm answer; `None` means the line was not a yes/no answer
pub fn parse_confirm(answer: &str, default: bool) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "" => Some(default),
        "y" | "yes" | "true" | "1" | "on" => Some(true),
        "n" | "no" | "false" | "0" | "off" => Some(false),
        _ => None,
    }
}

pub fn confirm(prompt: &ConfirmPrompt, io: &mut dyn LineIo) -> io::Result<ValidationOutcome<bool>> {
    let indicator = if prompt.default { "yes" } else { "no" };

    loop {
        io.write_line(&format!(
            " {} (yes/no) [{}]:",
            prompt.label.green(),
            indicator.yellow()
        ))?;
        write_hint(io, &prompt.hint)?;

        let answer = read_trimmed(io.read_line()?);
        match parse_confirm(&answer, prompt.default) {
            Some(value) => return Ok(ValidationOutcome::Accepted(value)),
            None => io.write_error("Please answer yes or no.")?,
        }
    }
}

pub fn select(prompt: &SelectPrompt, io: &mut dyn LineIo) -> io::Result<ValidationOutcome<String>> {
    ensure_options(&prompt.options, &prompt.label)?;

    let default_label = prompt
        .default
        .as_deref()
        .map(|value| label_for(&prompt.options, value));
    io.write_line(&question(&prompt.label, default_label))?;
    write_hint(io, &prompt.hint)?;
    write_options(io, &prompt.options, false)?;

    let answer = read_trimmed(io.read_line()?);
    if answer.is_empty() {
        return Ok(match &prompt.default {
            Some(default) => ValidationOutcome::Accepted(default.clone()),
            None => ValidationOutcome::Rejected("Please select one of the options.".to_string()),
        });
    }

    Ok(match resolve_choice(&prompt.options, &answer) {
        Some(value) => ValidationOutcome::Accepted(value),
        None => ValidationOutcome::Rejected(invalid_value(&answer)),
    })
}

fn is_none_choice(options: &Options, typed: &str) -> bool {
    typed == "0"
        || (typed.eq_ignore_ascii_case(NONE_OPTION) && resolve_choice(options, typed).is_none())
}

pub fn multi_select(
    prompt: &MultiSelectPrompt,
    io: &mut dyn LineIo,
) -> io::Result<ValidationOutcome<Vec<String>>> {
    ensure_options(&prompt.options, &prompt.label)?;

    // Without a default there must be a way to deliberately choose nothing
    let offer_none = prompt.default.is_empty();

    let default_display = if offer_none {
        NONE_OPTION.to_string()
    } else {
        prompt
            .default
            .iter()
            .map(|value| label_for(&prompt.options, value))
            .collect::<Vec<_>>()
            .join(", ")
    };
    io.write_line(&question(&prompt.label, Some(&default_display)))?;
    write_hint(io, &prompt.hint)?;
    write_options(io, &prompt.options, offer_none)?;

    let answer = read_trimmed(io.read_line()?);
    if answer.is_empty() {
        return Ok(ValidationOutcome::Accepted(prompt.default.clone()));
    }

    let mut selected: Vec<String> = Vec::new();
    let mut none_chosen = false;

    for typed in answer.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if offer_none && is_none_choice(&prompt.options, typed) {
            none_chosen = true;
            continue;
        }
        match resolve_choice(&prompt.options, typed) {
            Some(value) => {
                if !selected.contains(&value) {
                    selected.push(value);
                }
            }
            None => return Ok(ValidationOutcome::Rejected(invalid_value(typed))),
        }
    }

    if none_chosen && !selected.is_empty() {
        return Ok(ValidationOutcome::Rejected(format!(
            "\"{}\" cannot be combined with other options.",
            NONE_OPTION
        )));
    }

    Ok(ValidationOutcome::Accepted(selected))
}

pub fn suggest(prompt: &SuggestPrompt, io: &mut dyn LineIo) -> io::Result<ValidationOutcome<String>> {
    io.write_line(&question(&prompt.label, prompt.default.as_deref()))?;
    write_hint(io, &prompt.hint)?;

    let candidates = prompt.suggestions.candidates("");
    let answer = read_trimmed(io.read_line_with_completions(&candidates)?);
    if answer.is_empty() {
        if let Some(default) = &prompt.default {
            return Ok(ValidationOutcome::Accepted(default.clone()));
        }
    }
    Ok(ValidationOutcome::Accepted(answer))
}
