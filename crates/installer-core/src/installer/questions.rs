//! Questions asked while creating an application

use crate::product::ProductConfig;
use crate::prompts::{ConfirmPrompt, LineIo, PasswordPrompt, Prompter, SelectPrompt, TextPrompt};
use crate::runtime::PhpRuntime;
use crate::scaffold::{database_options, BotCredentials, Database};
use anyhow::Result;
use regex::Regex;
use std::path::{Path, PathBuf};

pub const NAME_REQUIRED: &str = "The project name is required.";
pub const NAME_INVALID: &str =
    "The name may only contain letters, numbers, dashes, underscores, and periods.";
pub const NAME_TAKEN: &str = "Application already exists.";

const SKIP_HINT: &str = "Press Enter to skip...";

/// Characters a project name may not contain
fn invalid_name_pattern() -> Result<Regex> {
    Ok(Regex::new(r"[^\pL\pN\-_.]")?)
}

/// Where the application is installed: `.` stays relative, anything else is
/// resolved against `cwd`
pub fn installation_directory(cwd: &Path, name: &str) -> PathBuf {
    if name == "." {
        PathBuf::from(".")
    } else {
        cwd.join(name)
    }
}

/// Message for a project name typed at the prompt, `None` when acceptable
pub fn validate_project_name(
    invalid: &Regex,
    cwd: &Path,
    force: bool,
    value: &str,
) -> Option<String> {
    if invalid.is_match(value) {
        return Some(NAME_INVALID.to_string());
    }
    if !force && value != "." && installation_directory(cwd, value).exists() {
        return Some(NAME_TAKEN.to_string());
    }
    None
}

pub fn ask_project_name<I: LineIo>(
    prompter: &mut Prompter<I>,
    cwd: &Path,
    force: bool,
) -> Result<String> {
    let invalid = invalid_name_pattern()?;
    let cwd = cwd.to_path_buf();

    let prompt = TextPrompt::new("What is the name of your project?")
        .placeholder("E.g. example-app")
        .required(NAME_REQUIRED)
        .validate(move |value: &String| validate_project_name(&invalid, &cwd, force, value));

    Ok(prompter.ask(&prompt)?)
}

/// Offer the accelerator runtime; accepting it needs one of its extensions
pub fn ask_accelerator<C: ProductConfig, I: LineIo>(
    prompter: &mut Prompter<I>,
    config: &C,
    php: &PhpRuntime,
) -> Result<bool> {
    let extensions = config.accelerator_extensions().join("/");
    let available = php.has_any_extension(config.accelerator_extensions());
    let missing = format!("Extension {} not exist.", extensions);

    let prompt = ConfirmPrompt::new(format!("Do you want to use {}?", config.accelerator_name()))
        .default(false)
        .hint(format!(
            "{} requires the {} extension.",
            config.accelerator_name(),
            config.accelerator_extensions().join(" or ")
        ))
        .validate(move |accepted: &bool| {
            if *accepted && !available {
                Some(missing.clone())
            } else {
                None
            }
        });

    Ok(prompter.ask(&prompt)?)
}

/// Pick the database driver and whether to migrate.
///
/// Without interaction the given driver (or the first available one) is used
/// and migrations always run. SQLite always migrates.
pub fn ask_database<I: LineIo>(
    prompter: &mut Prompter<I>,
    php: &PhpRuntime,
    given: Option<Database>,
    interactive: bool,
) -> Result<(Database, bool)> {
    let options = database_options(php);
    let default = options.first().map(|(db, _)| *db).unwrap_or(Database::Sqlite);

    if given.is_some() || !interactive {
        return Ok((given.unwrap_or(default), true));
    }

    let selected = prompter.ask(
        &SelectPrompt::new("Which database will your application use?")
            .options(options.iter().map(|(db, label)| (db.driver(), label.clone())))
            .default(default.driver()),
    )?;
    let database: Database = selected.parse()?;

    if database == Database::Sqlite {
        return Ok((database, true));
    }

    let migrate = prompter.ask(
        &ConfirmPrompt::new(
            "Default database updated. Would you like to run the default database migrations?",
        )
        .default(true),
    )?;

    Ok((database, migrate))
}

/// Bot token and webhook URL, both optional
pub fn ask_bot_credentials<I: LineIo>(
    prompter: &mut Prompter<I>,
    interactive: bool,
) -> Result<BotCredentials> {
    if !interactive {
        return Ok(BotCredentials::default());
    }

    let token = prompter.ask(&PasswordPrompt::new("Enter your Bot Token:").hint(SKIP_HINT))?;
    let url = prompter.ask(
        &TextPrompt::new("Enter your Bot URL:")
            .placeholder("https://example.com/bot")
            .hint(SKIP_HINT),
    )?;

    Ok(BotCredentials {
        token: token.trim().to_string(),
        url: url.trim().to_string(),
    })
}

pub fn ask_webhook<I: LineIo>(prompter: &mut Prompter<I>) -> Result<bool> {
    Ok(prompter.ask(&ConfirmPrompt::new("Do you want to set webhook?").default(true))?)
}
