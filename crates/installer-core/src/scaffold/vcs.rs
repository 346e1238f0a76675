//! Git repository creation and GitHub publishing
//!
//! Both steps are best effort: a failure is reported as a warning and the
//! installer carries on.

use crate::runtime::CommandRunner;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Flags passed to `gh repo create` when `--github` has no value
pub const DEFAULT_GITHUB_FLAGS: &str = "--private";

/// Commands that create the repository and its first commit
pub fn repository_commands(branch: &str, commit_message: &str) -> Vec<String> {
    vec![
        "git init -q".to_string(),
        "git add .".to_string(),
        format!("git commit -q -m \"{}\"", commit_message.replace('"', "\\\"")),
        format!("git branch -M {}", branch),
    ]
}

/// `owner/name` for the new GitHub repository
pub fn github_repository_name(name: &str, organization: Option<&str>) -> String {
    match organization.filter(|org| !org.is_empty()) {
        Some(org) => format!("{}/{}", org, name),
        None => name.to_string(),
    }
}

pub fn github_create_command(repository: &str, flags: Option<&str>) -> String {
    let flags = flags
        .filter(|f| !f.trim().is_empty())
        .unwrap_or(DEFAULT_GITHUB_FLAGS);
    format!("gh repo create {} --source=. --push {}", repository, flags)
}

/// Initialize a repository in `dir` and commit everything.
///
/// Returns whether the repository was created.
pub async fn create_repository(
    runner: &CommandRunner,
    dir: &Path,
    branch: &str,
    commit_message: &str,
) -> Result<bool> {
    let commands = repository_commands(branch, commit_message);

    match runner.run(&commands, Some(dir), &[]).await {
        Ok(status) if status.success() => {
            tracing::info!(branch, "git repository created");
            Ok(true)
        }
        Ok(status) => {
            cliclack::log::warning(format!(
                "Git repository was not created (exit code {})",
                status.code().unwrap_or(-1)
            ))?;
            Ok(false)
        }
        Err(e) => {
            cliclack::log::warning(format!("Git repository was not created: {}", e))?;
            Ok(false)
        }
    }
}

/// Create the GitHub repository and push, skipping when `gh` is not authenticated
pub async fn push_to_github(
    runner: &CommandRunner,
    dir: &Path,
    repository: &str,
    flags: Option<&str>,
) -> Result<bool> {
    if !runner.succeeds("gh", &["auth", "status"]).await {
        println!(
            "  {} Make sure the \"gh\" CLI tool is installed and that you're authenticated to GitHub. Skipping...",
            " WARN ".black().on_yellow()
        );
        println!();
        return Ok(false);
    }

    let commands = vec![github_create_command(repository, flags)];
    match runner
        .run(&commands, Some(dir), &[("GIT_TERMINAL_PROMPT", "0")])
        .await
    {
        Ok(status) if status.success() => Ok(true),
        Ok(status) => {
            cliclack::log::warning(format!(
                "GitHub repository was not created (exit code {})",
                status.code().unwrap_or(-1)
            ))?;
            Ok(false)
        }
        Err(e) => {
            cliclack::log::warning(format!("GitHub repository was not created: {}", e))?;
            Ok(false)
        }
    }
}
