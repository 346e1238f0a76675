//! The `new` command: fetch the skeleton and configure the application

mod args;
pub mod questions;

pub use args::NewArgs;
pub use questions::installation_directory;

use crate::config::{default_branch, find_composer, php_binary, shell_quote};
use crate::error::InstallerError;
use crate::product::ProductConfig;
use crate::prompts::{LineIo, Prompter};
use crate::runtime::{CommandRunner, PhpRuntime};
use crate::scaffold::bot::bot_config_path;
use crate::scaffold::vcs::{create_repository, github_repository_name, push_to_github};
use crate::scaffold::{
    add_dev_script, configure_default_connection, version_constraint, write_credentials, Database,
    SkeletonInstall,
};
use anyhow::Result;
use colored::Colorize;
use std::fs;
use std::path::Path;

/// Fail when `directory` already holds something, unless it is the current directory
pub fn verify_application_doesnt_exist(directory: &Path, cwd: &Path) -> crate::error::Result<()> {
    let is_cwd = directory == Path::new(".") || directory == cwd;
    if !is_cwd && directory.exists() {
        return Err(InstallerError::precondition("Application already exists!"));
    }
    Ok(())
}

fn command_failed(command: String, status: std::process::ExitStatus) -> InstallerError {
    InstallerError::CommandFailed {
        command,
        code: status.code().unwrap_or(1),
    }
}

/// Settle the project name and the accelerator choice.
///
/// Every check on the target directory runs before the accelerator question.
fn resolve_project<C: ProductConfig, I: LineIo>(
    config: &C,
    prompter: &mut Prompter<I>,
    php: &PhpRuntime,
    cwd: &Path,
    args: &mut NewArgs,
) -> Result<String> {
    if args.interactive && args.name.is_none() {
        args.name = Some(questions::ask_project_name(prompter, cwd, args.force)?);
    }

    let name = args
        .name
        .clone()
        .map(|n| n.trim_end_matches(['/', '\\']).to_string())
        .filter(|n| !n.is_empty())
        .ok_or_else(|| InstallerError::precondition("Not enough arguments (missing: \"name\")."))?;

    if !args.force {
        verify_application_doesnt_exist(&installation_directory(cwd, &name), cwd)?;
    }
    if args.force && name == "." {
        return Err(InstallerError::precondition(
            "Cannot use --force option when using current directory for installation!",
        )
        .into());
    }

    if args.interactive && !args.accelerator {
        args.accelerator = questions::ask_accelerator(prompter, config, php)?;
    }

    Ok(name)
}

/// Main entry point for the new command
pub async fn run<C: ProductConfig>(config: &C, mut args: NewArgs) -> Result<()> {
    println!("{}", config.banner());
    cliclack::intro(config.display_name())?;

    let mut prompter = Prompter::detect(args.fallback_prompts);
    let cwd = std::env::current_dir()?;

    let php_binary = php_binary();
    let php = PhpRuntime::detect(&php_binary)?;
    php.ensure_extensions(config.required_extensions())?;

    let name = resolve_project(config, &mut prompter, &php, &cwd, &mut args)?;
    let directory = installation_directory(&cwd, &name);

    let database = args
        .database
        .as_deref()
        .map(str::parse::<Database>)
        .transpose()?;

    let runner = CommandRunner::new(args.decorated, args.quiet);
    let php_command = shell_quote(&php_binary);

    let install = SkeletonInstall {
        composer: find_composer(&cwd, &php_binary),
        php: php_command.clone(),
        package: config.skeleton_package().to_string(),
        directory: directory.display().to_string(),
        version: version_constraint(args.dev).to_string(),
        console_script: config.console_script().to_string(),
        accelerator_package: args
            .accelerator
            .then(|| config.accelerator_package().to_string()),
        force: args.force,
        windows: cfg!(windows),
    };

    tracing::info!(name = %name, directory = %directory.display(), "creating application");
    let status = runner.run(&install.commands(), None, &[]).await?;
    if !status.success() {
        return Err(command_failed(install.create_project_command(), status).into());
    }

    if name != "." {
        let (database, migrate) =
            questions::ask_database(&mut prompter, &php, database, args.interactive)?;
        configure_default_connection(&directory, database, &name, config.database_marker())?;

        if migrate {
            migrate_database(config, &runner, &directory, &php_command, database, args.interactive)
                .await?;
        }
    }

    configure_bot(config, &mut prompter, &runner, &directory, &php_command, args.interactive)
        .await?;

    if args.wants_repository() {
        let branch = args.branch.clone().unwrap_or_else(default_branch);
        create_repository(&runner, &directory, &branch, &config.initial_commit_message()).await?;
    }

    if let Some(flags) = &args.github {
        let repository = github_repository_name(&name, args.organization.as_deref());
        push_to_github(&runner, &directory, &repository, flags.as_deref()).await?;
    }

    if cfg!(windows) {
        add_dev_script(&directory, config.console_script())?;
    }

    print_ready(config, &name)
}

async fn migrate_database<C: ProductConfig>(
    config: &C,
    runner: &CommandRunner,
    directory: &Path,
    php: &str,
    database: Database,
    interactive: bool,
) -> Result<()> {
    if database == Database::Sqlite {
        let file = directory.join("database").join("database.sqlite");
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        if !file.exists() {
            fs::write(&file, "")?;
        }
    }

    let mut command = format!("{} {} migrate", php, config.console_script());
    if !interactive {
        command.push_str(" --no-interaction");
    }

    let status = runner.run(&[command.clone()], Some(directory), &[]).await?;
    if !status.success() {
        return Err(command_failed(command, status).into());
    }
    Ok(())
}

async fn configure_bot<C: ProductConfig, I: LineIo>(
    config: &C,
    prompter: &mut Prompter<I>,
    runner: &CommandRunner,
    directory: &Path,
    php: &str,
    interactive: bool,
) -> Result<()> {
    let credentials = questions::ask_bot_credentials(prompter, interactive)?;

    if bot_config_path(directory).is_file() {
        write_credentials(directory, &credentials)?;
    } else {
        cliclack::log::warning(format!(
            "{} not found, bot credentials were not saved",
            bot_config_path(directory).display()
        ))?;
        return Ok(());
    }

    if credentials.is_complete() && questions::ask_webhook(prompter)? {
        let command = format!("{} {} webhook:set", php, config.console_script());
        let status = runner.run(&[command.clone()], Some(directory), &[]).await?;
        if !status.success() {
            return Err(command_failed(command, status).into());
        }
        cliclack::log::success("Webhook registered")?;
    }

    Ok(())
}

fn print_ready<C: ProductConfig>(config: &C, name: &str) -> Result<()> {
    println!();
    println!(
        "  {} Application ready in {}. You can start your local development using:",
        " INFO ".white().on_blue(),
        format!("[{}]", name).bold()
    );
    println!();

    for step in config.next_steps(name) {
        println!("  {} {}", "➜".dimmed(), step);
    }

    println!();
    println!(
        "  New to {}? Check out our documentation: {}",
        config.display_name(),
        config.docs_url().underline()
    );

    cliclack::outro("Build something amazing!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::{RenderMode, ScriptedIo};

    #[derive(Clone)]
    struct Product;
    impl ProductConfig for Product {
        fn name(&self) -> &'static str {
            "test"
        }
        fn display_name(&self) -> &'static str {
            "Test"
        }
        fn cli_description(&self) -> &'static str {
            ""
        }
        fn skeleton_package(&self) -> &'static str {
            "vendor/skeleton"
        }
        fn console_script(&self) -> &'static str {
            "console"
        }
        fn required_extensions(&self) -> &'static [&'static str] {
            &[]
        }
        fn accelerator_package(&self) -> &'static str {
            ""
        }
        fn accelerator_name(&self) -> &'static str {
            "Fast"
        }
        fn accelerator_extensions(&self) -> &'static [&'static str] {
            &["swoole"]
        }
        fn database_marker(&self) -> &'static str {
            "skeleton"
        }
        fn docs_url(&self) -> &'static str {
            ""
        }
        fn next_steps(&self, _name: &str) -> Vec<String> {
            Vec::new()
        }
    }

    fn cli_args(name: &str) -> NewArgs {
        NewArgs {
            name: Some(name.to_string()),
            interactive: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_existing_directory_is_rejected() {
        let cwd = tempfile::tempdir().unwrap();
        let target = cwd.path().join("my-bot");

        assert!(verify_application_doesnt_exist(&target, cwd.path()).is_ok());

        fs::create_dir(&target).unwrap();
        let err = verify_application_doesnt_exist(&target, cwd.path()).unwrap_err();
        assert_eq!(err.to_string(), "Application already exists!");
    }

    #[test]
    fn test_current_directory_is_never_rejected() {
        let cwd = tempfile::tempdir().unwrap();
        let dot = installation_directory(cwd.path(), ".");

        assert_eq!(dot, Path::new("."));
        assert!(verify_application_doesnt_exist(&dot, cwd.path()).is_ok());
        assert!(verify_application_doesnt_exist(cwd.path(), cwd.path()).is_ok());
    }

    #[test]
    fn test_existing_file_is_rejected() {
        let cwd = tempfile::tempdir().unwrap();
        let target = cwd.path().join("notes.txt");
        fs::write(&target, "x").unwrap();

        assert!(verify_application_doesnt_exist(&target, cwd.path()).is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failed_webhook_keeps_exit_code() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(
            bot_config_path(dir.path()),
            "<?php return ['token' => '', 'url' => '',];",
        )
        .unwrap();

        // Stand-in for `php`: exits with 4 whatever it is asked to run
        let php = dir.path().join("fake-php");
        fs::write(&php, "#!/bin/sh\nexit 4\n").unwrap();
        fs::set_permissions(&php, fs::Permissions::from_mode(0o755)).unwrap();

        let mut prompter = Prompter::with_mode(
            RenderMode::Fallback,
            ScriptedIo::new(&["123:abc", "https://bot.example.com", "yes"]),
        );
        let runner = CommandRunner::new(false, false);

        let err = configure_bot(
            &Product,
            &mut prompter,
            &runner,
            dir.path(),
            &php.display().to_string(),
            true,
        )
        .await
        .unwrap_err();

        let installer = err.downcast_ref::<InstallerError>().unwrap();
        assert_eq!(installer.exit_code(), 4);

        let config = fs::read_to_string(bot_config_path(dir.path())).unwrap();
        assert!(config.contains("'token' => '123:abc',"));
    }

    #[test]
    fn test_existing_directory_fails_before_accelerator_question() {
        let cwd = tempfile::tempdir().unwrap();
        fs::create_dir(cwd.path().join("my-bot")).unwrap();
        let php = PhpRuntime::from_module_list("php", "swoole\n");
        let mut prompter = Prompter::with_mode(RenderMode::Fallback, ScriptedIo::new(&["yes"]));
        let mut args = cli_args("my-bot");

        let err = resolve_project(&Product, &mut prompter, &php, cwd.path(), &mut args).unwrap_err();

        assert_eq!(err.to_string(), "Application already exists!");
        assert_eq!(prompter.io().reads, 0);
        assert!(!args.accelerator);
    }

    #[test]
    fn test_resolve_project_asks_accelerator_after_checks() {
        let cwd = tempfile::tempdir().unwrap();
        let php = PhpRuntime::from_module_list("php", "swoole\n");
        let mut prompter = Prompter::with_mode(RenderMode::Fallback, ScriptedIo::new(&["yes"]));
        let mut args = cli_args("my-bot/");

        let name = resolve_project(&Product, &mut prompter, &php, cwd.path(), &mut args).unwrap();

        assert_eq!(name, "my-bot");
        assert!(args.accelerator);
        assert_eq!(prompter.io().reads, 1);
    }

    #[test]
    fn test_force_with_current_directory_is_rejected() {
        let cwd = tempfile::tempdir().unwrap();
        let php = PhpRuntime::from_module_list("php", "");
        let mut prompter = Prompter::with_mode(RenderMode::Fallback, ScriptedIo::new(&[]));
        let mut args = NewArgs {
            force: true,
            ..cli_args(".")
        };

        let err = resolve_project(&Product, &mut prompter, &php, cwd.path(), &mut args).unwrap_err();
        assert!(err.to_string().starts_with("Cannot use --force option"));
        assert_eq!(prompter.io().reads, 0);
    }
}
