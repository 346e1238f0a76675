//! LaraGram installer - Create new LaraGram applications

use clap::{Parser, Subcommand};
use colored::Colorize;
use installer_core::{InstallerError, NewArgs, ProductConfig};
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI version
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

const BANNER: &[&str] = &[
    r"  _                      ____                       ",
    r" | |    __ _ _ __ __ _  / ___|_ __ __ _ _ __ ___    ",
    r" | |   / _` | '__/ _` || |  _| '__/ _` | '_ ` _ \   ",
    r" | |__| (_| | | | (_| || |_| | | | (_| | | | | | |  ",
    r" |_____\__,_|_|  \__,_| \____|_|  \__,_|_| |_| |_|  ",
];

/// LaraGram product configuration
#[derive(Clone)]
pub struct LaraGramConfig;

impl ProductConfig for LaraGramConfig {
    fn name(&self) -> &'static str {
        "laragram"
    }

    fn display_name(&self) -> &'static str {
        "LaraGram"
    }

    fn cli_description(&self) -> &'static str {
        "Create a new LaraGram application"
    }

    fn skeleton_package(&self) -> &'static str {
        "laraxgram/laragram"
    }

    fn console_script(&self) -> &'static str {
        "laragram"
    }

    fn required_extensions(&self) -> &'static [&'static str] {
        &["ctype", "filter", "hash", "mbstring", "openssl", "tokenizer"]
    }

    fn accelerator_package(&self) -> &'static str {
        "laraxgram/surge"
    }

    fn accelerator_name(&self) -> &'static str {
        "LaraGram Surge"
    }

    fn accelerator_extensions(&self) -> &'static [&'static str] {
        &["swoole", "openswoole"]
    }

    fn database_marker(&self) -> &'static str {
        "laragram"
    }

    fn docs_url(&self) -> &'static str {
        "https://laraxgram.github.io/installation.html#next-steps"
    }

    fn banner(&self) -> String {
        let mut banner = String::from("\n");
        for line in BANNER {
            // "Lara" in red, "Gram" in blue
            let (lara, gram) = line.split_at(24);
            banner.push_str(&format!("{}{}\n", lara.red().bold(), gram.blue().bold()));
        }
        banner
    }

    fn next_steps(&self, name: &str) -> Vec<String> {
        let mut steps = Vec::new();

        if name != "." {
            steps.push(format!("cd {}", name));
        }
        steps.push(format!("php {} serve", self.console_script()));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "laragram")]
#[command(about = "CLI for creating new LaraGram applications")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new LaraGram application
    New(CliNewArgs),
}

#[derive(Parser, Debug, Default)]
pub struct CliNewArgs {
    /// Application name, or `.` for the current directory
    pub name: Option<String>,

    /// Install the latest "development" release
    #[arg(long)]
    pub dev: bool,

    /// Initialize a Git repository
    #[arg(long)]
    pub git: bool,

    /// The branch that should be created for a new repository
    #[arg(long)]
    pub branch: Option<String>,

    /// Create a new repository on GitHub (optionally with `gh repo create` flags)
    #[arg(long, num_args = 0..=1, default_missing_value = "", value_name = "FLAGS")]
    pub github: Option<String>,

    /// The GitHub organization to create the new repository for
    #[arg(long)]
    pub organization: Option<String>,

    /// The database driver your application will use
    #[arg(long)]
    pub database: Option<String>,

    /// Install LaraGram Surge
    #[arg(long)]
    pub surge: bool,

    /// Forces install even if the directory already exists
    #[arg(short, long)]
    pub force: bool,

    /// Do not ask any interactive question
    #[arg(short = 'n', long = "no-interaction")]
    pub no_interaction: bool,

    /// Do not output any message from external tools
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable ANSI output
    #[arg(long = "no-ansi")]
    pub no_ansi: bool,

    /// Use plain question/answer prompts instead of interactive widgets
    #[arg(
        long = "fallback-prompts",
        env = "LARAGRAM_FALLBACK_PROMPTS",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub fallback_prompts: bool,
}

impl From<CliNewArgs> for NewArgs {
    fn from(args: CliNewArgs) -> Self {
        let decorated = !args.no_ansi
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();

        NewArgs {
            name: args.name,
            dev: args.dev,
            git: args.git,
            branch: args.branch,
            github: args
                .github
                .map(|flags| Some(flags).filter(|f| !f.trim().is_empty())),
            organization: args.organization,
            database: args.database,
            accelerator: args.surge,
            force: args.force,
            interactive: !args.no_interaction,
            quiet: args.quiet,
            decorated,
            fallback_prompts: args.fallback_prompts,
        }
    }
}

/// Diagnostics go to stderr; `RUST_LOG` wins over `-v`
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "installer_core=info,laragram=info",
        2 => "installer_core=debug,laragram=debug",
        _ => "trace",
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<InstallerError>() {
        return err.exit_code();
    }
    match err.downcast_ref::<std::io::Error>() {
        Some(io) if io.kind() == std::io::ErrorKind::Interrupted => 130,
        _ => 1,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose);

    let new_args = match args.command {
        Some(Command::New(new_args)) => new_args,
        // No subcommand provided, default to new behavior (interactive mode)
        None => CliNewArgs::default(),
    };

    if new_args.no_ansi || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    tracing::debug!(version = CLI_VERSION, args = ?new_args, "starting installer");
    let result = installer_core::run(&LaraGramConfig, new_args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    if let Err(err) = result {
        let code = exit_code(&err);
        if code != 130 {
            eprintln!();
            eprintln!("  {} {}", " ERROR ".white().on_red(), err);
            eprintln!();
        }
        std::process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> NewArgs {
        let args = Args::try_parse_from(argv).unwrap();
        match args.command {
            Some(Command::New(new_args)) => new_args.into(),
            None => panic!("expected the new subcommand"),
        }
    }

    #[test]
    fn test_github_flag_without_value_uses_defaults() {
        let args = parse(&["laragram", "new", "bot", "--github"]);
        assert_eq!(args.github, Some(None));
        assert!(args.wants_repository());
    }

    #[test]
    fn test_github_flag_with_value() {
        let args = parse(&["laragram", "new", "bot", "--github=--public", "--organization", "acme"]);
        assert_eq!(args.github, Some(Some("--public".to_string())));
        assert_eq!(args.organization.as_deref(), Some("acme"));
    }

    #[test]
    fn test_short_flags() {
        let args = parse(&["laragram", "new", "bot", "-n", "-f", "-q", "--surge"]);
        assert!(!args.interactive);
        assert!(args.force);
        assert!(args.quiet);
        assert!(args.accelerator);
        assert!(!args.wants_repository());
    }

    #[test]
    fn test_next_steps_skip_cd_for_current_directory() {
        assert_eq!(
            LaraGramConfig.next_steps("bot"),
            vec!["cd bot".to_string(), "php laragram serve".to_string()]
        );
        assert_eq!(LaraGramConfig.next_steps("."), vec!["php laragram serve".to_string()]);
    }

    #[test]
    fn test_exit_codes() {
        let failed: anyhow::Error = InstallerError::CommandFailed {
            command: "composer".to_string(),
            code: 2,
        }
        .into();
        assert_eq!(exit_code(&failed), 2);

        let interrupted: anyhow::Error =
            std::io::Error::new(std::io::ErrorKind::Interrupted, "ctrl-c").into();
        assert_eq!(exit_code(&interrupted), 130);

        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
    }
}
