//! Shell command execution for external tools (Composer, PHP, git, gh)
//!
//! Commands are joined with `&&` and run through the platform shell. When a
//! controlling terminal is available the child gets it directly; otherwise
//! output is streamed back indented by four spaces.

use crate::error::Result;
use colored::Colorize;
use std::fs::OpenOptions;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// Commands that do not understand Composer/console output flags
const PLAIN_COMMAND_PREFIXES: &[&str] = &["chmod", "git", "cd ", "rm ", "(if exist"];

const TTY_PATH: &str = "/dev/tty";

/// Runs external commands for the installer
#[derive(Debug, Clone)]
pub struct CommandRunner {
    decorated: bool,
    quiet: bool,
    env: Vec<(String, String)>,
}

impl CommandRunner {
    /// `decorated`: the user's terminal accepts ANSI output.
    /// `quiet`: ask tools to suppress their output.
    pub fn new(decorated: bool, quiet: bool) -> Self {
        Self {
            decorated,
            quiet,
            env: Vec::new(),
        }
    }

    /// Set an environment variable for every command this runner starts
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Append `--no-ansi` / `--quiet` to every command that accepts them
    pub fn prepare(&self, commands: &[String]) -> Vec<String> {
        commands
            .iter()
            .map(|command| {
                let mut command = command.clone();
                if PLAIN_COMMAND_PREFIXES.iter().any(|p| command.starts_with(p)) {
                    return command;
                }
                if !self.decorated {
                    command.push_str(" --no-ansi");
                }
                if self.quiet {
                    command.push_str(" --quiet");
                }
                command
            })
            .collect()
    }

    /// Run `commands` joined with `&&`, returning the shell's exit status
    pub async fn run(
        &self,
        commands: &[String],
        working_dir: Option<&Path>,
        env: &[(&str, &str)],
    ) -> Result<ExitStatus> {
        let line = self.prepare(commands).join(" && ");
        tracing::debug!(command = %line, cwd = ?working_dir, "running shell command");

        let mut cmd = shell(&line);
        if let Some(dir) = working_dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        for (key, value) in env {
            cmd.env(key, value);
        }

        if tty_available() {
            match attach_tty(&mut cmd) {
                Ok(()) => return Ok(cmd.status().await?),
                Err(e) => {
                    cliclack::log::warning(format!("Unable to use the terminal: {}", e))?;
                }
            }
        }

        stream(cmd).await
    }

    /// Run a single command quietly and report whether it succeeded
    pub async fn succeeds(&self, program: &str, args: &[&str]) -> bool {
        TokioCommand::new(program)
            .args(args)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}

fn shell(line: &str) -> TokioCommand {
    if cfg!(windows) {
        let mut cmd = TokioCommand::new("cmd");
        cmd.arg("/C").arg(line);
        cmd
    } else {
        let mut cmd = TokioCommand::new("sh");
        cmd.arg("-c").arg(line);
        cmd
    }
}

fn tty_available() -> bool {
    !cfg!(windows)
        && std::io::IsTerminal::is_terminal(&std::io::stdin())
        && Path::new(TTY_PATH).exists()
}

fn attach_tty(cmd: &mut TokioCommand) -> std::io::Result<()> {
    let tty = OpenOptions::new().read(true).write(true).open(TTY_PATH)?;
    cmd.stdin(tty.try_clone()?)
        .stdout(tty.try_clone()?)
        .stderr(tty);
    Ok(())
}

/// Run with piped output, echoing each line indented
async fn stream(mut cmd: TokioCommand) -> Result<ExitStatus> {
    let mut child = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdout_reader = child.stdout.take().map(|out| BufReader::new(out).lines());
    let mut stderr_reader = child.stderr.take().map(|err| BufReader::new(err).lines());

    while stdout_reader.is_some() || stderr_reader.is_some() {
        tokio::select! {
            line = next_line(&mut stdout_reader), if stdout_reader.is_some() => {
                match line {
                    Ok(Some(line)) => println!("    {}", line),
                    Ok(None) => stdout_reader = None,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_reader = None;
                    }
                }
            }
            line = next_line(&mut stderr_reader), if stderr_reader.is_some() => {
                match line {
                    Ok(Some(line)) => eprintln!("    {}", line.yellow()),
                    Ok(None) => stderr_reader = None,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_reader = None;
                    }
                }
            }
        }
    }

    Ok(child.wait().await?)
}

async fn next_line<R>(
    reader: &mut Option<tokio::io::Lines<BufReader<R>>>,
) -> std::io::Result<Option<String>>
where
    R: tokio::io::AsyncRead + Unpin,
{
    match reader {
        Some(lines) => lines.next_line().await,
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_undecorated_output_adds_no_ansi() {
        let runner = CommandRunner::new(false, false);
        let prepared = runner.prepare(&commands(&[
            "composer create-project vendor/app \"/tmp/app\"",
            "git init -q",
            "chmod 755 \"/tmp/app/console\"",
            "cd \"/tmp/app\"",
        ]));

        assert_eq!(
            prepared,
            commands(&[
                "composer create-project vendor/app \"/tmp/app\" --no-ansi",
                "git init -q",
                "chmod 755 \"/tmp/app/console\"",
                "cd \"/tmp/app\"",
            ])
        );
    }

    #[test]
    fn test_quiet_adds_quiet_flag() {
        let runner = CommandRunner::new(true, true);
        let prepared = runner.prepare(&commands(&["php console migrate", "git add ."]));
        assert_eq!(prepared, commands(&["php console migrate --quiet", "git add ."]));
    }

    #[test]
    fn test_decorated_leaves_commands_alone() {
        let runner = CommandRunner::new(true, false);
        let input = commands(&["composer require vendor/pkg"]);
        assert_eq!(runner.prepare(&input), input);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_is_reported() {
        let runner = CommandRunner::new(true, false);
        let dir = tempfile::tempdir().unwrap();

        let status = runner
            .run(&commands(&["true", "exit 3"]), Some(dir.path()), &[])
            .await
            .unwrap();
        assert_eq!(status.code(), Some(3));

        let status = runner
            .run(
                &commands(&["test \"$GREETING\" = hello"]),
                Some(dir.path()),
                &[("GREETING", "hello")],
            )
            .await
            .unwrap();
        assert!(status.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_runner_env_applies_to_every_command() {
        let runner = CommandRunner::new(true, false).with_env("LARAGRAM_TEST", "on");

        let status = runner
            .run(&commands(&["test \"$LARAGRAM_TEST\" = on"]), None, &[])
            .await
            .unwrap();
        assert!(status.success());

        // Per-call values win over the runner's
        let status = runner
            .run(&commands(&["test \"$LARAGRAM_TEST\" = off"]), None, &[("LARAGRAM_TEST", "off")])
            .await
            .unwrap();
        assert!(status.success());
    }
}
