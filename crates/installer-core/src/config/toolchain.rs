//! Locating the PHP, Composer, and git setup of the host

use std::path::Path;
use std::process::Command;

/// Overrides the PHP binary used for every command
pub const PHP_BINARY_ENV: &str = "PHP_BINARY";

/// Overrides the Composer command when no local `composer.phar` exists
pub const COMPOSER_BINARY_ENV: &str = "COMPOSER_BINARY";

const FALLBACK_BRANCH: &str = "main";

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The PHP binary to execute, unquoted
pub fn php_binary() -> String {
    env_non_empty(PHP_BINARY_ENV).unwrap_or_else(|| "php".to_string())
}

/// Quote a path for a shell command line when it contains spaces or quotes
pub fn shell_quote(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '"' || c == '\'') {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

/// The Composer command line.
///
/// A `composer.phar` in `working_dir` wins, then `COMPOSER_BINARY`, then
/// `composer` from the PATH.
pub fn find_composer(working_dir: &Path, php: &str) -> String {
    if working_dir.join("composer.phar").exists() {
        return format!("{} composer.phar", shell_quote(php));
    }
    env_non_empty(COMPOSER_BINARY_ENV).unwrap_or_else(|| "composer".to_string())
}

/// The user's configured default branch (`init.defaultBranch`), or `main`
pub fn default_branch() -> String {
    Command::new("git")
        .args(["config", "--global", "init.defaultBranch"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .filter(|branch| !branch.is_empty())
        .unwrap_or_else(|| FALLBACK_BRANCH.to_string())
}
