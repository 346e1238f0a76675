//! Composer commands that fetch and prepare the application skeleton

use crate::error::{InstallerError, Result};
use serde::Serialize;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// Version constraint passed to `create-project`
pub fn version_constraint(dev: bool) -> &'static str {
    if dev {
        "dev-master"
    } else {
        ""
    }
}

/// Everything needed to build the fetch-and-setup command list
#[derive(Debug, Clone)]
pub struct SkeletonInstall {
    /// Composer command line (e.g. `composer` or `php composer.phar`)
    pub composer: String,
    /// PHP binary, already quoted for the shell
    pub php: String,
    pub package: String,
    /// Installation directory as shown in commands (absolute path or `.`)
    pub directory: String,
    pub version: String,
    pub console_script: String,
    /// Extra package required after the fetch
    pub accelerator_package: Option<String>,
    /// Remove an existing directory first
    pub force: bool,
    pub windows: bool,
}

impl SkeletonInstall {
    pub fn create_project_command(&self) -> String {
        let mut command = format!(
            "{} create-project {} \"{}\"",
            self.composer, self.package, self.directory
        );
        if !self.version.is_empty() {
            command.push(' ');
            command.push_str(&self.version);
        }
        command.push_str(" --remove-vcs --prefer-dist --no-scripts");
        command
    }

    /// The full command list, run in order and joined with `&&`
    pub fn commands(&self) -> Vec<String> {
        let script = format!("{}/{}", self.directory, self.console_script);
        let mut commands = Vec::new();

        if self.force && self.directory != "." {
            commands.push(if self.windows {
                format!(
                    "(if exist \"{0}\" rd /s /q \"{0}\")",
                    self.directory
                )
            } else {
                format!("rm -rf \"{}\"", self.directory)
            });
        }

        commands.push(self.create_project_command());
        commands.push(format!(
            "{} run post-root-package-install -d \"{}\"",
            self.composer, self.directory
        ));
        commands.push(format!("{} \"{}\" key:generate --ansi", self.php, script));

        if let Some(package) = &self.accelerator_package {
            commands.push(format!("cd \"{}\"", self.directory));
            commands.push(format!("{} require {}", self.composer, package));
        }

        if !self.windows {
            commands.push(format!("chmod 755 \"{}\"", script));
        }

        commands
    }
}

/// Add a `dev` script that serves the application without Composer's process timeout
pub fn add_dev_script(dir: &Path, console_script: &str) -> Result<()> {
    let path = dir.join("composer.json");
    let display = path.display().to_string();

    let content = fs::read_to_string(&path)?;
    let mut composer: Value = serde_json::from_str(&content).map_err(|source| {
        InstallerError::Json {
            path: display.clone(),
            source,
        }
    })?;

    let root = composer.as_object_mut().ok_or_else(|| {
        InstallerError::precondition(format!("{} is not a JSON object", display))
    })?;
    let scripts = root
        .entry("scripts")
        .or_insert_with(|| Value::Object(Default::default()));
    if let Value::Object(scripts) = scripts {
        scripts.insert(
            "dev".to_string(),
            json!([
                "Composer\\Config::disableProcessTimeout",
                format!("php {} serve", console_script),
            ]),
        );
    }

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    composer
        .serialize(&mut serializer)
        .map_err(|source| InstallerError::Json {
            path: display,
            source,
        })?;
    out.push(b'\n');

    fs::write(&path, out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn install() -> SkeletonInstall {
        SkeletonInstall {
            composer: "composer".to_string(),
            php: "php".to_string(),
            package: "vendor/skeleton".to_string(),
            directory: "/work/my-bot".to_string(),
            version: version_constraint(false).to_string(),
            console_script: "console".to_string(),
            accelerator_package: None,
            force: false,
            windows: false,
        }
    }

    #[test]
    fn test_default_commands() {
        assert_eq!(
            install().commands(),
            vec![
                "composer create-project vendor/skeleton \"/work/my-bot\" --remove-vcs --prefer-dist --no-scripts",
                "composer run post-root-package-install -d \"/work/my-bot\"",
                "php \"/work/my-bot/console\" key:generate --ansi",
                "chmod 755 \"/work/my-bot/console\"",
            ]
        );
    }

    #[test]
    fn test_dev_version_and_accelerator() {
        let mut install = install();
        install.version = version_constraint(true).to_string();
        install.accelerator_package = Some("vendor/surge".to_string());

        let commands = install.commands();
        assert!(commands[0].contains("\"/work/my-bot\" dev-master --remove-vcs"));
        assert!(commands.contains(&"cd \"/work/my-bot\"".to_string()));
        assert!(commands.contains(&"composer require vendor/surge".to_string()));
    }

    #[test]
    fn test_force_removes_directory_first() {
        let mut install = install();
        install.force = true;
        assert_eq!(install.commands()[0], "rm -rf \"/work/my-bot\"");

        install.windows = true;
        let commands = install.commands();
        assert_eq!(
            commands[0],
            "(if exist \"/work/my-bot\" rd /s /q \"/work/my-bot\")"
        );
        assert!(!commands.iter().any(|c| c.starts_with("chmod")));
    }

    #[test]
    fn test_force_never_removes_current_directory() {
        let mut install = install();
        install.force = true;
        install.directory = ".".to_string();
        assert!(install.commands()[0].contains("create-project"));
    }

    #[test]
    fn test_add_dev_script_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("composer.json"),
            r#"{"name": "vendor/app", "require": {"php": "^8.2"}, "scripts": {"test": "phpunit"}}"#,
        )
        .unwrap();

        add_dev_script(dir.path(), "console").unwrap();

        let written = fs::read_to_string(dir.path().join("composer.json")).unwrap();
        let value: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["scripts"]["test"], "phpunit");
        assert_eq!(value["scripts"]["dev"][1], "php console serve");
        assert!(written.find("\"name\"").unwrap() < written.find("\"require\"").unwrap());
        assert!(written.contains("\n    \"name\""));
    }

    #[test]
    fn test_add_dev_script_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("composer.json"), "{ nope").unwrap();
        assert!(matches!(
            add_dev_script(dir.path(), "console"),
            Err(InstallerError::Json { .. })
        ));
    }
}
