//! PHP runtime and extension detection

use crate::error::{InstallerError, Result};
use std::process::Command;

/// What the local PHP binary reports about itself
#[derive(Debug, Clone)]
pub struct PhpRuntime {
    pub binary: String,
    pub version: Option<String>,
    extensions: Vec<String>,
}

impl PhpRuntime {
    /// Query `<binary> -m` for loaded extensions and `<binary> -r` for the version
    pub fn detect(binary: &str) -> Result<Self> {
        let output = Command::new(binary).arg("-m").output();

        let modules = match output {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).to_string(),
            _ => {
                return Err(InstallerError::precondition(format!(
                    "PHP is required but `{}` could not be executed. Install PHP or set PHP_BINARY.",
                    binary
                )))
            }
        };

        let mut runtime = Self::from_module_list(binary, &modules);
        runtime.version = Command::new(binary)
            .args(["-r", "echo PHP_VERSION;"])
            .output()
            .ok()
            .filter(|out| out.status.success())
            .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string());

        tracing::debug!(
            binary,
            version = runtime.version.as_deref().unwrap_or("unknown"),
            extensions = runtime.extensions.len(),
            "detected PHP runtime"
        );
        Ok(runtime)
    }

    /// Build from `php -m` output, skipping section headers such as `[PHP Modules]`
    pub fn from_module_list(binary: &str, modules: &str) -> Self {
        let extensions = modules
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('['))
            .map(str::to_lowercase)
            .collect();

        Self {
            binary: binary.to_string(),
            version: None,
            extensions,
        }
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|e| e.eq_ignore_ascii_case(name))
    }

    /// True when at least one of `names` is loaded
    pub fn has_any_extension(&self, names: &[&str]) -> bool {
        names.iter().any(|name| self.has_extension(name))
    }

    pub fn missing_extensions(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| !self.has_extension(name))
            .map(|name| name.to_string())
            .collect()
    }

    /// Fail with a precondition error naming every missing extension
    pub fn ensure_extensions(&self, required: &[&str]) -> Result<()> {
        let missing = self.missing_extensions(required);
        if missing.is_empty() {
            return Ok(());
        }

        Err(InstallerError::precondition(format!(
            "The following PHP extensions are required but are not installed: {}",
            join_with_and(&missing)
        )))
    }
}

/// `a`, `a and b`, `a, b, and c`
pub fn join_with_and(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULES: &str = "[PHP Modules]\nCore\nctype\nfilter\nhash\nmbstring\nopenssl\nPDO\npdo_sqlite\ntokenizer\n\n[Zend Modules]\nZend OPcache\n";

    #[test]
    fn test_parses_module_list() {
        let php = PhpRuntime::from_module_list("php", MODULES);
        assert!(php.has_extension("pdo_sqlite"));
        assert!(php.has_extension("pdo"));
        assert!(php.has_extension("zend opcache"));
        assert!(!php.has_extension("[php modules]"));
        assert!(!php.has_extension("pdo_pgsql"));
    }

    #[test]
    fn test_ensure_extensions_lists_missing() {
        let php = PhpRuntime::from_module_list("php", "ctype\nhash\n");
        let err = php
            .ensure_extensions(&["ctype", "filter", "mbstring", "openssl"])
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "The following PHP extensions are required but are not installed: filter, mbstring, and openssl"
        );
        assert!(php.ensure_extensions(&["ctype", "hash"]).is_ok());
    }

    #[test]
    fn test_any_extension() {
        let php = PhpRuntime::from_module_list("php", "openswoole\n");
        assert!(php.has_any_extension(&["swoole", "openswoole"]));
        assert!(!php.has_any_extension(&["swoole"]));
    }

    #[test]
    fn test_join_with_and() {
        let items = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(join_with_and(&items(&[])), "");
        assert_eq!(join_with_and(&items(&["a"])), "a");
        assert_eq!(join_with_and(&items(&["a", "b"])), "a and b");
        assert_eq!(join_with_and(&items(&["a", "b", "c"])), "a, b, and c");
    }
}
