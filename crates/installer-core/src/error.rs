//! Error types for the installer

use thiserror::Error;

/// Result type alias using the installer's error type
pub type Result<T> = std::result::Result<T, InstallerError>;

/// Failures that stop the installer.
///
/// Rejected prompt answers never show up here, they are re-prompted.
/// Best-effort steps (git, GitHub, TTY attach) log a warning instead.
#[derive(Error, Debug)]
pub enum InstallerError {
    /// Detected before anything is written to disk
    #[error("{0}")]
    PreconditionFailed(String),

    /// An external tool exited unsuccessfully
    #[error("Command `{command}` failed with exit code {code}")]
    CommandFailed { command: String, code: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid pattern: {0}")]
    Regex(#[from] regex::Error),
}

impl InstallerError {
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionFailed(message.into())
    }

    /// Process exit code to report for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => 1,
        }
    }
}
