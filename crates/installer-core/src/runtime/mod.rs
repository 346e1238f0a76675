//! Host runtime detection and external command execution
//!
//! This module provides:
//! - PHP runtime and extension detection
//! - Shell command execution with TTY passthrough or indented streaming

pub mod check;
pub mod process;

pub use check::{join_with_and, PhpRuntime};
pub use process::CommandRunner;
