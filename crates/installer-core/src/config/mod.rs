//! Host configuration: binaries, environment overrides, git defaults

pub mod toolchain;

pub use toolchain::{default_branch, find_composer, php_binary, shell_quote};
