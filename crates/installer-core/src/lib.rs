//! Installer Core - Shared library for PHP application installers
//!
//! This library creates new applications from a Composer skeleton package and
//! configures them (database, bot credentials, git). It is designed to be used
//! by installer binaries that share the same workflow but describe different
//! products through [`ProductConfig`].
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Runtime detection, shell commands, file patching
//! - **Layer 2: Prompts** - Rich cliclack prompts with a line-based fallback
//! - **Layer 3: Workflow** - The `new` command flow driven by [`NewArgs`]
//!
//! # Example Usage
//!
//! ```ignore
//! use installer_core::{run, NewArgs, ProductConfig};
//!
//! #[derive(Clone)]
//! struct MyConfig;
//! impl ProductConfig for MyConfig {
//!     fn name(&self) -> &'static str { "myapp" }
//!     // ... implement other methods
//! }
//!
//! run(&MyConfig, NewArgs { name: Some("blog".into()), ..Default::default() }).await?;
//! ```

pub mod config;
pub mod error;
pub mod installer;
pub mod product;
pub mod prompts;
pub mod runtime;
pub mod scaffold;

// Re-export main types for convenience
pub use error::InstallerError;
pub use installer::{run, NewArgs};
pub use product::ProductConfig;
pub use prompts::{Prompter, RenderMode};
pub use runtime::{CommandRunner, PhpRuntime};
