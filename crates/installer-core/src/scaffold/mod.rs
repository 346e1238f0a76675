//! Post-fetch customization of the generated application
//!
//! This module provides:
//! - Literal and pattern replacement in generated files
//! - Database connection settings in `.env` files
//! - Bot credentials in `config/bot.php`
//! - Composer command construction and `composer.json` edits
//! - Git repository creation and GitHub publishing

pub mod bot;
pub mod composer;
pub mod database;
pub mod patcher;
pub mod vcs;

pub use bot::{write_credentials, BotCredentials};
pub use composer::{add_dev_script, version_constraint, SkeletonInstall};
pub use database::{configure_default_connection, database_options, Database};
pub use patcher::{regex_replace_in_file, replace_in_file, replace_many_in_file};
