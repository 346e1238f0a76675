//! Bot credentials in the generated `config/bot.php`

use super::patcher::replace_many_in_file;
use crate::error::Result;
use std::path::{Path, PathBuf};

pub const BOT_CONFIG: &str = "config/bot.php";

/// Token and webhook URL entered during setup; either may be empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotCredentials {
    pub token: String,
    pub url: String,
}

impl BotCredentials {
    /// Both values were provided, so a webhook can be registered
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.url.is_empty()
    }
}

fn php_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

pub fn bot_config_path(dir: &Path) -> PathBuf {
    dir.join(BOT_CONFIG)
}

/// Fill the empty `'token' => '',` and `'url' => '',` entries
pub fn write_credentials(dir: &Path, credentials: &BotCredentials) -> Result<()> {
    let token = format!("'token' => '{}',", php_single_quoted(&credentials.token));
    let url = format!("'url' => '{}',", php_single_quoted(&credentials.url));

    replace_many_in_file(
        &[("'token' => '',", token.as_str()), ("'url' => '',", url.as_str())],
        &bot_config_path(dir),
    )
}
