//! Rich vs. fallback rendering decision

use std::fmt;

/// Host operating systems without rich prompt support
const UNSUPPORTED_RICH_OS: &[&str] = &["windows"];

/// How prompts are rendered for the whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Interactive terminal widgets
    Rich,
    /// Line-based question and answer
    Fallback,
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Rich => write!(f, "rich"),
            RenderMode::Fallback => write!(f, "fallback"),
        }
    }
}

/// Decide the render mode from the environment.
///
/// Pure: the caller is expected to compute this once per run and keep the
/// result (see [`super::Prompter`]).
pub fn decide_render_mode(input_interactive: bool, host_os: &str, force_fallback: bool) -> RenderMode {
    if force_fallback
        || !input_interactive
        || UNSUPPORTED_RICH_OS
            .iter()
            .any(|os| os.eq_ignore_ascii_case(host_os))
    {
        RenderMode::Fallback
    } else {
        RenderMode::Rich
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interactive_linux_is_rich() {
        assert_eq!(decide_render_mode(true, "linux", false), RenderMode::Rich);
        assert_eq!(decide_render_mode(true, "macos", false), RenderMode::Rich);
    }

    #[test]
    fn test_force_fallback_wins() {
        assert_eq!(decide_render_mode(true, "linux", true), RenderMode::Fallback);
    }

    #[test]
    fn test_non_interactive_input_falls_back() {
        assert_eq!(decide_render_mode(false, "linux", false), RenderMode::Fallback);
    }

    #[test]
    fn test_windows_falls_back() {
        assert_eq!(decide_render_mode(true, "windows", false), RenderMode::Fallback);
        assert_eq!(decide_render_mode(true, "Windows", false), RenderMode::Fallback);
    }
}
