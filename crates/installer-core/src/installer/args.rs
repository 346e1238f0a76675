//! Options for the `new` command

/// CLI arguments for the new command
#[derive(Debug, Clone, Default)]
pub struct NewArgs {
    /// Project name; `.` installs into the current directory
    pub name: Option<String>,

    /// Install the latest development release
    pub dev: bool,

    /// Initialize a git repository
    pub git: bool,

    /// Branch for the new repository (defaults to git's `init.defaultBranch`)
    pub branch: Option<String>,

    /// Create a GitHub repository: `Some(None)` uses the default visibility flags
    pub github: Option<Option<String>>,

    /// GitHub organization owning the new repository
    pub organization: Option<String>,

    /// Database driver given on the command line
    pub database: Option<String>,

    /// Install the optional accelerator runtime
    pub accelerator: bool,

    /// Install even if the directory already exists
    pub force: bool,

    /// Ask questions; when false every question takes its default
    pub interactive: bool,

    /// Pass `--quiet` to external tools
    pub quiet: bool,

    /// The output terminal accepts ANSI styling
    pub decorated: bool,

    /// Use line-based prompts even on a capable terminal
    pub fallback_prompts: bool,
}

impl NewArgs {
    pub fn wants_repository(&self) -> bool {
        self.git || self.github.is_some()
    }
}
