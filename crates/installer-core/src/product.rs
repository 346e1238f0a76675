//! Product configuration trait for installer binaries
//!
//! Each product implements this trait to describe the skeleton it installs
//! and how the generated project is presented to the user.

/// Configuration trait for different installer products
///
/// Each product defines:
/// - Product identity (name, display name)
/// - The skeleton package fetched by Composer
/// - PHP extensions the skeleton needs
/// - Template markers rewritten after the fetch
/// - Post-install instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Composer package of the application skeleton (e.g. `vendor/skeleton`)
    fn skeleton_package(&self) -> &'static str;

    /// Console script shipped in the skeleton root, run as `php <script> ...`
    fn console_script(&self) -> &'static str;

    /// PHP extensions that must be loaded before installing
    fn required_extensions(&self) -> &'static [&'static str];

    /// Optional high-performance runtime package offered during setup
    fn accelerator_package(&self) -> &'static str;

    /// Human-readable name of the optional runtime
    fn accelerator_name(&self) -> &'static str;

    /// PHP extensions the optional runtime needs; any one of them is enough
    fn accelerator_extensions(&self) -> &'static [&'static str];

    /// Database name written in the skeleton's `.env` (`DB_DATABASE=<marker>`)
    fn database_marker(&self) -> &'static str;

    /// Message of the first commit when a git repository is created
    fn initial_commit_message(&self) -> String {
        format!("Set up a fresh {} app", self.display_name())
    }

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Banner printed when the installer starts
    fn banner(&self) -> String {
        self.display_name().to_string()
    }

    /// Commands shown to the user once the application is ready
    fn next_steps(&self, name: &str) -> Vec<String>;
}
