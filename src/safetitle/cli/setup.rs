use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        version_string(VERSION, GIT_HASH, GIT_COMMIT_DATE, IS_RELEASE == "true")
    })
}

/// Format for releases, and for builds without git: "v0.3.1"
/// Format for dev builds: "v0.3.1\ndev: abc1234 2024-01-15 14:30"
fn version_string(version: &str, hash: &str, date: &str, is_release: bool) -> String {
    if is_release || hash.is_empty() {
        format!("v{}", version)
    } else {
        format!("v{}\ndev: {} {}", version, hash, date)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "safetitle",
    bin_name = "safetitle",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Check that names are valid file names on Linux, macOS, and Windows", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify one or more names (reads lines from stdin when none are given)
    #[command(alias = "c")]
    Check {
        /// Names to check
        names: Vec<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the filename rules and their messages
    Rules {
        /// Directory containing safetitle.toml (defaults to the user config dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Show the effective guard configuration
    Config {
        /// Directory containing safetitle.toml (defaults to the user config dir)
        #[arg(long)]
        dir: Option<PathBuf>,
    },
}
