use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "gitattrs", bin_name = "gitattrs", version = get_version())]
#[command(about = "Ship, lint and explain .gitattributes templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List built-in templates
    #[command(alias = "ls")]
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a template exactly as it would be written
    Show {
        /// Template name (defaults to the configured template)
        template: Option<String>,

        /// Print the parsed rules as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Write a template to <DIR>/.gitattributes
    Init {
        /// Project directory (defaults to the current directory)
        dir: Option<PathBuf>,

        /// Template name (defaults to the configured template)
        #[arg(short, long)]
        template: Option<String>,

        /// Overwrite an existing file that differs from the template
        #[arg(short, long)]
        force: bool,
    },

    /// Lint an attributes file
    Check {
        /// A file, a directory holding .gitattributes, or - for stdin
        path: Option<PathBuf>,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare a project's .gitattributes with a template
    #[command(alias = "st")]
    Status {
        /// Project directory (defaults to the current directory)
        dir: Option<PathBuf>,

        /// Template name (defaults to the configured template)
        #[arg(short, long)]
        template: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the attributes git would give to one or more paths
    Explain {
        /// Paths relative to the project directory
        #[arg(required = true, num_args = 1..)]
        paths: Vec<String>,

        /// Project directory (defaults to the current directory)
        #[arg(short = 'C', long = "dir")]
        dir: Option<PathBuf>,

        /// Template used when the directory has no .gitattributes
        #[arg(short, long)]
        template: Option<String>,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (template, backup)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
