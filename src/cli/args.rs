//! Command-line argument parsing

use clap::Parser;

#[derive(Parser)]
#[command(name = "docker-tag-pruner")]
#[command(about = "A tool to prune old image tags from a Docker Hub repository")]
#[command(version, author)]
pub struct Args {
    /// Target repository
    #[arg(
        long = "repository",
        short = 'r',
        help = "Target repository in owner/name form"
    )]
    pub repository: String,

    /// Retention count
    #[arg(
        long = "keep",
        short = 'k',
        default_value = "3",
        help = "Number of most recently updated tags to keep"
    )]
    pub keep: usize,

    /// Registry API base URL
    #[arg(
        long = "registry-url",
        default_value = "https://hub.docker.com",
        help = "Base URL of the registry API"
    )]
    pub registry_url: String,

    /// Registry username
    #[arg(
        long = "username",
        short = 'u',
        help = "Username for registry authentication"
    )]
    pub username: Option<String>,

    /// Registry password
    #[arg(
        long = "password",
        short = 'p',
        help = "Password for registry authentication"
    )]
    pub password: Option<String>,

    /// Tags fetched per listing page
    #[arg(
        long = "page-size",
        default_value = "100",
        help = "Number of tags fetched per page when listing"
    )]
    pub page_size: u32,

    /// Timeout in seconds for network operations
    #[arg(
        long = "timeout",
        short = 't',
        default_value = "300",
        help = "Timeout for network operations in seconds"
    )]
    pub timeout: u64,

    /// Dry run mode (plan without deleting)
    #[arg(
        long = "dry-run",
        short = 'n',
        help = "Show which tags would be deleted without deleting them"
    )]
    pub dry_run: bool,

    /// Continue past per-tag deletion failures
    #[arg(
        long = "keep-going",
        help = "Continue deleting remaining tags when a deletion fails"
    )]
    pub keep_going: bool,

    /// Verbose output
    #[arg(long = "verbose", short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    /// Quiet output
    #[arg(
        long = "quiet",
        short = 'q',
        help = "Suppress progress output, print only the final report"
    )]
    pub quiet: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Load credentials from environment variables when not given as flags
    pub fn from_env(mut self) -> Self {
        if self.username.is_none() {
            self.username = std::env::var("DOCKER_USERNAME").ok();
        }

        if self.password.is_none() {
            self.password = std::env::var("DOCKER_PASSWORD").ok();
        }

        self
    }
}
