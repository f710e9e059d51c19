// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There are no subcommands: one run resolves one branch and writes one
// file. Every flag can also come from an environment variable, which is
// handy in CI where the token already lives in GITHUB_TOKEN.
//
// The parsed Cli is turned into a validated Config (see config.rs) before
// anything touches the network.
// =============================================================================

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "raw-links",
    version = "0.1.0",
    about = "List raw download URLs for every file in a GitHub branch",
    long_about = "raw-links resolves a branch to its latest commit, walks the commit's file tree \
                  and writes raw.githubusercontent.com links for every file to \
                  raw_links_<timestamp>.txt. Links are pinned to the commit so they keep \
                  pointing at the same snapshot even after the branch moves."
)]
pub struct Cli {
    /// Repository owner (user or organization)
    #[arg(long, env = "RAW_LINKS_OWNER")]
    pub owner: String,

    /// Repository name
    #[arg(long, env = "RAW_LINKS_REPO")]
    pub repo: String,

    /// Branch to list
    #[arg(long, env = "RAW_LINKS_BRANCH", default_value = "main")]
    pub branch: String,

    /// Access token for higher API rate limits and private repositories
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "RAW_LINKS_API_URL", default_value = "https://api.github.com")]
    pub api_url: String,

    /// Base URL that serves raw file contents
    #[arg(
        long,
        env = "RAW_LINKS_RAW_URL",
        default_value = "https://raw.githubusercontent.com"
    )]
    pub raw_url: String,

    /// Directory the output file is written to
    #[arg(long, env = "RAW_LINKS_OUTPUT_DIR", default_value = ".")]
    pub output_dir: String,

    /// Request timeout in seconds (0 waits forever)
    #[arg(long, env = "RAW_LINKS_TIMEOUT", default_value_t = 30)]
    pub timeout: u64,

    /// Print debug logs (request URLs, status codes)
    #[arg(long)]
    pub debug: bool,
}
