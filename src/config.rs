// src/config.rs
// =============================================================================
// Run configuration.
//
// Config is built once from the parsed CLI and then handed by reference to
// both the commit resolver and the tree enumerator. Nothing here changes
// after startup.
//
// It also owns URL building: every URL we produce is the validated base
// plus percent-encoded path segments, so a file called "My File?.md" or a
// branch called "feat#1" still yields a working link.
//
// Rust concepts:
// - Validation at the boundary: from_cli() returns Result, so bad input
//   never reaches the network code
// - Borrowing: components hold &Config instead of cloning it
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::cli::Cli;
use crate::error::{RawLinksError, Result};

/// The branch a run works on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub owner: String,
    pub repo: String,
    pub branch: String,
}

impl BranchRef {
    /// "owner/repo", as shown in the output header
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub branch: BranchRef,
    /// Sent as a bearer token when present
    pub token: Option<SecretString>,
    /// API base without a trailing slash, e.g. https://api.github.com
    pub api_url: String,
    /// Raw content base without a trailing slash
    pub raw_url: String,
    pub output_dir: PathBuf,
    /// None means requests never time out
    pub timeout: Option<Duration>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        // Trim and reject empty values first
        let owner = required("owner", &cli.owner)?;
        let repo = required("repo", &cli.repo)?;
        let branch = required("branch", &cli.branch)?;

        // "owner/repo" in --owner is a common slip; catch it here
        for (name, value) in [("owner", &owner), ("repo", &repo)] {
            if value.contains('/') {
                return Err(RawLinksError::invalid_config(format!(
                    "--{} must not contain '/': {}",
                    name, value
                )));
            }
        }

        // An empty GITHUB_TOKEN is the same as no token
        let token = cli
            .token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| SecretString::from(t.to_string()));

        let timeout = match cli.timeout {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self {
            branch: BranchRef {
                owner,
                repo,
                branch,
            },
            token,
            api_url: base_url("api-url", &cli.api_url)?,
            raw_url: base_url("raw-url", &cli.raw_url)?,
            output_dir: PathBuf::from(&cli.output_dir),
            timeout,
        })
    }

    /// Download link for `path` pinned to `anchor`:
    /// {raw_url}/{owner}/{repo}/{anchor}/{path}
    pub fn raw_file_url(&self, anchor: &str, path: &str) -> Result<String> {
        let url = join_path(
            &self.raw_url,
            &[self.branch.owner.as_str(), self.branch.repo.as_str(), anchor, path],
        )?;
        Ok(url.into())
    }
}

/// Appends `parts` to `base` as percent-encoded path segments.
///
/// Each part is split on '/', so slashes inside a file path (or a branch
/// like "feature/x") stay path separators while '?', '#', spaces and '%'
/// are encoded.
pub fn join_path(base: &str, parts: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)
        .map_err(|e| RawLinksError::invalid_config(format!("'{}': {}", base, e)))?;

    {
        // path_segments_mut() only fails for URLs like "mailto:x"
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| RawLinksError::invalid_config(format!("'{}' cannot be a base URL", base)))?;
        segments.pop_if_empty();
        for part in parts {
            segments.extend(part.split('/'));
        }
    }

    Ok(url)
}

fn required(name: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RawLinksError::invalid_config(format!(
            "--{} must not be empty",
            name
        )));
    }
    Ok(value.to_string())
}

// Validates the URL and strips the trailing slash so join_path() doesn't
// produce an empty segment.
fn base_url(name: &str, value: &str) -> Result<String> {
    let parsed = Url::parse(value)
        .map_err(|e| RawLinksError::invalid_config(format!("--{} '{}': {}", name, value, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(RawLinksError::invalid_config(format!(
            "--{} must be an http(s) URL: {}",
            name, value
        )));
    }

    Ok(value.trim_end_matches('/').to_string())
}

#[cfg(test)]
impl Config {
    /// Config pointing at a fake host, writing into `output_dir`
    pub fn for_tests(branch: &str, output_dir: &std::path::Path) -> Self {
        Self {
            branch: BranchRef {
                owner: "octo".to_string(),
                repo: "hello".to_string(),
                branch: branch.to_string(),
            },
            token: None,
            api_url: "https://api.example.test".to_string(),
            raw_url: "https://raw.example.test".to_string(),
            output_dir: output_dir.to_path_buf(),
            timeout: Some(Duration::from_secs(5)),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why Option<Duration> for the timeout?
//    - None is a clear "no limit" instead of a magic number like 0
//    - The CLI still accepts 0; from_cli() translates it once
//
// 2. Why SecretString for the token?
//    - Its Debug output is redacted, so debug!("{:?}", config) is safe
//    - You have to call expose_secret() to read it, which is easy to grep
//
// 3. What does the inner { ... } block in join_path() do?
//    - path_segments_mut() borrows `url` mutably
//    - The block ends that borrow so we can return `url` afterwards
// -----------------------------------------------------------------------------
