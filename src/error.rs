// src/error.rs
// =============================================================================
// Every way a run can fail, in one enum.
//
// Each component returns Result<T, RawLinksError>, and main() matches on
// the variant to decide the exit code and the hint printed to the user.
//
// Being rate-limited is NOT in here: the commit lookup degrades to the
// branch name and the run carries on.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RawLinksError {
    /// The branch lookup returned 404, so owner/repo/branch is wrong
    #[error("repository {owner}/{repo} or branch '{branch}' not found")]
    RepositoryOrBranchNotFound {
        owner: String,
        repo: String,
        branch: String,
    },

    /// Any non-success status we don't have a dedicated variant for
    #[error("GitHub API error: HTTP {status} - {body}")]
    UnexpectedApiError { status: u16, body: String },

    /// The request never produced a response (DNS, TLS, timeout, ...)
    #[error("could not reach GitHub: {0}")]
    NetworkError(String),

    /// The response body did not have the shape we expected
    #[error("unexpected response from GitHub: {0}")]
    MalformedResponse(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("could not write output file: {0}")]
    Io(#[from] std::io::Error),

    #[error("logger initialization failed: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RawLinksError>;

impl RawLinksError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// What the user should check after this error
    pub fn remediation(&self) -> &'static str {
        match self {
            Self::RepositoryOrBranchNotFound { .. } => {
                "Check --owner, --repo and --branch, and that the token can see private repositories"
            }
            Self::UnexpectedApiError { .. } | Self::MalformedResponse(_) => {
                "Check --api-url and your token, then try again later"
            }
            Self::NetworkError(_) => {
                "Check your internet connection, --api-url and --timeout"
            }
            Self::InvalidConfig(_) | Self::Logger(_) => "Run with --help to see the accepted options",
            Self::Io(_) => "Check that --output-dir exists and is writable",
        }
    }
}

// reqwest only surfaces transport problems here; status codes are
// inspected by the caller before any error_for_status() would fire.
impl From<reqwest::Error> for RawLinksError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::NetworkError(format!("request timed out: {}", err))
        } else {
            Self::NetworkError(err.to_string())
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does #[from] do?
//    - thiserror generates `impl From<io::Error> for RawLinksError`
//    - That is what lets `?` convert an io::Error automatically
//
// 2. Why a Result alias?
//    - `Result<T>` reads better than `Result<T, RawLinksError>` everywhere
// -----------------------------------------------------------------------------
