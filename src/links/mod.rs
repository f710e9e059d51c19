// src/links/mod.rs
// =============================================================================
// Turning a branch into a file of raw links.
//
// A run is two steps, always in this order:
// 1. resolver: branch name -> latest commit (or Unavailable when rate-limited)
// 2. enumerator: commit/branch -> recursive tree -> raw_links_<ts>.txt
//
// The commit id, when we have one, is the "anchor" that both the tree
// request and every generated URL are pinned to.
// =============================================================================

mod enumerator;
mod output;
mod resolver;

use std::fmt;

use chrono::{DateTime, Utc};

use crate::config::{BranchRef, Config};
use crate::error::Result;
use crate::github::GithubApi;

pub use enumerator::{Outcome, TreeEnumerator};
pub use resolver::CommitResolver;

#[cfg(test)]
pub use enumerator::OutputSummary;

/// What the branch lookup told us
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitResolution {
    Resolved { sha: String, date: DateTime<Utc> },
    /// The lookup was rate-limited; fall back to the branch name
    Unavailable,
}

impl CommitResolution {
    pub fn sha(&self) -> Option<&str> {
        match self {
            Self::Resolved { sha, .. } => Some(sha),
            Self::Unavailable => None,
        }
    }

    pub fn anchor(&self, branch: &BranchRef) -> Anchor {
        match self {
            Self::Resolved { sha, .. } => Anchor::Commit(sha.clone()),
            Self::Unavailable => Anchor::Branch(branch.branch.clone()),
        }
    }
}

/// The ref a tree listing and its URLs are pinned to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    Commit(String),
    Branch(String),
}

impl Anchor {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Commit(sha) => sha,
            Self::Branch(name) => name,
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Commit(sha) => write!(f, "commit {}", short_sha(sha)),
            Self::Branch(name) => write!(f, "branch {}", name),
        }
    }
}

/// First 8 characters of a commit id
pub fn short_sha(sha: &str) -> &str {
    sha.get(..8).unwrap_or(sha)
}

/// Runs both steps. A resolver error stops the run before any tree request.
pub async fn generate<A: GithubApi>(api: &A, config: &Config) -> Result<Outcome> {
    let resolution = CommitResolver::new(api, config).resolve().await?;
    TreeEnumerator::new(api, config).enumerate(&resolution).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RawLinksError;
    use crate::github::{ApiResponse, MockGithubApi};

    fn branch() -> BranchRef {
        BranchRef {
            owner: "octo".to_string(),
            repo: "hello".to_string(),
            branch: "main".to_string(),
        }
    }

    #[test]
    fn test_anchor_selection() {
        let resolved = CommitResolution::Resolved {
            sha: "abc123".to_string(),
            date: Utc::now(),
        };
        assert_eq!(resolved.anchor(&branch()), Anchor::Commit("abc123".to_string()));
        assert_eq!(resolved.sha(), Some("abc123"));

        let unavailable = CommitResolution::Unavailable;
        assert_eq!(unavailable.anchor(&branch()), Anchor::Branch("main".to_string()));
        assert_eq!(unavailable.sha(), None);
    }

    #[test]
    fn test_short_sha_and_display() {
        assert_eq!(short_sha("0123456789abcdef"), "01234567");
        assert_eq!(short_sha("abc"), "abc");
        assert_eq!(
            Anchor::Commit("0123456789abcdef".to_string()).to_string(),
            "commit 01234567"
        );
        assert_eq!(Anchor::Branch("dev".to_string()).to_string(), "branch dev");
    }

    #[tokio::test]
    async fn test_not_found_aborts_before_tree_request() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests("main", dir.path());

        let mut api = MockGithubApi::new();
        api.expect_get_branch()
            .times(1)
            .returning(|_| Ok(ApiResponse::new(404, r#"{"message":"Branch not found"}"#)));
        api.expect_get_tree().never();

        let result = generate(&api, &config).await;
        assert!(matches!(
            result,
            Err(RawLinksError::RepositoryOrBranchNotFound { .. })
        ));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_rate_limited_run_uses_branch_name() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests("develop", dir.path());

        let mut api = MockGithubApi::new();
        api.expect_get_branch()
            .times(1)
            .returning(|_| Ok(ApiResponse::new(403, r#"{"message":"API rate limit exceeded"}"#)));
        api.expect_get_tree()
            .withf(|_, anchor| anchor == "develop")
            .times(1)
            .returning(|_, _| {
                Ok(ApiResponse::new(
                    200,
                    r#"{"tree":[{"path":"README.md","type":"blob"},{"path":"src/lib.rs","type":"blob"}]}"#,
                ))
            });

        let outcome = generate(&api, &config).await.unwrap();
        let Outcome::Written(summary) = outcome else {
            panic!("expected a written file");
        };
        let content = std::fs::read_to_string(&summary.path).unwrap();
        let urls: Vec<&str> = content.lines().filter(|l| l.starts_with("https://")).collect();
        assert_eq!(urls.len(), 2);
        assert!(urls.iter().all(|u| u.contains("/develop/")));
        assert!(content.contains("# Commit: Último disponible"));
    }
}
