// src/links/resolver.rs
// =============================================================================
// Resolves a branch name to the commit it currently points at.
//
// Status handling for GET /repos/{owner}/{repo}/branches/{branch}:
//   200 -> Resolved(sha, date)
//   404 -> RepositoryOrBranchNotFound (fatal, nothing to fall back to)
//   403 -> Unavailable, the run continues on the branch name
//   any other -> UnexpectedApiError
//
// Rust concepts:
// - match on an integer with a catch-all binding (`status => ...`)
// - Lifetimes: the resolver borrows the client and config for 'a
// =============================================================================

use log::warn;

use crate::config::Config;
use crate::error::{RawLinksError, Result};
use crate::github::{BranchResponse, GithubApi};
use crate::links::{short_sha, CommitResolution};

pub struct CommitResolver<'a, A: GithubApi> {
    api: &'a A,
    config: &'a Config,
}

impl<'a, A: GithubApi> CommitResolver<'a, A> {
    pub fn new(api: &'a A, config: &'a Config) -> Self {
        Self { api, config }
    }

    /// Makes exactly one request. A 403 is treated as rate limiting and is
    /// not an error.
    pub async fn resolve(&self) -> Result<CommitResolution> {
        let branch = &self.config.branch;
        println!("🔄 Checking latest commit on '{}'...", branch.branch);

        // Transport failures (DNS, TLS, timeout) propagate as NetworkError
        let response = self.api.get_branch(branch).await?;

        match response.status {
            200 => {
                // A body that doesn't match BranchResponse is malformed
                let parsed: BranchResponse = serde_json::from_str(&response.body)
                    .map_err(|e| RawLinksError::malformed(format!("branch response: {}", e)))?;

                // An empty sha would produce URLs with a blank anchor
                let sha = parsed.commit.sha;
                if sha.is_empty() {
                    return Err(RawLinksError::malformed("branch response has an empty commit sha"));
                }
                let date = parsed.commit.commit.committer.date;

                println!("✅ Latest commit: {}", short_sha(&sha));
                println!("📅 Commit date: {}", date.to_rfc3339());

                Ok(CommitResolution::Resolved { sha, date })
            }
            // The owner/repo/branch itself is wrong; a tree request can't help
            404 => Err(RawLinksError::RepositoryOrBranchNotFound {
                owner: branch.owner.clone(),
                repo: branch.repo.clone(),
                branch: branch.branch.clone(),
            }),
            // Rate limited: lose the commit pin but keep going
            403 => {
                println!("⚠️  API rate limit exceeded. Falling back to the branch name...");
                warn!("commit lookup returned 403: {}", response.body.trim());
                Ok(CommitResolution::Unavailable)
            }
            status => Err(RawLinksError::UnexpectedApiError {
                status,
                body: response.body,
            }),
        }
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why is 403 Ok(...) and not Err(...)?
//    - Err means "stop the run"; a rate limit only costs us the commit pin
//    - Returning CommitResolution::Unavailable lets the caller decide
//
// 2. What is `?` doing after serde_json::from_str?
//    - map_err turns serde's error into our MalformedResponse
//    - `?` then returns it early, like in the rest of the crate
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{ApiResponse, MockGithubApi};

    const BRANCH_BODY: &str = r#"{
        "name": "main",
        "commit": {
            "sha": "abc123def4567890",
            "commit": { "committer": { "date": "2024-05-01T12:30:00Z" } }
        }
    }"#;

    fn api_returning(status: u16, body: &'static str) -> MockGithubApi {
        let mut api = MockGithubApi::new();
        api.expect_get_branch()
            .withf(|branch| branch.owner == "octo" && branch.branch == "main")
            .times(1)
            .returning(move |_| Ok(ApiResponse::new(status, body)));
        api
    }

    #[tokio::test]
    async fn test_resolves_commit() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests("main", dir.path());
        let api = api_returning(200, BRANCH_BODY);

        let resolution = CommitResolver::new(&api, &config).resolve().await.unwrap();
        match resolution {
            CommitResolution::Resolved { sha, date } => {
                assert_eq!(sha, "abc123def4567890");
                assert_eq!(date.to_rfc3339(), "2024-05-01T12:30:00+00:00");
            }
            CommitResolution::Unavailable => panic!("expected a resolved commit"),
        }
    }

    #[tokio::test]
    async fn test_not_found_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests("main", dir.path());
        let api = api_returning(404, r#"{"message":"Branch not found"}"#);

        let err = CommitResolver::new(&api, &config).resolve().await.unwrap_err();
        match err {
            RawLinksError::RepositoryOrBranchNotFound { owner, repo, branch } => {
                assert_eq!((owner.as_str(), repo.as_str(), branch.as_str()), ("octo", "hello", "main"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests("main", dir.path());
        let api = api_returning(403, r#"{"message":"API rate limit exceeded"}"#);

        let resolution = CommitResolver::new(&api, &config).resolve().await.unwrap();
        assert_eq!(resolution, CommitResolution::Unavailable);
    }

    #[tokio::test]
    async fn test_other_status_carries_status_and_body() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests("main", dir.path());
        let api = api_returning(502, "bad gateway");

        let err = CommitResolver::new(&api, &config).resolve().await.unwrap_err();
        assert!(matches!(
            err,
            RawLinksError::UnexpectedApiError { status: 502, ref body } if body == "bad gateway"
        ));
    }

    #[tokio::test]
    async fn test_missing_commit_fields_are_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests("main", dir.path());
        let api = api_returning(200, r#"{"name":"main"}"#);

        let err = CommitResolver::new(&api, &config).resolve().await.unwrap_err();
        assert!(matches!(err, RawLinksError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_network_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::for_tests("main", dir.path());
        let mut api = MockGithubApi::new();
        api.expect_get_branch()
            .times(1)
            .returning(|_| Err(RawLinksError::NetworkError("connection refused".to_string())));

        let err = CommitResolver::new(&api, &config).resolve().await.unwrap_err();
        assert!(matches!(err, RawLinksError::NetworkError(_)));
    }
}
