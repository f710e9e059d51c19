// src/github/client.rs
// =============================================================================
// Talks to the GitHub REST API.
//
// The GithubApi trait is the seam between our logic and the network:
// - HttpClient is the real implementation, built on reqwest
// - tests use MockGithubApi (generated by mockall) instead
//
// The trait hands back the raw status and body. Deciding what a 403 or a
// 404 means is the caller's job, because it differs per request.
// =============================================================================

use async_trait::async_trait;
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use url::Url;

#[cfg(test)]
use mockall::automock;

use crate::config::{join_path, BranchRef, Config};
use crate::error::{RawLinksError, Result};
use crate::github::types::ApiResponse;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait GithubApi {
    /// GET /repos/{owner}/{repo}/branches/{branch}
    async fn get_branch(&self, branch: &BranchRef) -> Result<ApiResponse>;

    /// GET /repos/{owner}/{repo}/git/trees/{anchor}?recursive=1
    async fn get_tree(&self, branch: &BranchRef, anchor: &str) -> Result<ApiResponse>;
}

/// reqwest-backed GithubApi
pub struct HttpClient {
    client: Client,
    api_url: String,
}

impl HttpClient {
    pub fn new(config: &Config) -> Result<Self> {
        // Sent with every request; GitHub rejects calls without a User-Agent
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("raw-links/", env!("CARGO_PKG_VERSION"))),
        );

        if let Some(token) = &config.token {
            // A token with a newline or other control character can't be a header
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| RawLinksError::invalid_config(format!("token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        // No timeout() call at all means reqwest waits forever
        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: build_client(builder)?,
            api_url: config.api_url.clone(),
        })
    }

    async fn get(&self, url: Url) -> Result<ApiResponse> {
        debug!("GET {}", url);

        // Only transport failures end up in `?` here; any status code,
        // 404 included, comes back as a normal response
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("HTTP {} ({} bytes) from {}", status, body.len(), url);
        Ok(ApiResponse::new(status, body))
    }
}

#[async_trait]
impl GithubApi for HttpClient {
    async fn get_branch(&self, branch: &BranchRef) -> Result<ApiResponse> {
        self.get(branch_url(&self.api_url, branch)?).await
    }

    async fn get_tree(&self, branch: &BranchRef, anchor: &str) -> Result<ApiResponse> {
        self.get(tree_url(&self.api_url, branch, anchor)?).await
    }
}

// Building the client never touches the network, so a failure here is a
// setup problem rather than a NetworkError.
fn build_client(builder: ClientBuilder) -> Result<Client> {
    builder
        .build()
        .map_err(|e| RawLinksError::invalid_config(format!("could not build HTTP client: {}", e)))
}

fn branch_url(api_url: &str, branch: &BranchRef) -> Result<Url> {
    join_path(
        api_url,
        &["repos", branch.owner.as_str(), branch.repo.as_str(), "branches", branch.branch.as_str()],
    )
}

fn tree_url(api_url: &str, branch: &BranchRef, anchor: &str) -> Result<Url> {
    let mut url = join_path(
        api_url,
        &["repos", branch.owner.as_str(), branch.repo.as_str(), "git", "trees", anchor],
    )?;
    url.set_query(Some("recursive=1"));
    Ok(url)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why #[async_trait]?
//    - Plain traits can't have async methods that work as trait objects
//    - async_trait rewrites them to return a boxed future
//
// 2. What does #[cfg_attr(test, automock)] do?
//    - Only when compiling tests, mockall generates MockGithubApi
//    - Tests set expectations on it instead of hitting the network
//    - automock must come before #[async_trait]
//
// 3. Why default_headers?
//    - Every request needs the same Accept, User-Agent and token
//    - Setting them once on the Client keeps get() short
// -----------------------------------------------------------------------------
