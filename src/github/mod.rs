// src/github/mod.rs
// =============================================================================
// This module handles the GitHub side of a run.
//
// Submodules:
// - client: the GithubApi trait and its reqwest implementation
// - types: serde structs for the branch and tree responses
// =============================================================================

mod client;
mod types;

pub use client::{GithubApi, HttpClient};
pub use types::{BranchResponse, FileEntry, TreeResponse};

#[cfg(test)]
pub use types::ApiResponse;

#[cfg(test)]
pub use client::MockGithubApi;
