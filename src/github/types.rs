// src/github/types.rs
// =============================================================================
// Shapes of the two GitHub REST responses we read.
//
// Only the fields we use are declared; serde ignores the rest.
//
//   GET /repos/{owner}/{repo}/branches/{branch}
//     -> { commit: { sha, commit: { committer: { date } } } }
//
//   GET /repos/{owner}/{repo}/git/trees/{ref}?recursive=1
//     -> { sha, tree: [{ path, type }, ...], truncated }
// =============================================================================

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Status code and body of a response, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Deserialize)]
pub struct BranchResponse {
    pub commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
pub struct BranchCommit {
    pub sha: String,
    pub commit: CommitDetails,
}

#[derive(Debug, Deserialize)]
pub struct CommitDetails {
    pub committer: Committer,
}

#[derive(Debug, Deserialize)]
pub struct Committer {
    pub date: DateTime<Utc>,
}

/// Response from the Git Trees API.
///
/// `tree` is optional here so that a body without it can be reported as
/// malformed rather than as a generic JSON error.
#[derive(Debug, Deserialize)]
pub struct TreeResponse {
    pub tree: Option<Vec<FileEntry>>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl FileEntry {
    pub fn is_blob(&self) -> bool {
        self.kind == EntryKind::Blob
    }
}

/// `blob` is a file, `tree` a directory; submodules show up as `commit`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Blob,
    Tree,
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_branch_response() {
        let body = r#"{
            "name": "main",
            "commit": {
                "sha": "abc123def456",
                "commit": { "committer": { "name": "x", "date": "2024-05-01T12:30:00Z" } }
            }
        }"#;
        let parsed: BranchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.commit.sha, "abc123def456");
        assert_eq!(
            parsed.commit.commit.committer.date.to_rfc3339(),
            "2024-05-01T12:30:00+00:00"
        );
    }

    #[test]
    fn test_parse_tree_entry_kinds() {
        let body = r#"{
            "sha": "abc123",
            "tree": [
                { "path": "a.py", "type": "blob", "mode": "100644" },
                { "path": "src", "type": "tree" },
                { "path": "vendor/lib", "type": "commit" }
            ]
        }"#;
        let parsed: TreeResponse = serde_json::from_str(body).unwrap();
        let tree = parsed.tree.unwrap();
        assert_eq!(tree[0].kind, EntryKind::Blob);
        assert_eq!(tree[1].kind, EntryKind::Tree);
        assert_eq!(tree[2].kind, EntryKind::Other);
        assert!(!parsed.truncated);
    }

    #[test]
    fn test_tree_key_may_be_missing() {
        let parsed: TreeResponse = serde_json::from_str(r#"{"message": "nope"}"#).unwrap();
        assert!(parsed.tree.is_none());
    }

    #[test]
    fn test_success_range() {
        assert!(ApiResponse::new(200, "").is_success());
        assert!(!ApiResponse::new(403, "").is_success());
    }
}
