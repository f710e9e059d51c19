// src/links/enumerator.rs
// =============================================================================
// Lists every file under the anchor and writes one raw URL per file.
//
// Steps:
// 1. Pick the anchor: commit id if we resolved one, else the branch name
// 2. GET /repos/{owner}/{repo}/git/trees/{anchor}?recursive=1
// 3. Keep only `blob` entries, in the order GitHub returned them
// 4. No blobs -> warn and stop, nothing is written
// 5. Otherwise write raw_links_<ts>.txt and print a short summary
//
// Rust concepts:
// - Generics: TreeEnumerator<A: GithubApi> works with the real client and
//   with MockGithubApi in tests
// - Iterator chains: filter/map/collect instead of index loops
// - collect::<Result<Vec<_>>>() stops at the first failing item
// =============================================================================

use std::path::PathBuf;

use chrono::Local;
use log::{debug, warn};

use crate::config::Config;
use crate::error::{RawLinksError, Result};
use crate::github::{FileEntry, GithubApi, TreeResponse};
use crate::links::output::Artifact;
use crate::links::{Anchor, CommitResolution};

/// How many generated URLs are echoed to the console
const PREVIEW_LEN: usize = 5;

/// How a successful run ended
#[derive(Debug)]
pub enum Outcome {
    Written(OutputSummary),
    /// The tree had no files; nothing was written
    NoFiles,
}

#[derive(Debug)]
pub struct OutputSummary {
    pub path: PathBuf,
    pub file_count: usize,
    pub bytes: u64,
    pub anchor: Anchor,
}

pub struct TreeEnumerator<'a, A: GithubApi> {
    api: &'a A,
    config: &'a Config,
}

impl<'a, A: GithubApi> TreeEnumerator<'a, A> {
    pub fn new(api: &'a A, config: &'a Config) -> Self {
        Self { api, config }
    }

    pub async fn enumerate(&self, resolution: &CommitResolution) -> Result<Outcome> {
        let branch = &self.config.branch;
        let anchor = resolution.anchor(branch);

        println!("📡 Fetching repository tree ({})...", anchor);

        // One request; transport failures propagate as NetworkError
        let response = self.api.get_tree(branch, anchor.as_str()).await?;

        // Unlike the branch lookup, no status is recoverable here
        if !response.is_success() {
            return Err(RawLinksError::UnexpectedApiError {
                status: response.status,
                body: response.body,
            });
        }

        let files = blob_entries(&response.body)?;

        // An empty tree is not an error, there's just nothing to write
        if files.is_empty() {
            println!("⚠️  No files found in the repository");
            return Ok(Outcome::NoFiles);
        }

        // Every URL is pinned to the same anchor as the tree we just listed
        let urls = files
            .iter()
            .map(|file| self.config.raw_file_url(anchor.as_str(), &file.path))
            .collect::<Result<Vec<String>>>()?;

        // One timestamp for both the file name and the header line
        let artifact = Artifact {
            repo: branch,
            commit: resolution.sha(),
            urls: &urls,
            generated_at: Local::now(),
        };

        println!("📝 Writing file: {}", artifact.file_name());
        let path = artifact.write_to(&self.config.output_dir)?;
        let bytes = std::fs::metadata(&path)?.len();

        // Human-readable summary, same order every run

        println!("✅ File written: {}", path.display());
        println!("📊 Statistics:");
        println!("   • Total files: {}", urls.len());
        println!("   • File size: {} bytes", bytes);
        println!("   • Anchor used: {}", anchor);

        println!("\n🔍 First {} generated links:", PREVIEW_LEN.min(urls.len()));
        for url in urls.iter().take(PREVIEW_LEN) {
            println!("   • {}", url);
        }

        Ok(Outcome::Written(OutputSummary {
            path,
            file_count: urls.len(),
            bytes,
            anchor,
        }))
    }
}

// Decodes a tree listing and keeps only file entries.
fn blob_entries(body: &str) -> Result<Vec<FileEntry>> {
    let listing: TreeResponse = serde_json::from_str(body)
        .map_err(|e| RawLinksError::malformed(format!("tree response: {}", e)))?;

    let tree = listing
        .tree
        .ok_or_else(|| RawLinksError::malformed("tree response has no 'tree' key"))?;

    if listing.truncated {
        warn!("GitHub truncated the tree listing; some files will be missing from the output");
    }

    let total = tree.len();
    let blobs: Vec<FileEntry> = tree.into_iter().filter(FileEntry::is_blob).collect();
    debug!("{} of {} tree entries are files", blobs.len(), total);

    Ok(blobs)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does enumerate() take &CommitResolution instead of a sha?
//    - The enum forces us to handle Unavailable explicitly
//    - anchor() is the single place that picks commit vs. branch
//
// 2. What does `filter(FileEntry::is_blob)` mean?
//    - A method can be passed where a closure is expected
//    - It's the same as `.filter(|entry| entry.is_blob())`
//
// 3. Why build all URLs before writing?
//    - A bad path fails the run before any file is created
//    - The header needs the final count up front
// -----------------------------------------------------------------------------
