// src/links/output.rs
// =============================================================================
// Writes the raw_links_<YYYYMMDD_HHMMSS>.txt artifact.
//
// Layout:
//   # Enlaces RAW actualizados - 2024-05-01 12:30:00
//   # Repositorio: owner/repo
//   # Commit: <sha | Último disponible>
//   # Total de archivos: N
//   <blank line>
//   one URL per line
//
// The file is written to a temp file in the same directory and renamed
// into place once every line is flushed. If anything fails first, the
// temp file is deleted on drop and no artifact appears.
//
// Rust concepts:
// - RAII: NamedTempFile removes itself when dropped, so every early `?`
//   cleans up without extra code
// - BufWriter: batches the many small writeln! calls
// =============================================================================

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tempfile::Builder;

use crate::config::BranchRef;
use crate::error::{RawLinksError, Result};

/// Header value used when the run is not pinned to a commit
pub const UNKNOWN_COMMIT: &str = "Último disponible";

pub struct Artifact<'a> {
    pub repo: &'a BranchRef,
    pub commit: Option<&'a str>,
    pub urls: &'a [String],
    pub generated_at: DateTime<Local>,
}

impl Artifact<'_> {
    pub fn file_name(&self) -> String {
        format!("raw_links_{}.txt", self.generated_at.format("%Y%m%d_%H%M%S"))
    }

    fn header(&self) -> String {
        format!(
            "# Enlaces RAW actualizados - {}\n# Repositorio: {}\n# Commit: {}\n# Total de archivos: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S"),
            self.repo.full_name(),
            self.commit.unwrap_or(UNKNOWN_COMMIT),
            self.urls.len()
        )
    }

    /// Writes the artifact into `dir` and returns its final path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());

        // Same directory as the target, so persist() is a plain rename
        let mut tmp = Builder::new()
            .prefix(".raw_links_")
            .suffix(".tmp")
            .tempfile_in(dir)?;

        {
            // The writer borrows the temp file only inside this block
            let mut writer = BufWriter::new(tmp.as_file_mut());
            writer.write_all(self.header().as_bytes())?;
            for url in self.urls {
                writeln!(writer, "{}", url)?;
            }
            writer.flush()?;
        }
        // Data must be on disk before the name appears
        tmp.as_file().sync_all()?;

        tmp.persist(&path).map_err(|e| RawLinksError::Io(e.error))?;
        Ok(path)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is `impl Artifact<'_>`?
//    - Artifact borrows its data, so it has a lifetime parameter
//    - '_ says "any lifetime" when we don't need to name it
//
// 2. Why does persist() return a PersistError?
//    - On failure it hands the temp file back along with the io::Error
//    - We only keep e.error; dropping the rest deletes the temp file
// -----------------------------------------------------------------------------
