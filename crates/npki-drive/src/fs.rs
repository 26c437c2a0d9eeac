//! Filesystem access used by the certificate walker.

use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::Path;

/// Result of a stat call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    /// Path is a directory (after following symlinks)
    pub is_directory: bool,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name within the listed directory
    pub name: OsString,

    /// Entry itself is a directory (symlinks are not followed)
    pub is_directory: bool,
}

/// Read-only filesystem queries.
///
/// Each call is a suspension point; the walker never has two in flight.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Stat a path
    async fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// List a directory's entries in the order the OS returns them
    async fn list_directory(&self, path: &Path) -> io::Result<Vec<DirEntry>>;
}

/// [`FileSystem`] backed by `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioFs;

#[async_trait]
impl FileSystem for TokioFs {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let meta = tokio::fs::metadata(path).await?;
        Ok(FileStat {
            is_directory: meta.is_dir(),
        })
    }

    async fn list_directory(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        let mut entries = Vec::new();
        let mut dir = tokio::fs::read_dir(path).await?;

        while let Some(entry) = dir.next_entry().await? {
            let file_type = entry.file_type().await?;
            entries.push(DirEntry {
                name: entry.file_name(),
                is_directory: file_type.is_dir(),
            });
        }

        Ok(entries)
    }
}
