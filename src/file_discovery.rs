use std::path::{Path, PathBuf};

use log::warn;
use tokio::fs;

use crate::error::ParserError;

/// Extension that marks a file as an archive, compared ASCII case-insensitively
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Async archive discovery in a single folder
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery;

impl FileDiscovery {
    pub fn new() -> Self {
        Self
    }

    /// List matching regular files directly inside `folder`, sorted by file name.
    ///
    /// The sorted order is the discovery order every later stage preserves.
    pub async fn discover_files(&self, folder: &Path) -> Result<Vec<PathBuf>, ParserError> {
        let read_error = |source| ParserError::FolderRead {
            folder: folder.to_path_buf(),
            source,
        };

        let mut read_dir = fs::read_dir(folder).await.map_err(read_error)?;
        let mut files = Vec::new();

        while let Some(entry) = read_dir.next_entry().await.map_err(read_error)? {
            let entry_path = entry.path();
            if !self.should_process(&entry_path) {
                continue;
            }

            let file_type = match entry.file_type().await {
                Ok(file_type) => file_type,
                Err(e) => {
                    warn!("Skipping {}: {}", entry_path.display(), e);
                    continue;
                }
            };

            // Symlinks count when they point at a regular file
            let is_file = if file_type.is_symlink() {
                fs::metadata(&entry_path)
                    .await
                    .map(|m| m.is_file())
                    .unwrap_or(false)
            } else {
                file_type.is_file()
            };

            if is_file {
                files.push(entry_path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Check if a file should be processed based on its extension
    pub fn should_process(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ARCHIVE_EXTENSION))
    }
}
