//! In-memory file tree and its zip and directory encodings.

use super::error::ArchiveError;
use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Deflate level used for archive entries.
const COMPRESSION_LEVEL: i32 = 6;

/// Relative paths mapped to file contents.
///
/// Inserting a path that already exists replaces its contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMap {
    files: BTreeMap<String, Vec<u8>>,
}

impl FileMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `contents` at `path`.
    pub fn insert(&mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), contents.into());
    }

    /// Returns the contents stored at `path`.
    pub fn get(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Returns true when `path` is present.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// Stored paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Returns true when no files are stored.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Compresses every file into a single zip archive, Deflate level 6.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Zip`] if the zip writer fails.
    pub fn to_zip(&self) -> Result<Vec<u8>, ArchiveError> {
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(COMPRESSION_LEVEL));
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for (path, contents) in &self.files {
            writer.start_file(path.as_str(), options)?;
            writer.write_all(contents).map_err(zip::result::ZipError::Io)?;
        }

        let bytes = writer.finish()?.into_inner();
        debug!(files = self.files.len(), bytes = bytes.len(), "Built zip archive");
        Ok(bytes)
    }

    /// Writes every file below `dir`, creating directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::Io`] for the first path that cannot be written.
    pub fn write_to_dir(&self, dir: &Path) -> Result<(), ArchiveError> {
        for (path, contents) in &self.files {
            let target = dir.join(path);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|source| ArchiveError::Io {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
            std::fs::write(&target, contents).map_err(|source| ArchiveError::Io {
                path: target.display().to_string(),
                source,
            })?;
        }
        Ok(())
    }
}
