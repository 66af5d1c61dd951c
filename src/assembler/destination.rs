//! Destination naming

use std::path::{Path, PathBuf};

/// Default extension of the produced archive
pub const DEFAULT_ARCHIVE_EXTENSION: &str = "zip";

/// Extension of the intermediate classes archive
pub const CLASSES_ARCHIVE_EXTENSION: &str = "jar";

/// Base name plus extension of an archive file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationName {
    pub base: String,
    pub extension: String,
}

impl DestinationName {
    pub fn new(base: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            extension: extension.into().trim_start_matches('.').to_string(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.base, self.extension)
    }

    pub fn path_in(&self, directory: &Path) -> PathBuf {
        directory.join(self.file_name())
    }

    /// Same base name with the classes archive extension
    pub fn classes_archive(&self) -> Self {
        Self::new(self.base.clone(), CLASSES_ARCHIVE_EXTENSION)
    }
}
