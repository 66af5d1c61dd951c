//! Resolved dependency artifacts

use std::cmp::Ordering;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::LIB_PREFIX;
use super::entry::EntryContent;

/// Default packaging extension for dependency artifacts
pub const DEFAULT_ARTIFACT_EXTENSION: &str = "jar";

/// Identity of a resolved artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactId {
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    DEFAULT_ARTIFACT_EXTENSION.to_string()
}

impl ArtifactId {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            classifier: None,
            extension: default_extension(),
        }
    }

    /// File name used inside the archive, e.g. `lib1-1.0-tests.jar`.
    ///
    /// Derived from identity only, so the same artifact always lands at the same path.
    pub fn library_file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!(
                "{}-{}-{}.{}",
                self.name, self.version, classifier, self.extension
            ),
            None => format!("{}-{}.{}", self.name, self.version, self.extension),
        }
    }

    /// Full archive path under the libraries prefix
    pub fn library_path(&self) -> String {
        format!("{LIB_PREFIX}{}", self.library_file_name())
    }

    /// File name prefixed with the group, e.g. `com.acme-lib1-1.0.jar`
    pub fn qualified_library_file_name(&self) -> String {
        format!("{}-{}", self.group, self.library_file_name())
    }

    /// Archive path for an artifact whose plain file name is shared with another artifact
    pub fn qualified_library_path(&self) -> String {
        format!("{LIB_PREFIX}{}", self.qualified_library_file_name())
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}

/// A resolved dependency: identity plus a handle on its binary content.
///
/// Equality and ordering consider identity only.
#[derive(Debug, Clone)]
pub struct Artifact {
    id: ArtifactId,
    content: EntryContent,
}

impl Artifact {
    pub fn new(id: ArtifactId, content: EntryContent) -> Self {
        Self { id, content }
    }

    /// Artifact backed by a file on disk
    pub fn from_file(id: ArtifactId, path: impl Into<PathBuf>) -> Self {
        Self::new(id, EntryContent::File(path.into()))
    }

    pub fn id(&self) -> &ArtifactId {
        &self.id
    }

    pub fn content(&self) -> &EntryContent {
        &self.content
    }
}

impl PartialEq for Artifact {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Artifact {}

impl PartialOrd for Artifact {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Artifact {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}
