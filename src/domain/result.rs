//! The record produced by one assembly run

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::artifact::ArtifactId;
use super::entry::{Collision, EntryOrigin};

/// An entry as it ended up in the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddedEntry {
    pub path: String,
    pub origin: EntryOrigin,
}

/// Outcome of a successful assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyResult {
    /// Location of the produced archive
    pub archive: PathBuf,
    /// `blake3:`-prefixed digest of the archive bytes
    pub digest: String,
    /// Artifacts whose library entry survived the merge
    pub artifacts: Vec<ArtifactId>,
    /// Names of the content sources that contributed
    pub sources: Vec<String>,
    pub entries: Vec<EmbeddedEntry>,
    pub collisions: Vec<Collision>,
    pub warnings: Vec<String>,
}

impl AssemblyResult {
    /// Entries whose path starts with `prefix`
    pub fn entries_under<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a EmbeddedEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.path.starts_with(prefix))
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.entries.iter().any(|entry| entry.path == path)
    }
}
