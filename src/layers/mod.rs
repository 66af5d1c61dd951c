//! Content layer resolver
//!
//! Merges an ordered list of content sources into one list of archive entries:
//! - Directory sources are walked in file name order, so entry order is stable
//! - A source whose root does not exist contributes nothing and is reported as a warning
//! - A later source replacing an earlier entry keeps the earlier slot and records a collision

pub mod compiled;
pub mod resources;

use std::collections::HashMap;
use std::fs;

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::{ArchiveEntry, Collision, ContentSource, EntryContent, EntryOrigin, SourceRoot};
use crate::error::Result;
use crate::error::source::read_failed;

pub use compiled::{CLASSES_SOURCE_NAME, ClassesMode, CompiledOutput};
pub use resources::{PropertyFilter, ResourceFilter};

/// Entries merged so far, with the collisions the merge produced
#[derive(Debug, Default)]
pub struct MergedLayers {
    entries: Vec<ArchiveEntry>,
    index: HashMap<String, usize>,
    pub collisions: Vec<Collision>,
    /// Sources that existed and were merged, in order
    pub applied: Vec<String>,
    pub warnings: Vec<String>,
}

impl MergedLayers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry; an existing entry at the same path is replaced and the collision recorded
    pub fn insert(&mut self, entry: ArchiveEntry) {
        if let Some(&slot) = self.index.get(&entry.path) {
            let previous = std::mem::replace(&mut self.entries[slot], entry);
            let current = &self.entries[slot];
            debug!(
                "{} from {} replaces {}",
                current.path, current.origin, previous.origin
            );
            self.collisions.push(Collision {
                path: previous.path,
                replaced: previous.origin,
                replaced_by: current.origin.clone(),
            });
        } else {
            self.index.insert(entry.path.clone(), self.entries.len());
            self.entries.push(entry);
        }
    }

    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<ArchiveEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolves content sources into archive entries
pub struct LayerResolver {
    resource_filter: Box<dyn ResourceFilter>,
}

impl Default for LayerResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerResolver {
    /// Resolver whose filtered sources substitute no properties
    pub fn new() -> Self {
        Self::with_resource_filter(PropertyFilter::default())
    }

    pub fn with_resource_filter(filter: impl ResourceFilter + 'static) -> Self {
        Self {
            resource_filter: Box::new(filter),
        }
    }

    /// Merge `sources` in order; later sources win on path collisions
    pub fn merge(&self, sources: &[ContentSource]) -> Result<MergedLayers> {
        let mut merged = MergedLayers::new();
        for source in sources {
            self.merge_source(&mut merged, source)?;
        }
        Ok(merged)
    }

    /// Merge one more source into an existing result
    pub fn merge_source(&self, merged: &mut MergedLayers, source: &ContentSource) -> Result<()> {
        match self.collect(source)? {
            Some(entries) => {
                debug!("{} contributes {} entries", source.name, entries.len());
                for entry in entries {
                    merged.insert(entry);
                }
                merged.applied.push(source.name.clone());
            }
            None => {
                let message = format!(
                    "{} does not exist, skipping {}",
                    source.root.path().display(),
                    source.name
                );
                warn!("{message}");
                merged.warnings.push(message);
            }
        }
        Ok(())
    }

    /// Entries of a single source, or `None` when its root does not exist
    pub fn collect(&self, source: &ContentSource) -> Result<Option<Vec<ArchiveEntry>>> {
        if !source.root.exists() {
            return Ok(None);
        }

        let entries = match &source.root {
            SourceRoot::File(path) => {
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                if source.filter.accepts(&file_name) {
                    vec![self.entry(source, &file_name, path)?]
                } else {
                    Vec::new()
                }
            }
            SourceRoot::Directory(root) => {
                let mut entries = Vec::new();
                for item in WalkDir::new(root).follow_links(true).sort_by_file_name() {
                    let item = item.map_err(|e| {
                        read_failed(e.path().unwrap_or(root.as_path()), &e)
                    })?;
                    if !item.file_type().is_file() {
                        continue;
                    }
                    let relative = item
                        .path()
                        .strip_prefix(root)
                        .unwrap_or(item.path())
                        .to_string_lossy()
                        .replace('\\', "/");
                    if source.filter.accepts(&relative) {
                        entries.push(self.entry(source, &relative, item.path())?);
                    }
                }
                entries
            }
        };

        Ok(Some(entries))
    }

    fn entry(
        &self,
        source: &ContentSource,
        relative: &str,
        path: &std::path::Path,
    ) -> Result<ArchiveEntry> {
        let content = if source.filtered {
            let bytes = fs::read(path).map_err(|e| read_failed(path, e))?;
            match String::from_utf8(bytes) {
                Ok(text) => {
                    EntryContent::Bytes(self.resource_filter.filter(relative, &text).into_bytes())
                }
                Err(binary) => EntryContent::Bytes(binary.into_bytes()),
            }
        } else {
            EntryContent::File(path.to_path_buf())
        };

        Ok(ArchiveEntry {
            path: format!("{}{relative}", source.prefix),
            content,
            origin: EntryOrigin::Source(source.name.clone()),
        })
    }
}
