//! Archive assembly pipeline
//!
//! Orchestrates one packaging run (Filter → Intermediate archive → Merge → Final archive):
//! - Reduces the candidate dependencies with the artifact filter
//! - Packs compiled output into a jar when classes are archived
//! - Merges content sources and library entries into one entry list
//! - Writes a fresh archive at the destination through the archive writer
//!
//! Each run is a pure pipeline over its inputs; nothing but the destination (and, in
//! archived mode, the intermediate jar) is written.

pub mod destination;
pub mod phase;

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::archive::ArchiveWriter;
use crate::domain::{
    ArchiveEntry, Artifact, AssemblyResult, ContentSource, EmbeddedEntry, EntryContent,
    EntryOrigin,
};
use crate::error::Result;
use crate::error::archive::final_failed;
use crate::error::source::artifact_read_failed;
use crate::filter::ArtifactFilter;
use crate::hash::hash_file;
use crate::layers::{ClassesMode, CompiledOutput, LayerResolver, MergedLayers, ResourceFilter};
use crate::progress::{ProgressReporter, SilentProgressReporter};

pub use destination::DestinationName;
pub use phase::Phase;

/// Everything one assembly run consumes
#[derive(Debug, Clone)]
pub struct AssemblyInputs {
    /// Content sources in precedence order (later wins)
    pub sources: Vec<ContentSource>,
    /// Compiled output, merged after `sources`
    pub compiled: Option<CompiledOutput>,
    /// Resolved dependency candidates
    pub candidates: Vec<Artifact>,
    pub filter: ArtifactFilter,
    pub destination: PathBuf,
}

/// Drives the packaging pipeline over an [`ArchiveWriter`]
pub struct Assembler<'a> {
    writer: &'a dyn ArchiveWriter,
    resolver: LayerResolver,
    progress: Box<dyn ProgressReporter + 'a>,
}

impl<'a> Assembler<'a> {
    pub fn new(writer: &'a dyn ArchiveWriter) -> Self {
        Self {
            writer,
            resolver: LayerResolver::new(),
            progress: Box::new(SilentProgressReporter),
        }
    }

    /// Filter applied to sources marked as filtered
    #[must_use]
    pub fn with_resource_filter(mut self, filter: impl ResourceFilter + 'static) -> Self {
        self.resolver = LayerResolver::with_resource_filter(filter);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: impl ProgressReporter + 'a) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Run the pipeline and produce a fresh archive at `inputs.destination`
    pub fn assemble(&mut self, inputs: &AssemblyInputs) -> Result<AssemblyResult> {
        match self.run(inputs) {
            Ok(result) => {
                self.progress.finish();
                Ok(result)
            }
            Err(err) => {
                self.progress.abandon();
                Err(err)
            }
        }
    }

    fn run(&mut self, inputs: &AssemblyInputs) -> Result<AssemblyResult> {
        self.progress.start_stage(Phase::Filter);
        let selected = inputs.filter.select(&inputs.candidates);

        let mut sources = inputs.sources.clone();
        if let Some(compiled) = &inputs.compiled {
            if compiled.mode == ClassesMode::Archived {
                self.progress.start_stage(Phase::IntermediateArchive);
            }
            sources.push(compiled.prepare(&self.resolver, self.writer)?);
        }

        self.progress.start_stage(Phase::Merge);
        let mut merged = self.resolver.merge(&sources)?;
        let mut shared_names: HashMap<String, usize> = HashMap::new();
        for artifact in &selected {
            *shared_names
                .entry(artifact.id().library_file_name())
                .or_default() += 1;
        }
        for artifact in &selected {
            info!("Adding <{}> as a lib", artifact.id());
            let qualified = shared_names
                .get(&artifact.id().library_file_name())
                .is_some_and(|count| *count > 1);
            let entry = library_entry(artifact, qualified)?;
            if qualified {
                let message = format!(
                    "{} shares its file name with another dependency, packaged as {}",
                    artifact.id(),
                    entry.path
                );
                warn!("{message}");
                merged.warnings.push(message);
            }
            merged.insert(entry);
        }

        self.progress.start_stage(Phase::FinalArchive);
        self.progress.entries_ready(merged.len());
        let destination = &inputs.destination;
        remove_existing(destination)?;
        self.writer
            .write(destination, merged.entries())
            .map_err(|e| final_failed(destination, e))?;
        let digest = hash_file(destination).map_err(|e| final_failed(destination, e))?;
        info!("Created {}", destination.display());

        Ok(into_result(destination, digest, merged))
    }
}

/// Library entry for `artifact`; `qualified` adds the group to keep the name unique
fn library_entry(artifact: &Artifact, qualified: bool) -> Result<ArchiveEntry> {
    if let EntryContent::File(path) = artifact.content() {
        artifact
            .content()
            .check_readable()
            .map_err(|e| artifact_read_failed(artifact.id().to_string(), path, e))?;
    }
    Ok(ArchiveEntry {
        path: if qualified {
            artifact.id().qualified_library_path()
        } else {
            artifact.id().library_path()
        },
        content: artifact.content().clone(),
        origin: EntryOrigin::Artifact(artifact.id().clone()),
    })
}

/// The assembler never appends to an existing file
fn remove_existing(destination: &Path) -> Result<()> {
    match fs::symlink_metadata(destination) {
        Ok(metadata) if metadata.is_dir() => {
            Err(final_failed(destination, "destination is a directory"))
        }
        Ok(_) => fs::remove_file(destination).map_err(|e| final_failed(destination, e)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(final_failed(destination, e)),
    }
}

fn into_result(destination: &Path, digest: String, mut merged: MergedLayers) -> AssemblyResult {
    let collisions = std::mem::take(&mut merged.collisions);
    let sources = std::mem::take(&mut merged.applied);
    let warnings = std::mem::take(&mut merged.warnings);

    let entries: Vec<EmbeddedEntry> = merged
        .into_entries()
        .into_iter()
        .map(|entry| EmbeddedEntry {
            path: entry.path,
            origin: entry.origin,
        })
        .collect();
    let artifacts = entries
        .iter()
        .filter_map(|entry| match &entry.origin {
            EntryOrigin::Artifact(id) => Some(id.clone()),
            EntryOrigin::Source(_) => None,
        })
        .collect();

    AssemblyResult {
        archive: destination.to_path_buf(),
        digest,
        artifacts,
        sources,
        entries,
        collisions,
        warnings,
    }
}
