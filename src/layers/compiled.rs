//! Compiled output packaging
//!
//! Compiled output is added either as loose files under [`CLASSES_PREFIX`] or packed into
//! an intermediate jar placed under [`LIB_PREFIX`].

use std::path::PathBuf;

use tracing::info;

use crate::archive::ArchiveWriter;
use crate::domain::{CLASSES_PREFIX, ContentSource, LIB_PREFIX};
use crate::error::Result;
use crate::error::archive::intermediate_failed;

use super::LayerResolver;

/// Name of the content source carrying compiled output
pub const CLASSES_SOURCE_NAME: &str = "classes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassesMode {
    /// Every compiled file becomes its own entry
    Loose,
    /// Compiled files are packed into one jar first
    Archived,
}

/// Where compiled output lives and how to package it
#[derive(Debug, Clone)]
pub struct CompiledOutput {
    pub directory: PathBuf,
    pub mode: ClassesMode,
    /// Intermediate jar location, used in archived mode
    pub jar_path: PathBuf,
}

impl CompiledOutput {
    /// Content source for loose mode
    pub fn loose_source(&self) -> ContentSource {
        ContentSource::directory(CLASSES_SOURCE_NAME, &self.directory).with_prefix(CLASSES_PREFIX)
    }

    /// Turn compiled output into the content source to merge.
    ///
    /// In archived mode this writes the intermediate jar through `writer`. A missing
    /// directory is passed through as the loose source so the resolver reports it like any
    /// other missing root.
    pub fn prepare(&self, resolver: &LayerResolver, writer: &dyn ArchiveWriter) -> Result<ContentSource> {
        if !self.directory.is_dir() {
            return Ok(self.loose_source());
        }

        match self.mode {
            ClassesMode::Loose => {
                info!("Copying classes directly");
                Ok(self.loose_source())
            }
            ClassesMode::Archived => {
                info!("Copying classes as a jar");
                let unprefixed = ContentSource::directory(CLASSES_SOURCE_NAME, &self.directory);
                let entries = resolver.collect(&unprefixed)?.unwrap_or_default();
                writer
                    .write(&self.jar_path, &entries)
                    .map_err(|e| intermediate_failed(&self.jar_path, e))?;
                Ok(ContentSource::file(CLASSES_SOURCE_NAME, &self.jar_path).with_prefix(LIB_PREFIX))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::archive::ZipArchiveWriter;
    use crate::domain::SourceRoot;
    use crate::error::PackagerError;
    use std::fs;

    fn compiled(root: &std::path::Path, mode: ClassesMode) -> CompiledOutput {
        CompiledOutput {
            directory: root.join("classes"),
            mode,
            jar_path: root.join("target/plugin.jar"),
        }
    }

    #[test]
    fn test_loose_mode_uses_classes_prefix() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("classes")).unwrap();

        let source = compiled(temp.path(), ClassesMode::Loose)
            .prepare(&LayerResolver::new(), &ZipArchiveWriter::default())
            .unwrap();

        assert_eq!(source.prefix, CLASSES_PREFIX);
        assert!(matches!(source.root, SourceRoot::Directory(_)));
    }

    #[test]
    fn test_archived_mode_writes_jar() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("classes/org/acme")).unwrap();
        fs::write(temp.path().join("classes/org/acme/Foo.class"), "foo").unwrap();

        let output = compiled(temp.path(), ClassesMode::Archived);
        let source = output
            .prepare(&LayerResolver::new(), &ZipArchiveWriter::default())
            .unwrap();

        assert_eq!(source.prefix, LIB_PREFIX);
        assert_eq!(source.root, SourceRoot::File(output.jar_path.clone()));
        let archive = zip::ZipArchive::new(fs::File::open(&output.jar_path).unwrap()).unwrap();
        assert_eq!(
            archive.file_names().collect::<Vec<_>>(),
            vec!["org/acme/Foo.class"]
        );
    }

    #[test]
    fn test_archived_mode_missing_directory_writes_nothing() {
        let temp = tempfile::TempDir::new().unwrap();
        let output = compiled(temp.path(), ClassesMode::Archived);

        let source = output
            .prepare(&LayerResolver::new(), &ZipArchiveWriter::default())
            .unwrap();

        assert!(!output.jar_path.exists());
        assert!(!source.root.exists());
    }

    #[test]
    fn test_missing_directory_is_reported_once_by_the_resolver() {
        let temp = tempfile::TempDir::new().unwrap();
        let resolver = LayerResolver::new();

        for mode in [ClassesMode::Loose, ClassesMode::Archived] {
            let source = compiled(temp.path(), mode)
                .prepare(&resolver, &ZipArchiveWriter::default())
                .unwrap();
            let merged = resolver.merge(&[source]).unwrap();

            assert_eq!(merged.warnings.len(), 1);
            assert!(merged.warnings[0].contains("does not exist, skipping classes"));
            assert!(merged.applied.is_empty());
        }
    }

    #[test]
    fn test_archived_mode_write_failure_is_fatal() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("classes")).unwrap();
        fs::write(temp.path().join("classes/Foo.class"), "foo").unwrap();
        // A file where the jar's parent directory should be
        fs::write(temp.path().join("target"), "not a directory").unwrap();

        let result = compiled(temp.path(), ClassesMode::Archived)
            .prepare(&LayerResolver::new(), &ZipArchiveWriter::default());

        assert!(matches!(
            result,
            Err(PackagerError::IntermediateArchiveFailed { .. })
        ));
    }
}
