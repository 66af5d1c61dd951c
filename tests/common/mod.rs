//! Common test utilities for Plugpack integration tests

#![allow(dead_code)]

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A throwaway module project for integration tests
pub struct TestProject {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create a new empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        self.write_bytes(path, content.as_bytes());
    }

    /// Write a binary file in the project
    pub fn write_bytes(&self, path: &str, content: &[u8]) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Write `plugpack.yaml`
    pub fn write_config(&self, yaml: &str) {
        self.write_file("plugpack.yaml", yaml);
    }

    /// Stand-in for a resolved dependency file under `repo/`
    pub fn fake_jar(&self, file_name: &str) -> String {
        let relative = format!("repo/{file_name}");
        self.write_bytes(&relative, format!("jar:{file_name}").as_bytes());
        relative
    }

    /// Absolute path of a project file
    pub fn file(&self, path: &str) -> PathBuf {
        self.path.join(path)
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }
}

/// Entry names of a zip archive, in stored order
pub fn archive_names(path: &Path) -> Vec<String> {
    let file = File::open(path).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Failed to read archive");
    (0..archive.len())
        .map(|i| {
            archive
                .by_index(i)
                .expect("Failed to read entry")
                .name()
                .to_string()
        })
        .collect()
}

/// Content of one archive entry
pub fn archive_entry(path: &Path, name: &str) -> Vec<u8> {
    let file = File::open(path).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Failed to read archive");
    let mut entry = archive.by_name(name).expect("Entry not found");
    let mut content = Vec::new();
    entry
        .read_to_end(&mut content)
        .expect("Failed to read entry");
    content
}

/// Content of one archive entry as text
pub fn archive_text(path: &Path, name: &str) -> String {
    String::from_utf8(archive_entry(path, name)).expect("Entry is not UTF-8")
}

/// Nested archive (e.g. the classes jar under lib/) extracted to `into`
pub fn extract_entry(path: &Path, name: &str, into: &Path) -> PathBuf {
    let target = into.join(name.replace('/', "_"));
    std::fs::write(&target, archive_entry(path, name)).expect("Failed to extract entry");
    target
}
