//! Archive entries and their origins

use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::artifact::ArtifactId;

/// Where the bytes of an entry come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    /// Read from a file when the archive is written
    File(PathBuf),
    /// Held in memory (e.g. filtered resources)
    Bytes(Vec<u8>),
}

impl EntryContent {
    /// Open a reader over the content
    pub fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        match self {
            Self::File(path) => Ok(Box::new(File::open(path)?)),
            Self::Bytes(bytes) => Ok(Box::new(Cursor::new(bytes.as_slice()))),
        }
    }

    /// Fail early when file-backed content is not a readable regular file
    pub fn check_readable(&self) -> io::Result<()> {
        match self {
            Self::File(path) => {
                let metadata = std::fs::metadata(path)?;
                if metadata.is_file() {
                    Ok(())
                } else {
                    Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "not a regular file",
                    ))
                }
            }
            Self::Bytes(_) => Ok(()),
        }
    }
}

/// The owner of an archive entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum EntryOrigin {
    /// A named content source
    Source(String),
    /// A dependency artifact
    Artifact(ArtifactId),
}

impl fmt::Display for EntryOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source(name) => write!(f, "source '{name}'"),
            Self::Artifact(id) => write!(f, "artifact {id}"),
        }
    }
}

/// One file in the output archive
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Target path inside the archive, `/`-separated
    pub path: String,
    pub content: EntryContent,
    pub origin: EntryOrigin,
}

/// A path produced by two origins; only `replaced_by` survives in the archive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collision {
    pub path: String,
    pub replaced: EntryOrigin,
    pub replaced_by: EntryOrigin,
}
