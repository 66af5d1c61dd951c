//! Archive writing primitive
//!
//! Both the intermediate classes jar and the final archive go through the same
//! [`ArchiveWriter`], so they share entry ordering and error semantics.

mod zip_writer;

use std::io;
use std::path::Path;

use crate::domain::ArchiveEntry;

pub use self::zip_writer::ZipArchiveWriter;

/// Serializes an ordered entry list into a single container file
pub trait ArchiveWriter {
    /// Write `entries`, in order, to a new container at `destination`.
    ///
    /// On error, nothing is left at `destination`.
    fn write(&self, destination: &Path, entries: &[ArchiveEntry]) -> io::Result<()>;
}

/// Reject entry paths that could escape the archive root or collide with directories
pub fn validate_entry_path(path: &str) -> io::Result<()> {
    let invalid = |reason: &str| {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid entry path '{path}': {reason}"),
        ))
    };

    if path.is_empty() {
        return invalid("empty");
    }
    if path.starts_with('/') || path.contains('\\') {
        return invalid("must be relative and '/'-separated");
    }
    if path
        .split('/')
        .any(|component| component.is_empty() || component == "." || component == "..")
    {
        return invalid("contains an empty, '.' or '..' component");
    }
    Ok(())
}
