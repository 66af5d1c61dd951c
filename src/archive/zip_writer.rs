//! Zip/jar container writer

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::domain::ArchiveEntry;

use super::{ArchiveWriter, validate_entry_path};

/// Mode of the produced container file, and of each entry inside it
const ARCHIVE_FILE_MODE: u32 = 0o644;

/// Writes reproducible zip containers.
///
/// Every entry gets the same timestamp (1980-01-01) and permissions, so identical entry lists
/// produce identical bytes. Output goes to a temporary file next to the destination and is
/// renamed into place only once the container is complete.
#[derive(Debug, Clone, Copy)]
pub struct ZipArchiveWriter {
    compression: CompressionMethod,
}

impl Default for ZipArchiveWriter {
    fn default() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }
}

impl ZipArchiveWriter {
    pub fn stored() -> Self {
        Self {
            compression: CompressionMethod::Stored,
        }
    }

    fn options(&self) -> SimpleFileOptions {
        SimpleFileOptions::default()
            .compression_method(self.compression)
            .last_modified_time(DateTime::default())
            .unix_permissions(ARCHIVE_FILE_MODE)
    }

    fn write_entries<W>(&self, writer: W, entries: &[ArchiveEntry]) -> io::Result<W>
    where
        W: Write + io::Seek,
    {
        let mut zip = ZipWriter::new(writer);
        for entry in entries {
            zip.start_file(entry.path.as_str(), self.options())
                .map_err(io::Error::other)?;
            let mut reader = entry.content.open().map_err(|e| {
                io::Error::new(e.kind(), format!("{} ({}): {e}", entry.path, entry.origin))
            })?;
            io::copy(&mut reader, &mut zip)?;
        }
        zip.finish().map_err(io::Error::other)
    }
}

impl ArchiveWriter for ZipArchiveWriter {
    fn write(&self, destination: &Path, entries: &[ArchiveEntry]) -> io::Result<()> {
        for entry in entries {
            validate_entry_path(&entry.path)?;
        }

        let parent = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        let mut out = self.write_entries(BufWriter::new(temp.as_file()), entries)?;
        out.flush()?;
        drop(out);

        set_archive_permissions(temp.as_file())?;
        temp.persist(destination).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Temp files are created owner-only; a finished archive is world-readable
#[cfg(unix)]
fn set_archive_permissions(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(ARCHIVE_FILE_MODE))
}

#[cfg(not(unix))]
fn set_archive_permissions(_file: &fs::File) -> io::Result<()> {
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::{EntryContent, EntryOrigin};
    use std::io::Read;

    fn bytes_entry(path: &str, content: &str) -> ArchiveEntry {
        ArchiveEntry {
            path: path.to_string(),
            content: EntryContent::Bytes(content.as_bytes().to_vec()),
            origin: EntryOrigin::Source("test".to_string()),
        }
    }

    fn read_names(path: &Path) -> Vec<String> {
        let archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
        archive.file_names().map(String::from).collect::<Vec<_>>()
    }

    #[test]
    fn test_writes_entries_in_order() {
        let temp = tempfile::TempDir::new().unwrap();
        let destination = temp.path().join("out/plugin.zip");
        let entries = vec![
            bytes_entry("mule-config.xml", "<mule/>"),
            bytes_entry("classes/Foo.class", "cafebabe"),
            bytes_entry("lib/lib1-1.0.jar", "jar"),
        ];

        ZipArchiveWriter::default()
            .write(&destination, &entries)
            .unwrap();

        let mut archive = zip::ZipArchive::new(fs::File::open(&destination).unwrap()).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["mule-config.xml", "classes/Foo.class", "lib/lib1-1.0.jar"]
        );

        let mut content = String::new();
        archive
            .by_name("mule-config.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "<mule/>");
    }

    #[test]
    fn test_output_is_reproducible() {
        let temp = tempfile::TempDir::new().unwrap();
        let entries = vec![bytes_entry("a.txt", "a"), bytes_entry("b/c.txt", "c")];

        let first = temp.path().join("first.zip");
        let second = temp.path().join("second.zip");
        ZipArchiveWriter::default().write(&first, &entries).unwrap();
        ZipArchiveWriter::default().write(&second, &entries).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_stored_writer() {
        let temp = tempfile::TempDir::new().unwrap();
        let destination = temp.path().join("classes.jar");
        ZipArchiveWriter::stored()
            .write(&destination, &[bytes_entry("Foo.class", "x")])
            .unwrap();
        assert_eq!(read_names(&destination), vec!["Foo.class"]);
    }

    #[test]
    fn test_missing_entry_source_leaves_nothing_behind() {
        let temp = tempfile::TempDir::new().unwrap();
        let destination = temp.path().join("plugin.zip");
        let entries = vec![
            bytes_entry("a.txt", "a"),
            ArchiveEntry {
                path: "lib/missing.jar".to_string(),
                content: EntryContent::File(temp.path().join("missing.jar")),
                origin: EntryOrigin::Source("test".to_string()),
            },
        ];

        let result = ZipArchiveWriter::default().write(&destination, &entries);

        assert!(result.is_err());
        assert!(!destination.exists());
        let leftovers: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_output_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::TempDir::new().unwrap();
        let destination = temp.path().join("out/plugin.zip");
        ZipArchiveWriter::default()
            .write(&destination, &[bytes_entry("a.txt", "a")])
            .unwrap();

        let mode = fs::metadata(&destination).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let temp = tempfile::TempDir::new().unwrap();
        let destination = temp.path().join("plugin.zip");
        let result =
            ZipArchiveWriter::default().write(&destination, &[bytes_entry("../evil", "x")]);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidInput);
        assert!(!destination.exists());
    }
}
