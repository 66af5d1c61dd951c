//! BLAKE3 digests of produced archives

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use blake3::Hasher;

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

/// Calculate BLAKE3 hash of a file
pub fn hash_file(path: &Path) -> io::Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_hash_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("plugin.zip");
        std::fs::write(&file_path, "test content").unwrap();

        let hash = hash_file(&file_path).unwrap();
        assert!(hash.starts_with(HASH_PREFIX));
        assert_eq!(hash, hash_file(&file_path).unwrap());
    }

    #[test]
    fn test_hash_file_differs_by_content() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a"), "aaa").unwrap();
        std::fs::write(temp.path().join("b"), "bbb").unwrap();

        assert_ne!(
            hash_file(&temp.path().join("a")).unwrap(),
            hash_file(&temp.path().join("b")).unwrap()
        );
    }

    #[test]
    fn test_hash_file_not_found() {
        let result = hash_file(Path::new("/nonexistent/file.zip"));
        assert!(result.is_err());
    }
}
