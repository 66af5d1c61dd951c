//! Content source and artifact errors

use std::path::Path;

use super::PackagerError;

/// Creates a source read failed error
pub fn read_failed(path: &Path, reason: impl ToString) -> PackagerError {
    PackagerError::SourceReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an artifact read failed error
pub fn artifact_read_failed(
    artifact: impl Into<String>,
    path: &Path,
    reason: impl ToString,
) -> PackagerError {
    PackagerError::ArtifactReadFailed {
        artifact: artifact.into(),
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
