//! Archive creation errors

use std::path::Path;

use super::PackagerError;

/// Creates an intermediate (classes jar) archive error
pub fn intermediate_failed(path: &Path, reason: impl ToString) -> PackagerError {
    PackagerError::IntermediateArchiveFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a final archive error
pub fn final_failed(path: &Path, reason: impl ToString) -> PackagerError {
    PackagerError::FinalArchiveFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a report write error
pub fn report_write_failed(path: &Path, reason: impl ToString) -> PackagerError {
    PackagerError::ReportWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> PackagerError {
    PackagerError::IoError {
        message: message.into(),
    }
}
