//! Configuration errors

use super::PackagerError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> PackagerError {
    PackagerError::ConfigNotFound { path: path.into() }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> PackagerError {
    PackagerError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> PackagerError {
    PackagerError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> PackagerError {
    PackagerError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid selector error
pub fn invalid_selector(selector: impl Into<String>, reason: impl Into<String>) -> PackagerError {
    PackagerError::InvalidSelector {
        selector: selector.into(),
        reason: reason.into(),
    }
}

/// Creates a conflicting options error
pub fn conflicting_options(message: impl Into<String>) -> PackagerError {
    PackagerError::ConflictingOptions {
        message: message.into(),
    }
}
