//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, ScanError};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ApiError) -> String {
    match e {
        ApiError::PathNotFound(path) => format!("Error: no such directory: {}", path.display()),
        ApiError::Scan(ScanError::IoError(io)) => format!("Error: failed to read archive: {}", io),
        other => format!("Error: {}", other),
    }
}
