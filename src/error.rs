//! Error types for archive tree handling and installation.

use crate::types::EntryId;
use std::path::PathBuf;
use thiserror::Error;

/// Structural errors raised by the FileTree arena
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Entry not found: {0}")]
    EntryNotFound(EntryId),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Entry already exists: {0}")]
    AlreadyExists(String),

    #[error("Invalid entry name: {0:?}")]
    InvalidName(String),

    #[error("The root entry cannot be detached")]
    DetachRoot,

    #[error("Cannot merge {source_id} into {dest}: source contains destination")]
    CyclicMerge { dest: EntryId, source_id: EntryId },
}

/// Errors raised while turning an on-disk directory into a FileTree
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Scan I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}

/// Fatal errors for the installation of a single archive
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstallError {
    /// The tree no longer matches what the locator accepted.
    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),

    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}

/// Errors surfaced to the CLI host and configuration layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Install error: {0}")]
    Install(#[from] InstallError),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
