//! Filesystem walker for extracted archive directories

use crate::error::ScanError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Filesystem entry types, with paths relative to the walk root
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEntry {
    /// A file entry with its path and size
    File { path: PathBuf, size: u64 },
    /// A directory entry with its path
    Directory { path: PathBuf },
}

impl WalkEntry {
    pub fn path(&self) -> &Path {
        match self {
            WalkEntry::File { path, .. } | WalkEntry::Directory { path } => path,
        }
    }
}

/// Filesystem walker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Whether to follow symbolic links (default: false)
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Entry names to skip, matched case-insensitively per path component
    #[serde(default = "default_ignore_patterns")]
    pub ignore_patterns: Vec<String>,
    /// Maximum depth to traverse (None = unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_ignore_patterns() -> Vec<String> {
    vec![
        "__MACOSX".to_string(),
        ".DS_Store".to_string(),
        "Thumbs.db".to_string(),
    ]
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: false,
            ignore_patterns: default_ignore_patterns(),
            max_depth: None,
        }
    }
}

/// Filesystem walker
pub struct Walker {
    root: PathBuf,
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    /// Create a walker with custom configuration
    pub fn with_config(root: PathBuf, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Walk the filesystem and collect all entries below the root
    ///
    /// Returns entries sorted by relative path for determinism.
    pub fn walk(&self) -> Result<Vec<WalkEntry>, ScanError> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .max_depth(self.config.max_depth.unwrap_or(usize::MAX))
            .min_depth(1);

        let ignore = &self.config.ignore_patterns;
        for entry in walker.into_iter().filter_entry(|e| !is_ignored(e, ignore)) {
            let entry = entry.map_err(|e| {
                ScanError::IoError(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    format!("Failed to walk directory: {}", e),
                ))
            })?;

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|_| {
                    ScanError::InvalidPath(format!(
                        "{:?} is outside of {:?}",
                        entry.path(),
                        self.root
                    ))
                })?
                .to_path_buf();

            let file_type = entry.file_type();
            if file_type.is_dir() {
                entries.push(WalkEntry::Directory { path: relative });
            } else if file_type.is_file() {
                let metadata = entry.metadata().map_err(|e| {
                    ScanError::IoError(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Failed to read metadata for {:?}: {}", relative, e),
                    ))
                })?;
                entries.push(WalkEntry::File {
                    path: relative,
                    size: metadata.len(),
                });
            }
            // Unfollowed symlinks and special files are skipped
        }

        entries.sort_by(|a, b| a.path().cmp(b.path()));

        Ok(entries)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

fn is_ignored(entry: &DirEntry, patterns: &[String]) -> bool {
    let name = entry.file_name().to_string_lossy();
    patterns
        .iter()
        .any(|pattern| crate::tree::path::names_equal(&name, pattern))
}
