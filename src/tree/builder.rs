//! Tree builder for turning extracted archives into FileTrees

use crate::error::{ScanError, TreeError};
use crate::tree::hasher;
use crate::tree::path;
use crate::tree::walker::{WalkEntry, Walker, WalkerConfig};
use crate::tree::{FileMeta, FileTree};
use crate::types::EntryId;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace, warn};

/// Builds a FileTree from a directory holding an extracted archive
pub struct TreeBuilder {
    root: PathBuf,
    walker_config: Option<WalkerConfig>,
    hash_contents: bool,
}

impl TreeBuilder {
    /// Create a new tree builder for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            walker_config: None,
            hash_contents: false,
        }
    }

    /// Set walker config (ignore patterns, etc.). When set, the walker uses this config
    /// instead of the default.
    pub fn with_walker_config(mut self, config: WalkerConfig) -> Self {
        self.walker_config = Some(config);
        self
    }

    /// Hash file contents with BLAKE3 while building
    pub fn with_content_hashing(mut self, enabled: bool) -> Self {
        self.hash_contents = enabled;
        self
    }

    /// Build the tree from the filesystem
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn build(&self) -> Result<FileTree, ScanError> {
        let start = Instant::now();

        let root = path::canonicalize_root(&self.root)?;
        if !root.is_dir() {
            return Err(ScanError::InvalidPath(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let walker = match &self.walker_config {
            Some(config) => Walker::with_config(root.clone(), config.clone()),
            None => Walker::new(root.clone()),
        };
        let entries = match walker.walk() {
            Ok(e) => {
                debug!(entry_count = e.len(), "Walked extracted archive");
                e
            }
            Err(e) => {
                error!("Filesystem walk failed: {}", e);
                return Err(e);
            }
        };

        let mut tree = FileTree::new();
        let tree_root = tree.root();
        let mut dropped = 0usize;

        // Entries are sorted, so parents are always created before their children
        for entry in entries {
            let names = components(entry.path())?;
            let Some((name, parents)) = names.split_last() else {
                continue;
            };
            let Some(parent) = resolve_parent(&tree, tree_root, parents) else {
                trace!(path = %entry.path().display(), "Parent was dropped, skipping entry");
                dropped += 1;
                continue;
            };
            let added = match entry {
                WalkEntry::Directory { .. } => tree.add_directory(parent, name),
                WalkEntry::File { path, size } => {
                    let meta = self.file_meta(&root, &path, size)?;
                    tree.add_file(parent, name, meta)
                }
            };
            match added {
                Ok(_) => {}
                Err(TreeError::AlreadyExists(kept)) => {
                    warn!(
                        kept = %kept,
                        dropped = %names.join("/"),
                        "Name collision in extracted archive, keeping first entry"
                    );
                    dropped += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }

        info!(
            files = tree.file_count(tree_root),
            dropped,
            duration_ms = start.elapsed().as_millis(),
            "Tree build completed"
        );

        Ok(tree)
    }

    fn file_meta(&self, root: &Path, path: &Path, size: u64) -> Result<FileMeta, ScanError> {
        let source = root.join(path);
        let content_hash = if self.hash_contents {
            trace!(path = %path.display(), "Hashing file");
            let content = std::fs::read(&source).map_err(|e| {
                ScanError::IoError(std::io::Error::new(
                    e.kind(),
                    format!("Failed to read file {:?}: {}", source, e),
                ))
            })?;
            Some(hasher::compute_content_hash(&content))
        } else {
            None
        };
        Ok(FileMeta {
            size,
            content_hash,
            source: Some(source),
        })
    }
}

/// Names of the components of a walked path, one per directory level
fn components(path: &Path) -> Result<Vec<String>, ScanError> {
    let mut names = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(name) => names.push(name.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => {
                return Err(ScanError::InvalidPath(format!(
                    "Unexpected path component in {:?}",
                    path
                )))
            }
        }
    }
    Ok(names)
}

/// Directory holding the entry, or `None` when an ancestor lost a name collision
fn resolve_parent(tree: &FileTree, root: EntryId, parents: &[String]) -> Option<EntryId> {
    let mut current = root;
    for name in parents {
        current = tree.find(current, name)?;
        if !tree.entry(current)?.is_dir() {
            return None;
        }
    }
    Some(current)
}

/// Build a tree from an archive listing such as the entry names of a zip file.
///
/// Names ending in `/` or `\` are directories; every other name is a file.
/// Both separators are accepted. Duplicate directory names are folded together.
pub fn from_listing<I, S>(listing: I) -> Result<FileTree, TreeError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tree = FileTree::new();
    let root = tree.root();
    for item in listing {
        let name = item.as_ref();
        if name.ends_with('/') || name.ends_with('\\') {
            tree.add_directory_path(root, name)?;
        } else {
            tree.add_file_path(root, name, FileMeta::default())?;
        }
    }
    Ok(tree)
}
