//! Structural digests for archive trees using BLAKE3

use crate::tree::path;
use crate::tree::{EntryKind, FileTree};
use crate::types::{EntryId, Hash};
use blake3::Hasher;

/// Compute the digest of a file entry
///
/// Digest = hash("file" || name_len || name || size || content_hash?)
pub fn compute_file_digest(name: &str, size: u64, content_hash: Option<&Hash>) -> Hash {
    let mut hasher = Hasher::new();

    hasher.update(b"file");
    hasher.update(&(name.len() as u64).to_be_bytes());
    hasher.update(name.as_bytes());
    hasher.update(&size.to_be_bytes());
    match content_hash {
        Some(hash) => {
            hasher.update(&[1]);
            hasher.update(hash);
        }
        None => {
            hasher.update(&[0]);
        }
    }

    *hasher.finalize().as_bytes()
}

/// Compute the digest of a directory from its children
///
/// Digest = hash("directory" || children_count || (name ":" digest)*)
///
/// Children must be sorted by folded name for determinism.
pub fn compute_directory_digest(children: &[(String, Hash)]) -> Hash {
    let mut hasher = Hasher::new();

    hasher.update(b"directory");
    hasher.update(&(children.len() as u64).to_be_bytes());
    for (name, digest) in children {
        hasher.update(&(name.len() as u64).to_be_bytes());
        hasher.update(name.as_bytes());
        hasher.update(b":");
        hasher.update(digest);
    }

    *hasher.finalize().as_bytes()
}

/// Digest of the subtree under `id`.
///
/// The directory's own name is not included, so a subtree and its promoted
/// copy hash the same. Child order does not matter; name case does.
pub fn digest(tree: &FileTree, id: EntryId) -> Hash {
    let Some(entry) = tree.entry(id) else {
        return compute_directory_digest(&[]);
    };
    match entry.kind() {
        EntryKind::File(meta) => {
            compute_file_digest(entry.name(), meta.size, meta.content_hash.as_ref())
        }
        EntryKind::Directory { children } => {
            let mut hashed: Vec<(String, Hash)> = children
                .iter()
                .filter_map(|child| {
                    let child_entry = tree.entry(*child)?;
                    let name = child_entry.name().to_string();
                    Some((name, digest(tree, *child)))
                })
                .collect();
            hashed.sort_by(|a, b| {
                path::fold_name(&a.0)
                    .cmp(&path::fold_name(&b.0))
                    .then_with(|| a.0.cmp(&b.0))
            });
            compute_directory_digest(&hashed)
        }
    }
}

/// Compute content hash for file bytes
pub fn compute_content_hash(content: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(content);
    *hasher.finalize().as_bytes()
}
