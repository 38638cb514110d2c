//! Archive entry types

use crate::tree::path;
use crate::types::{EntryId, Hash};
use std::path::PathBuf;

/// File payload description. Contents stay with the extraction collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMeta {
    pub size: u64,
    pub content_hash: Option<Hash>,
    /// Location of the extracted file, when known
    pub source: Option<PathBuf>,
}

impl FileMeta {
    pub fn with_size(size: u64) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn with_content(content: &[u8]) -> Self {
        Self {
            size: content.len() as u64,
            content_hash: Some(crate::tree::hasher::compute_content_hash(content)),
            source: None,
        }
    }
}

/// Entry kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    File(FileMeta),
    /// Children in insertion order
    Directory { children: Vec<EntryId> },
}

/// A single file or directory in the arena
#[derive(Debug, Clone)]
pub struct Entry {
    pub(crate) name: String,
    pub(crate) kind: EntryKind,
    pub(crate) parent: Option<EntryId>,
}

impl Entry {
    pub(crate) fn directory(name: String, parent: Option<EntryId>) -> Self {
        Self {
            name,
            kind: EntryKind::Directory {
                children: Vec::new(),
            },
            parent,
        }
    }

    pub(crate) fn file(name: String, meta: FileMeta, parent: Option<EntryId>) -> Self {
        Self {
            name,
            kind: EntryKind::File(meta),
            parent,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extension after the last `.`, compare with [`path::names_equal`].
    pub fn suffix(&self) -> &str {
        path::suffix(&self.name)
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<EntryId> {
        self.parent
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File(_))
    }

    pub fn file_meta(&self) -> Option<&FileMeta> {
        match &self.kind {
            EntryKind::File(meta) => Some(meta),
            EntryKind::Directory { .. } => None,
        }
    }

    /// Case-insensitive name comparison
    pub fn is_named(&self, name: &str) -> bool {
        path::names_equal(&self.name, name)
    }

    pub(crate) fn children(&self) -> &[EntryId] {
        match &self.kind {
            EntryKind::Directory { children } => children,
            EntryKind::File(_) => &[],
        }
    }
}
