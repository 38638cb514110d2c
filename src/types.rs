//! Core types shared across the tree, checker and installer layers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hash: Generic 256-bit hash value
pub type Hash = [u8; 32];

/// EntryId: index of an entry inside a [`FileTree`](crate::tree::FileTree) arena.
///
/// Ids are only meaningful for the tree that produced them. Detaching an entry
/// does not invalidate its id; compaction does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
