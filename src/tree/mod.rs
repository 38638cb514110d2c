//! Archive File Tree
//!
//! In-memory view of an extracted archive. Entries live in a single arena and
//! are addressed by [`EntryId`]; directories own the ids of their children.
//! Detaching an entry only unlinks it, so ids stay stable until [`FileTree::compact`].

pub mod builder;
pub mod hasher;
pub mod node;
pub mod path;
pub mod walker;

pub use node::{Entry, EntryKind, FileMeta};

use crate::error::TreeError;
use crate::types::EntryId;
use tracing::trace;

/// Counters reported by [`FileTree::merge`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Entries moved into the destination unchanged
    pub moved: usize,
    /// Directory collisions resolved by merging their contents
    pub merged_directories: usize,
    /// Source entries dropped because the destination already had the name
    pub dropped: usize,
}

/// Arena-backed file tree
#[derive(Debug, Clone)]
pub struct FileTree {
    entries: Vec<Entry>,
    root: EntryId,
}

impl Default for FileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileTree {
    /// Create a tree holding only an empty, nameless root directory
    pub fn new() -> Self {
        Self {
            entries: vec![Entry::directory(String::new(), None)],
            root: EntryId(0),
        }
    }

    pub fn root(&self) -> EntryId {
        self.root
    }

    pub fn entry(&self, id: EntryId) -> Option<&Entry> {
        self.entries.get(id.0)
    }

    pub fn get(&self, id: EntryId) -> Result<&Entry, TreeError> {
        self.entry(id).ok_or(TreeError::EntryNotFound(id))
    }

    /// Immediate children of a directory; empty for files and unknown ids.
    pub fn children(&self, id: EntryId) -> &[EntryId] {
        self.entry(id).map(Entry::children).unwrap_or(&[])
    }

    /// Immediate children paired with their entries
    pub fn child_entries(&self, id: EntryId) -> impl Iterator<Item = (EntryId, &Entry)> + '_ {
        self.children(id)
            .iter()
            .map(move |child| (*child, &self.entries[child.0]))
    }

    pub fn len(&self, id: EntryId) -> usize {
        self.children(id).len()
    }

    pub fn is_empty(&self, id: EntryId) -> bool {
        self.children(id).is_empty()
    }

    /// Total number of arena slots, including detached entries
    pub fn arena_len(&self) -> usize {
        self.entries.len()
    }

    fn ensure_dir(&self, id: EntryId) -> Result<(), TreeError> {
        let entry = self.get(id)?;
        if entry.is_dir() {
            Ok(())
        } else {
            Err(TreeError::NotADirectory(self.path_of(id)))
        }
    }

    /// Find an immediate child by case-insensitive name
    pub fn find(&self, dir: EntryId, name: &str) -> Option<EntryId> {
        self.children(dir)
            .iter()
            .copied()
            .find(|child| self.entries[child.0].is_named(name))
    }

    /// Find a descendant by relative path (`/` or `\` separated)
    pub fn find_path(&self, dir: EntryId, path: &str) -> Option<EntryId> {
        let mut current = dir;
        for component in path::split_path(path) {
            current = self.find(current, component)?;
        }
        Some(current)
    }

    fn push_child(&mut self, parent: EntryId, entry: Entry) -> EntryId {
        let id = EntryId(self.entries.len());
        self.entries.push(entry);
        if let EntryKind::Directory { children } = &mut self.entries[parent.0].kind {
            children.push(id);
        }
        id
    }

    /// Add a directory without the name collision check
    #[cfg(test)]
    pub(crate) fn push_unchecked_directory(&mut self, parent: EntryId, name: &str) -> EntryId {
        self.push_child(parent, Entry::directory(name.to_string(), Some(parent)))
    }

    /// Add a directory, or return the existing directory with the same name
    pub fn add_directory(&mut self, parent: EntryId, name: &str) -> Result<EntryId, TreeError> {
        path::validate_name(name)?;
        self.ensure_dir(parent)?;
        if let Some(existing) = self.find(parent, name) {
            if self.entries[existing.0].is_dir() {
                return Ok(existing);
            }
            return Err(TreeError::AlreadyExists(self.path_of(existing)));
        }
        Ok(self.push_child(parent, Entry::directory(name.to_string(), Some(parent))))
    }

    pub fn add_file(
        &mut self,
        parent: EntryId,
        name: &str,
        meta: FileMeta,
    ) -> Result<EntryId, TreeError> {
        path::validate_name(name)?;
        self.ensure_dir(parent)?;
        if let Some(existing) = self.find(parent, name) {
            return Err(TreeError::AlreadyExists(self.path_of(existing)));
        }
        Ok(self.push_child(parent, Entry::file(name.to_string(), meta, Some(parent))))
    }

    /// Add a directory chain, creating intermediate directories as needed
    pub fn add_directory_path(&mut self, parent: EntryId, path: &str) -> Result<EntryId, TreeError> {
        let mut current = parent;
        for component in path::split_path(path) {
            current = self.add_directory(current, component)?;
        }
        Ok(current)
    }

    /// Add a file at a relative path, creating intermediate directories as needed
    pub fn add_file_path(
        &mut self,
        parent: EntryId,
        path: &str,
        meta: FileMeta,
    ) -> Result<EntryId, TreeError> {
        let components: Vec<&str> = path::split_path(path).collect();
        let (file_name, dirs) = components
            .split_last()
            .ok_or_else(|| TreeError::InvalidName(path.to_string()))?;
        let mut current = parent;
        for dir in dirs {
            current = self.add_directory(current, dir)?;
        }
        self.add_file(current, file_name, meta)
    }

    fn unlink(&mut self, id: EntryId) {
        if let Some(parent) = self.entries[id.0].parent.take() {
            if let EntryKind::Directory { children } = &mut self.entries[parent.0].kind {
                children.retain(|child| *child != id);
            }
        }
    }

    fn attach(&mut self, parent: EntryId, child: EntryId) {
        self.entries[child.0].parent = Some(parent);
        if let EntryKind::Directory { children } = &mut self.entries[parent.0].kind {
            children.push(child);
        }
    }

    /// Remove an entry from its parent. The entry keeps its own subtree.
    ///
    /// Detaching an already rootless entry is a no-op.
    pub fn detach(&mut self, id: EntryId) -> Result<(), TreeError> {
        self.get(id)?;
        if id == self.root {
            return Err(TreeError::DetachRoot);
        }
        self.unlink(id);
        Ok(())
    }

    /// Move every child of `src` into `dest`.
    ///
    /// On a case-insensitive name collision the destination entry wins. Two
    /// colliding directories are merged recursively with the same rule.
    pub fn merge(&mut self, dest: EntryId, src: EntryId) -> Result<MergeStats, TreeError> {
        self.ensure_dir(dest)?;
        self.ensure_dir(src)?;
        if dest == src || self.is_ancestor(src, dest) {
            return Err(TreeError::CyclicMerge {
                dest,
                source_id: src,
            });
        }
        let mut stats = MergeStats::default();
        self.merge_into(dest, src, &mut stats);
        Ok(stats)
    }

    fn merge_into(&mut self, dest: EntryId, src: EntryId, stats: &mut MergeStats) {
        let incoming = self.children(src).to_vec();
        for child in incoming {
            self.unlink(child);
            let name = self.entries[child.0].name.clone();
            match self.find(dest, &name) {
                Some(existing)
                    if self.entries[existing.0].is_dir() && self.entries[child.0].is_dir() =>
                {
                    stats.merged_directories += 1;
                    self.merge_into(existing, child, stats);
                }
                Some(existing) => {
                    trace!(
                        kept = %self.path_of(existing),
                        dropped = %name,
                        "Merge collision, keeping destination entry"
                    );
                    stats.dropped += 1;
                }
                None => {
                    self.attach(dest, child);
                    stats.moved += 1;
                }
            }
        }
    }

    /// Promote a directory to be the root of the tree.
    ///
    /// Everything outside the new root becomes unreachable.
    pub fn set_root(&mut self, id: EntryId) -> Result<(), TreeError> {
        self.ensure_dir(id)?;
        if id != self.root {
            self.unlink(id);
            self.root = id;
        }
        Ok(())
    }

    /// Whether `ancestor` is a strict ancestor of `id`
    pub fn is_ancestor(&self, ancestor: EntryId, id: EntryId) -> bool {
        let mut current = self.entry(id).and_then(Entry::parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.entries[parent.0].parent;
        }
        false
    }

    /// Whether the entry is reachable from the root
    pub fn is_attached(&self, id: EntryId) -> bool {
        id == self.root || self.is_ancestor(self.root, id)
    }

    /// Slash-separated path from the topmost ancestor (the root for attached entries)
    pub fn path_of(&self, id: EntryId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(cur) = current {
            let Some(entry) = self.entry(cur) else { break };
            if cur == self.root {
                break;
            }
            parts.push(entry.name.as_str());
            current = entry.parent;
        }
        parts.reverse();
        parts.join("/")
    }

    /// Depth-first listing relative to `id`; directories end with `/`.
    pub fn walk(&self, id: EntryId) -> Vec<String> {
        let mut out = Vec::new();
        self.walk_into(id, "", &mut out);
        out
    }

    fn walk_into(&self, id: EntryId, prefix: &str, out: &mut Vec<String>) {
        for (child, entry) in self.child_entries(id) {
            let path = format!("{}{}", prefix, entry.name);
            if entry.is_dir() {
                out.push(format!("{}/", path));
                self.walk_into(child, &format!("{}/", path), out);
            } else {
                out.push(path);
            }
        }
    }

    /// Every file below `id` with its relative path. Files of a directory
    /// are listed before the contents of its subdirectories.
    pub fn files(&self, id: EntryId) -> Vec<(String, &FileMeta)> {
        let mut out = Vec::new();
        let mut stack = vec![(id, String::new())];
        while let Some((dir, prefix)) = stack.pop() {
            let mut subdirs = Vec::new();
            for (child, entry) in self.child_entries(dir) {
                let path = format!("{}{}", prefix, entry.name);
                match &entry.kind {
                    EntryKind::File(meta) => out.push((path, meta)),
                    EntryKind::Directory { .. } => subdirs.push((child, format!("{}/", path))),
                }
            }
            stack.extend(subdirs.into_iter().rev());
        }
        out
    }

    /// Number of files below `id`
    pub fn file_count(&self, id: EntryId) -> usize {
        self.child_entries(id)
            .map(|(child, entry)| {
                if entry.is_dir() {
                    self.file_count(child)
                } else {
                    1
                }
            })
            .sum()
    }

    /// Copy the subtree under `id` into a fresh tree rooted at a nameless directory
    pub fn subtree(&self, id: EntryId) -> Result<FileTree, TreeError> {
        self.ensure_dir(id)?;
        let mut out = FileTree::new();
        let mut stack = vec![(id, out.root)];
        while let Some((src, dst)) = stack.pop() {
            for (child, entry) in self.child_entries(src) {
                match &entry.kind {
                    EntryKind::File(meta) => {
                        out.push_child(dst, Entry::file(entry.name.clone(), meta.clone(), Some(dst)));
                    }
                    EntryKind::Directory { .. } => {
                        let copied =
                            out.push_child(dst, Entry::directory(entry.name.clone(), Some(dst)));
                        stack.push((child, copied));
                    }
                }
            }
        }
        Ok(out)
    }

    /// Drop every entry that is no longer reachable from the root
    pub fn compact(&self) -> FileTree {
        let mut tree = self
            .subtree(self.root)
            .unwrap_or_else(|_| FileTree::new());
        tree.entries[0].name = self.entries[self.root.0].name.clone();
        tree
    }
}
