//! Mod data checkers
//!
//! A [`DataChecker`] judges whether a directory already matches the data
//! layout a game expects. It is the single per-game substitution point used by
//! the installer; everything else about the game is plain data.

use crate::error::TreeError;
use crate::tree::{path, FileTree};
use crate::types::EntryId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of [`DataChecker::classify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckReturn {
    Invalid,
    /// Invalid as is, but [`DataChecker::fix`] can repair it
    Fixable,
    Valid,
}

/// Per-game judge of mod data layout.
///
/// `classify` must be pure: calling it twice on the same tree state yields the
/// same answer. `fix` is only ever called on directories classified `Fixable`.
pub trait DataChecker: Send + Sync {
    fn classify(&self, tree: &FileTree, dir: EntryId) -> CheckReturn;

    /// Repair a `Fixable` directory and return the directory holding the result.
    fn fix(&self, tree: &mut FileTree, dir: EntryId) -> Result<EntryId, TreeError>;
}

/// Checker for games without layout rules: any non-empty directory is valid.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonEmptyChecker;

impl DataChecker for NonEmptyChecker {
    fn classify(&self, tree: &FileTree, dir: EntryId) -> CheckReturn {
        if tree.is_empty(dir) {
            CheckReturn::Invalid
        } else {
            CheckReturn::Valid
        }
    }

    fn fix(&self, _tree: &mut FileTree, dir: EntryId) -> Result<EntryId, TreeError> {
        Ok(dir)
    }
}

/// Names that may appear at the top of a game's data directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRules {
    /// Directory names found at the data root (e.g. `meshes`, `textures`)
    #[serde(default)]
    pub folders: Vec<String>,
    /// File suffixes found at the data root (e.g. `esp`, `bsa`)
    #[serde(default)]
    pub extensions: Vec<String>,
    /// File suffixes that are tolerated but removed by `fix`
    #[serde(default)]
    pub strippable: Vec<String>,
}

impl Default for LayoutRules {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        Self {
            folders: owned(&[
                "meshes",
                "textures",
                "scripts",
                "interface",
                "sound",
                "music",
                "strings",
                "video",
                "seq",
                "shadersfx",
                "skse",
            ]),
            extensions: owned(&["esp", "esm", "esl", "bsa", "ba2", "ini"]),
            strippable: owned(&["txt", "pdf", "md"]),
        }
    }
}

/// Checker driven by [`LayoutRules`]
#[derive(Debug, Clone, Default)]
pub struct LayoutChecker {
    rules: LayoutRules,
}

impl LayoutChecker {
    pub fn new(rules: LayoutRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &LayoutRules {
        &self.rules
    }

    fn is_known_folder(&self, name: &str) -> bool {
        self.rules
            .folders
            .iter()
            .any(|folder| path::names_equal(name, folder))
    }
}

impl DataChecker for LayoutChecker {
    fn classify(&self, tree: &FileTree, dir: EntryId) -> CheckReturn {
        let mut hits = 0usize;
        let mut strippable = 0usize;

        for (_, entry) in tree.child_entries(dir) {
            if entry.is_dir() {
                if !self.is_known_folder(entry.name()) {
                    return CheckReturn::Invalid;
                }
                hits += 1;
            } else if path::has_suffix_in(entry.name(), &self.rules.extensions) {
                hits += 1;
            } else if path::has_suffix_in(entry.name(), &self.rules.strippable) {
                strippable += 1;
            } else {
                return CheckReturn::Invalid;
            }
        }

        match (hits, strippable) {
            (0, _) => CheckReturn::Invalid,
            (_, 0) => CheckReturn::Valid,
            _ => CheckReturn::Fixable,
        }
    }

    fn fix(&self, tree: &mut FileTree, dir: EntryId) -> Result<EntryId, TreeError> {
        let doomed: Vec<EntryId> = tree
            .child_entries(dir)
            .filter(|(_, entry)| {
                entry.is_file() && path::has_suffix_in(entry.name(), &self.rules.strippable)
            })
            .map(|(id, _)| id)
            .collect();
        for id in &doomed {
            tree.detach(*id)?;
        }
        debug!(removed = doomed.len(), "Stripped loose files from data root");
        Ok(dir)
    }
}
