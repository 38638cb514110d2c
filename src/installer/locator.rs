//! Archive base location
//!
//! Walks down through single-directory wrapper folders until it reaches a
//! directory the game checker accepts or a data-text top layer.

use crate::checker::{CheckReturn, DataChecker};
use crate::installer::heuristic::is_data_text_top_layer;
use crate::tree::FileTree;
use crate::types::EntryId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Why a directory was accepted as the archive base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Acceptance {
    /// The checker classified the directory `Valid`
    Valid,
    /// Data folder plus loose documents; needs normalization
    DataTextLayer,
}

/// A located archive base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Located {
    pub base: EntryId,
    pub acceptance: Acceptance,
    /// Number of wrapper folders unwrapped to reach `base`
    pub depth: usize,
}

/// Find the directory to install from, or `None` when the archive is not recognized.
///
/// A missing checker makes every archive unsupported.
pub fn locate_archive_base<C: DataChecker + ?Sized>(
    tree: &FileTree,
    start: EntryId,
    data_dir_name: &str,
    checker: Option<&C>,
) -> Option<EntryId> {
    locate(tree, start, data_dir_name, checker).map(|located| located.base)
}

/// Same as [`locate_archive_base`], also reporting how the base was accepted
pub fn locate<C: DataChecker + ?Sized>(
    tree: &FileTree,
    start: EntryId,
    data_dir_name: &str,
    checker: Option<&C>,
) -> Option<Located> {
    let Some(checker) = checker else {
        debug!("No data checker available, archive unsupported");
        return None;
    };

    let mut current = start;
    let mut depth = 0usize;
    loop {
        tree.entry(current).filter(|entry| entry.is_dir())?;

        if checker.classify(tree, current) == CheckReturn::Valid {
            debug!(depth, path = %tree.path_of(current), "Archive base is valid data");
            return Some(Located {
                base: current,
                acceptance: Acceptance::Valid,
                depth,
            });
        }

        if is_data_text_top_layer(tree, current, data_dir_name) {
            debug!(depth, path = %tree.path_of(current), "Archive base is a data-text layer");
            return Some(Located {
                base: current,
                acceptance: Acceptance::DataTextLayer,
                depth,
            });
        }

        match tree.children(current) {
            [only] if tree.entry(*only).is_some_and(|entry| entry.is_dir()) => {
                debug!(depth, wrapper = %tree.path_of(*only), "Unwrapping single folder");
                current = *only;
                depth += 1;
            }
            _ => {
                debug!(depth, path = %tree.path_of(current), "No installable base found");
                return None;
            }
        }
    }
}
