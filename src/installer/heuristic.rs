//! Data-text archive detection
//!
//! A data-text archive has, at its top level, exactly one directory named
//! like the game's data folder plus some `txt`/`pdf` documents, and nothing else.

use crate::tree::{path, FileTree};
use crate::types::EntryId;

/// Suffixes of loose documents tolerated next to the data folder
pub const DOCUMENT_SUFFIXES: &[&str] = &["txt", "pdf"];

/// Whether `dir` is a data-text top layer for `data_dir_name`.
///
/// Requires both the data folder and at least one document. A directory
/// holding only the data folder is left to the checker.
pub fn is_data_text_top_layer(tree: &FileTree, dir: EntryId, data_dir_name: &str) -> bool {
    let mut data_found = false;
    let mut text_found = false;

    for (_, entry) in tree.child_entries(dir) {
        if entry.is_dir() {
            if data_found || !entry.is_named(data_dir_name) {
                return false;
            }
            data_found = true;
        } else {
            if !path::has_suffix_in(entry.name(), DOCUMENT_SUFFIXES) {
                return false;
            }
            text_found = true;
        }
    }

    data_found && text_found
}
