//! Promotion of the data folder of a data-text archive to the install root

use crate::error::InstallError;
use crate::installer::heuristic::is_data_text_top_layer;
use crate::tree::FileTree;
use crate::types::EntryId;
use tracing::{debug, warn};

/// Normalization settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Merge the loose documents into the data folder instead of dropping them
    pub keep_documents: bool,
}

/// Return the directory that should become the install root for `base`.
///
/// A data-text layer is replaced by its data folder. Anything else is already
/// canonical and is returned untouched.
pub fn normalize(
    tree: &mut FileTree,
    base: EntryId,
    data_dir_name: &str,
    options: NormalizeOptions,
) -> Result<EntryId, InstallError> {
    if !is_data_text_top_layer(tree, base, data_dir_name) {
        debug!(path = %tree.path_of(base), "Archive base already canonical");
        return Ok(base);
    }
    promote_data_folder(tree, base, data_dir_name, options)
}

/// Detach the data folder of `base` so it can become the new root.
///
/// The remaining entries of `base` are left behind unless `keep_documents`
/// is set, in which case they are merged into the data folder and the data
/// folder's own entries win name collisions.
pub fn promote_data_folder(
    tree: &mut FileTree,
    base: EntryId,
    data_dir_name: &str,
    options: NormalizeOptions,
) -> Result<EntryId, InstallError> {
    let data = tree
        .find(base, data_dir_name)
        .filter(|id| tree.entry(*id).is_some_and(|entry| entry.is_dir()))
        .ok_or_else(|| {
            let message = format!(
                "data folder {:?} vanished from {:?}",
                data_dir_name,
                tree.path_of(base)
            );
            warn!("{}", message);
            InstallError::InternalInconsistency(message)
        })?;

    tree.detach(data)?;

    if options.keep_documents {
        let stats = tree.merge(data, base)?;
        debug!(
            moved = stats.moved,
            dropped = stats.dropped,
            "Merged loose documents into data folder"
        );
    } else {
        debug!(
            dropped = tree.len(base),
            "Dropping loose documents next to data folder"
        );
    }

    Ok(data)
}
