//! Properties of FileTree merge, normalization and compaction

use modroot::installer::{normalize, NormalizeOptions};
use modroot::tree::builder::from_listing;
use modroot::tree::{hasher, FileMeta, FileTree};
use proptest::prelude::*;
use std::collections::BTreeSet;

/// Relative file paths over a tiny alphabet so that collisions are common.
/// Directory names carry no dot and file names always end in `.esp`, so a
/// file never collides with a directory.
fn file_paths() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-c]{1,2}(/[a-c]{1,2}){0,2}", 0..12)
        .prop_map(|paths| paths.into_iter().map(|p| format!("{}.esp", p)).collect())
}

proptest! {
    #[test]
    fn merge_keeps_destination_and_moves_the_rest(
        dest_files in file_paths(),
        src_files in file_paths(),
    ) {
        let mut tree = FileTree::new();
        let root = tree.root();
        let dest = tree.add_directory(root, "dest").unwrap();
        let src = tree.add_directory(root, "src").unwrap();
        for path in &dest_files {
            tree.add_file_path(dest, path, FileMeta::with_content(b"dest")).unwrap();
        }
        for path in &src_files {
            tree.add_file_path(src, path, FileMeta::with_content(b"src")).unwrap();
        }

        tree.merge(dest, src).unwrap();

        prop_assert!(tree.is_empty(src));
        let merged: BTreeSet<String> = tree.files(dest).into_iter().map(|(p, _)| p).collect();
        let expected: BTreeSet<String> = dest_files.union(&src_files).cloned().collect();
        prop_assert_eq!(&merged, &expected);

        for (path, meta) in tree.files(dest) {
            let origin: &[u8] = if dest_files.contains(&path) { b"dest" } else { b"src" };
            prop_assert_eq!(meta, &FileMeta::with_content(origin));
        }
    }

    #[test]
    fn paths_resolve_back_to_entries(files in file_paths()) {
        let tree = from_listing(&files).unwrap();
        let root = tree.root();
        for (path, _) in tree.files(root) {
            let id = tree.find_path(root, &path.to_uppercase()).unwrap();
            prop_assert_eq!(tree.path_of(id), path);
        }
    }

    #[test]
    fn normalize_is_idempotent(
        files in file_paths().prop_filter("data folder needs content", |f| !f.is_empty()),
        keep_documents in any::<bool>(),
    ) {
        let mut listing: Vec<String> = files.iter().map(|f| format!("Data/{}", f)).collect();
        listing.push("readme.txt".to_string());
        let mut tree = from_listing(&listing).unwrap();
        let root = tree.root();
        let options = NormalizeOptions { keep_documents };

        let data = normalize(&mut tree, root, "Data", options).unwrap();
        prop_assert_ne!(data, root);
        let before = hasher::digest(&tree, data);

        let again = normalize(&mut tree, data, "Data", options).unwrap();
        prop_assert_eq!(again, data);
        prop_assert_eq!(hasher::digest(&tree, data), before);
    }

    #[test]
    fn compaction_preserves_structure(files in file_paths()) {
        let mut listing: Vec<String> = files.iter().map(|f| format!("outer/inner/{}", f)).collect();
        listing.push("outer/inner/".to_string());
        listing.push("outer/sibling.esp".to_string());
        let mut tree = from_listing(&listing).unwrap();
        let inner = tree.find_path(tree.root(), "outer/inner").unwrap();
        let before = hasher::digest(&tree, inner);

        tree.set_root(inner).unwrap();
        let compacted = tree.compact();
        prop_assert_eq!(compacted.arena_len(), 1 + tree.walk(inner).len());
        prop_assert_eq!(hasher::digest(&compacted, compacted.root()), before);
        prop_assert_eq!(compacted.walk(compacted.root()), tree.walk(inner));
    }
}
