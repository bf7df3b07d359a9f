//! Entry collection and conflict-aware sorting
//!
//! The collection accumulates candidate entries in insertion order, then
//! resolves duplicate paths and directory/file name collisions in one
//! finalization pass:
//!
//! 1. sort by D/F-normalized name, most recently appended first among equals
//! 2. keep the first entry of every equal-name run (last appended wins)
//! 3. re-sort by full name for the canonical serialization order
//! 4. build the normalized-name lookup index
//!
//! The two orderings genuinely differ (`a-` sorts between `a` and `a/`), so
//! the second sort is not a no-op.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::staging::entry_mode::EntryMode;
use crate::artifacts::treebuild::entry::{TreeEntry, canonical_order, df_order};
use crate::artifacts::treebuild::error::TreeBuildError;
use crate::artifacts::treebuild::path_check::verify_path;
use std::collections::HashMap;

/// Growable, insertion-ordered set of candidate tree entries
///
/// The auxiliary map from D/F-normalized name to entry position exists for
/// O(1) conflict lookups; it is populated only by [`sort_and_dedup`] and is
/// never authoritative for ordering.
///
/// [`sort_and_dedup`]: EntryCollection::sort_and_dedup
#[derive(Debug, Default)]
pub struct EntryCollection {
    entries: Vec<TreeEntry>,
    df_names: HashMap<String, usize>,
}

impl EntryCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    /// Append one candidate entry
    ///
    /// In strict mode the path is normalized and validated: directory paths
    /// lose all trailing separators and gain exactly one synthetic `/`, and
    /// the remaining segment must be a valid path segment with no internal
    /// separator. In literal mode the raw path is stored verbatim and the
    /// caller owns correctness.
    pub fn append(
        &mut self,
        mode: EntryMode,
        oid: ObjectId,
        raw_path: &str,
        literally: bool,
    ) -> anyhow::Result<()> {
        let name = if literally {
            raw_path.to_owned()
        } else {
            let segment = if mode.is_tree() {
                raw_path.trim_end_matches('/')
            } else {
                raw_path
            };

            if !verify_path(segment) {
                return Err(TreeBuildError::InvalidPath(raw_path.to_owned()).into());
            }
            if segment.contains('/') {
                return Err(TreeBuildError::PathContainsSeparator(raw_path.to_owned()).into());
            }

            if mode.is_tree() {
                format!("{segment}/")
            } else {
                segment.to_owned()
            }
        };

        let order = self.entries.len();
        self.entries.push(TreeEntry::new(mode, oid, name, order));
        Ok(())
    }

    /// Resolve conflicts and bring the collection into canonical order
    ///
    /// Afterwards the entries are strictly increasing in full-name byte order
    /// and no two of them share a D/F-normalized name. Within a run of
    /// colliding names the single most recently appended entry survives,
    /// however long the run is.
    pub fn sort_and_dedup(&mut self) {
        self.entries.sort_by(df_order);
        self.entries
            .dedup_by(|current, previous| current.df_name() == previous.df_name());

        // Sort again to order the entries for tree serialization
        self.entries.sort_by(canonical_order);

        self.df_names = self
            .entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.df_name().to_owned(), position))
            .collect();
    }

    /// Conflict-index lookup by D/F-normalized name
    ///
    /// Only meaningful after [`sort_and_dedup`](Self::sort_and_dedup).
    pub fn entry_by_df_name(&self, name: &str) -> Option<&TreeEntry> {
        self.df_names.get(name).map(|&position| &self.entries[position])
    }

    /// Drop every entry and the conflict index, keeping allocations for the
    /// next segment
    pub fn clear(&mut self) {
        self.entries.clear();
        self.df_names.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::staging::entry_mode::FileMode;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};
    use sha1::Digest;

    fn test_oid(data: &str) -> ObjectId {
        let mut hasher = sha1::Sha1::new();
        hasher.update(data);
        ObjectId::try_parse(format!("{:x}", hasher.finalize())).unwrap()
    }

    #[fixture]
    fn oid() -> ObjectId {
        test_oid("test data")
    }

    const REGULAR: EntryMode = EntryMode::File(FileMode::Regular);
    const EXECUTABLE: EntryMode = EntryMode::File(FileMode::Executable);

    fn names(collection: &EntryCollection) -> Vec<&str> {
        collection.entries().iter().map(|e| e.name()).collect()
    }

    #[rstest]
    fn append_assigns_monotonic_orders(oid: ObjectId) {
        let mut collection = EntryCollection::new();
        collection.append(REGULAR, oid.clone(), "b", false).unwrap();
        collection.append(REGULAR, oid.clone(), "a", false).unwrap();
        collection
            .append(EntryMode::Directory, oid, "c", false)
            .unwrap();

        let orders: Vec<_> = collection.entries().iter().map(|e| e.order()).collect();
        assert_eq!(orders, vec![0, 1, 2]);
        assert_eq!(names(&collection), vec!["b", "a", "c/"]);
    }

    #[rstest]
    fn strict_append_normalizes_directory_paths(oid: ObjectId) {
        let mut collection = EntryCollection::new();
        collection
            .append(EntryMode::Directory, oid, "subdir///", false)
            .unwrap();
        assert_eq!(names(&collection), vec!["subdir/"]);
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("..")]
    #[case(".git")]
    #[case("/")]
    fn strict_append_rejects_invalid_segments(oid: ObjectId, #[case] path: &str) {
        let mut collection = EntryCollection::new();
        let err = collection
            .append(EntryMode::Directory, oid, path, false)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TreeBuildError>(),
            Some(TreeBuildError::InvalidPath(_))
        ));
    }

    #[rstest]
    fn strict_append_reports_internal_separators_distinctly(oid: ObjectId) {
        let mut collection = EntryCollection::new();
        let err = collection.append(REGULAR, oid, "a/b", false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TreeBuildError>(),
            Some(TreeBuildError::PathContainsSeparator(_))
        ));
    }

    #[rstest]
    fn literal_append_stores_anything_verbatim(oid: ObjectId) {
        let mut collection = EntryCollection::new();
        for path in ["..", "a/b", "dir///", ""] {
            collection.append(REGULAR, oid.clone(), path, true).unwrap();
        }
        assert_eq!(names(&collection), vec!["..", "a/b", "dir///", ""]);
    }

    #[rstest]
    fn duplicate_paths_keep_the_last_appended_entry(oid: ObjectId) {
        let last = test_oid("newer");
        let mut collection = EntryCollection::new();
        collection
            .append(REGULAR, oid, "file.txt", false)
            .unwrap();
        collection
            .append(EXECUTABLE, last.clone(), "file.txt", false)
            .unwrap();

        collection.sort_and_dedup();

        assert_eq!(collection.len(), 1);
        let survivor = &collection.entries()[0];
        assert_eq!(survivor.mode(), EXECUTABLE);
        assert_eq!(survivor.oid(), &last);
    }

    #[rstest]
    fn directory_file_collision_resolves_last_wins(oid: ObjectId) {
        let mut collection = EntryCollection::new();
        collection.append(REGULAR, oid.clone(), "a", false).unwrap();
        collection
            .append(EntryMode::Directory, oid, "a", false)
            .unwrap();

        collection.sort_and_dedup();

        assert_eq!(names(&collection), vec!["a/"]);
        assert_eq!(collection.entries()[0].mode(), EntryMode::Directory);
    }

    #[rstest]
    fn three_way_collision_keeps_last_inserted(oid: ObjectId) {
        // A whole run of colliding encodings collapses to its structurally
        // last-inserted survivor, with no pairwise resolution
        let mut collection = EntryCollection::new();
        collection.append(REGULAR, oid.clone(), "a", false).unwrap();
        collection
            .append(EntryMode::Directory, oid.clone(), "a", false)
            .unwrap();
        collection.append(EXECUTABLE, oid, "a", false).unwrap();

        collection.sort_and_dedup();

        assert_eq!(collection.len(), 1);
        assert_eq!(collection.entries()[0].mode(), EXECUTABLE);
        assert_eq!(collection.entries()[0].name(), "a");
    }

    #[rstest]
    fn canonical_order_interleaves_names_between_slash_variants(oid: ObjectId) {
        let mut collection = EntryCollection::new();
        collection.append(REGULAR, oid.clone(), "a-", false).unwrap();
        collection
            .append(EntryMode::Directory, oid.clone(), "a", false)
            .unwrap();
        collection.append(REGULAR, oid, "a0", false).unwrap();

        collection.sort_and_dedup();

        // bytes: '-' (0x2d) < '/' (0x2f) < '0' (0x30)
        assert_eq!(names(&collection), vec!["a-", "a/", "a0"]);
    }

    #[rstest]
    fn file_sorts_before_subdirectory(oid: ObjectId) {
        let mut collection = EntryCollection::new();
        collection
            .append(EntryMode::Directory, oid.clone(), "subdir", false)
            .unwrap();
        collection.append(REGULAR, oid, "file.txt", false).unwrap();

        collection.sort_and_dedup();

        assert_eq!(names(&collection), vec!["file.txt", "subdir/"]);
    }

    #[rstest]
    fn conflict_index_resolves_normalized_names(oid: ObjectId) {
        let mut collection = EntryCollection::new();
        collection
            .append(EntryMode::Directory, oid.clone(), "subdir", false)
            .unwrap();
        collection.append(REGULAR, oid, "file.txt", false).unwrap();

        collection.sort_and_dedup();

        // The directory is found under its normalized name, sans slash
        assert_eq!(
            collection.entry_by_df_name("subdir").map(|e| e.name()),
            Some("subdir/")
        );
        assert_eq!(
            collection.entry_by_df_name("file.txt").map(|e| e.name()),
            Some("file.txt")
        );
        assert!(collection.entry_by_df_name("missing").is_none());
    }

    #[rstest]
    fn clear_resets_entries_and_index(oid: ObjectId) {
        let mut collection = EntryCollection::new();
        collection.append(REGULAR, oid, "file.txt", false).unwrap();
        collection.sort_and_dedup();

        collection.clear();

        assert!(collection.is_empty());
        assert_eq!(collection.entry_by_df_name("file.txt").map(|e| e.name()), None);
    }

    fn entry_set() -> impl Strategy<Value = Vec<(String, bool)>> {
        prop::collection::hash_map("[a-z]{1,6}", any::<bool>(), 1..10)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
    }

    fn collect(entries: &[(String, bool)]) -> EntryCollection {
        let mut collection = EntryCollection::new();
        for (name, is_dir) in entries {
            let mode = if *is_dir { EntryMode::Directory } else { REGULAR };
            collection
                .append(mode, test_oid(name), name, false)
                .unwrap();
        }
        collection
    }

    proptest! {
        // For duplicate-free inputs, the finalized sequence (and therefore
        // the materialized id) is independent of input order
        #[test]
        fn finalized_order_is_permutation_invariant(
            (original, shuffled) in entry_set()
                .prop_flat_map(|set| (Just(set.clone()), Just(set).prop_shuffle()))
        ) {
            let mut left = collect(&original);
            let mut right = collect(&shuffled);
            left.sort_and_dedup();
            right.sort_and_dedup();

            let left_view: Vec<_> = left
                .entries()
                .iter()
                .map(|e| (e.name().to_owned(), e.mode(), e.oid().clone()))
                .collect();
            let right_view: Vec<_> = right
                .entries()
                .iter()
                .map(|e| (e.name().to_owned(), e.mode(), e.oid().clone()))
                .collect();
            prop_assert_eq!(left_view, right_view);
        }
    }
}
