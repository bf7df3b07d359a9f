//! Candidate tree entry
//!
//! A `TreeEntry` is one not-yet-materialized listing candidate. Directory
//! entries carry a single synthetic trailing `/` in their stored name; it
//! exists only so canonical ordering interleaves directories correctly and is
//! stripped again before serialization.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::staging::entry_mode::EntryMode;
use std::cmp::Ordering;

/// One candidate tree listing
#[derive(Debug, Clone)]
pub struct TreeEntry {
    mode: EntryMode,
    oid: ObjectId,
    /// Entry name; directories end in one synthetic `/`
    name: String,
    /// Insertion index, used only as a sort tie-break; never serialized
    order: usize,
}

impl TreeEntry {
    pub(crate) fn new(mode: EntryMode, oid: ObjectId, name: String, order: usize) -> Self {
        TreeEntry {
            mode,
            oid,
            name,
            order,
        }
    }

    pub fn mode(&self) -> EntryMode {
        self.mode
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }

    /// Full stored name, synthetic trailing slash included
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name under directory/file normalization: the synthetic trailing slash
    /// of a directory entry is excluded, so a file `a` and a directory `a/`
    /// compare equal.
    pub fn df_name(&self) -> &str {
        if self.mode.is_tree() {
            self.name.strip_suffix('/').unwrap_or(&self.name)
        } else {
            &self.name
        }
    }

    pub(crate) fn order(&self) -> usize {
        self.order
    }
}

/// First-phase ordering: D/F-normalized names, most recently appended first
/// among equals
pub(crate) fn df_order(a: &TreeEntry, b: &TreeEntry) -> Ordering {
    a.df_name()
        .cmp(b.df_name())
        .then_with(|| b.order.cmp(&a.order))
}

/// Second-phase ordering: full names, synthetic slash included. This is the
/// byte order a tree object serializes in and it differs from `df_order`
/// whenever a name sorts between `name` and `name/`.
pub(crate) fn canonical_order(a: &TreeEntry, b: &TreeEntry) -> Ordering {
    a.name.cmp(&b.name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::staging::entry_mode::FileMode;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use sha1::Digest;

    #[fixture]
    fn oid() -> ObjectId {
        let mut hasher = sha1::Sha1::new();
        hasher.update("test data");
        ObjectId::try_parse(format!("{:x}", hasher.finalize())).unwrap()
    }

    fn file(name: &str, order: usize, oid: &ObjectId) -> TreeEntry {
        TreeEntry::new(
            EntryMode::File(FileMode::Regular),
            oid.clone(),
            name.to_string(),
            order,
        )
    }

    fn dir(name: &str, order: usize, oid: &ObjectId) -> TreeEntry {
        TreeEntry::new(
            EntryMode::Directory,
            oid.clone(),
            format!("{name}/"),
            order,
        )
    }

    #[rstest]
    fn df_name_excludes_only_the_directory_slash(oid: ObjectId) {
        assert_eq!(dir("a", 0, &oid).df_name(), "a");
        assert_eq!(file("a", 0, &oid).df_name(), "a");
        // A literal-mode file name ending in '/' keeps it
        assert_eq!(file("a/", 0, &oid).df_name(), "a/");
    }

    #[rstest]
    fn df_order_treats_file_and_directory_as_equal_names(oid: ObjectId) {
        let file_a = file("a", 0, &oid);
        let dir_a = dir("a", 1, &oid);

        // Equal names tie-break by descending order: the later entry first
        assert_eq!(df_order(&dir_a, &file_a), Ordering::Less);
        assert_eq!(df_order(&file_a, &dir_a), Ordering::Greater);
    }

    #[rstest]
    fn canonical_order_diverges_from_df_order(oid: ObjectId) {
        // '-' (0x2d) sorts before '/' (0x2f): "a-" < "a/" canonically,
        // but under normalization "a" < "a-"
        let dash = file("a-", 0, &oid);
        let dir_a = dir("a", 1, &oid);

        assert_eq!(df_order(&dir_a, &dash), Ordering::Less);
        assert_eq!(canonical_order(&dash, &dir_a), Ordering::Less);
    }
}
