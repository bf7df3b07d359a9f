//! Git tree object
//!
//! Trees represent directory snapshots. They contain entries for files
//! (blobs), subdirectories (other trees), and submodules (commits), along
//! with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<octal mode> <name>\0<20-byte-sha1>`
//!
//! ## Representations
//!
//! Trees maintain two sets of entries:
//! - `records`: the write model, a caller-ordered flat list serialized
//!   verbatim. Callers own the ordering; `mktree` passes entries in canonical
//!   byte order for validated trees and in raw append order for literal ones.
//! - `readable_entries`: the read model, loaded from the database for
//!   `ls-tree` style listing.

use crate::artifacts::database::database_entry::DatabaseEntry;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::staging::entry_mode::EntryMode;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// One flat tree entry in the write model
///
/// The name is serialized exactly as given; no sorting, deduplication, or
/// separator handling happens at this level.
#[derive(Debug, Clone, PartialEq, new)]
pub struct TreeRecord {
    pub mode: EntryMode,
    pub oid: ObjectId,
    pub name: String,
}

/// Git tree object representing one directory level
#[derive(Debug, Clone, Default)]
pub struct Tree {
    /// Entries loaded from the database (read mode)
    readable_entries: BTreeMap<String, DatabaseEntry>,
    /// Entries being written, in the exact order they will serialize
    records: Vec<TreeRecord>,
}

impl Tree {
    /// Build a tree from an already-ordered flat record list
    pub fn from_records(records: Vec<TreeRecord>) -> Self {
        Tree {
            records,
            ..Default::default()
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &DatabaseEntry)> {
        self.readable_entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, DatabaseEntry)> {
        self.readable_entries.into_iter()
    }
}

impl Packable for Tree {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut content_bytes = Vec::new();
        for record in &self.records {
            let header = format!("{:o} {}", record.mode.as_u32(), record.name);
            content_bytes.write_all(header.as_bytes())?;
            content_bytes.push(0);
            record.oid.write_h40_to(&mut content_bytes)?;
        }

        let mut tree_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        tree_bytes.write_all(header.as_bytes())?;
        tree_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(tree_bytes))
    }
}

impl Unpackable for Tree {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let mut entries = BTreeMap::new();
        let mut reader = reader;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            // Must end with ' ' or it's malformed
            if *mode_bytes.last().unwrap() != b' ' {
                return Err(anyhow::anyhow!("unexpected EOF in mode"));
            }
            mode_bytes.pop(); // drop the space

            let mode_str = std::str::from_utf8(&mode_bytes)?;
            let mode = EntryMode::from_octal_str(mode_str)?;

            // Read "name\0"
            name_bytes.clear();
            let n = reader.read_until(b'\0', &mut name_bytes)?;
            if n == 0 || *name_bytes.last().unwrap() != b'\0' {
                return Err(anyhow::anyhow!("unexpected EOF in name"));
            }
            name_bytes.pop(); // drop NUL
            let name = std::str::from_utf8(&name_bytes)?.to_owned();

            // Read object id
            let oid =
                ObjectId::read_h40_from(&mut reader).context("unexpected EOF in object id")?;

            entries.insert(name, DatabaseEntry::new(oid, mode));
        }

        Ok(Tree {
            readable_entries: entries,
            records: Vec::new(),
        })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
