//! The mktree accumulate/finalize/emit cycle
//!
//! `TreeBatch` drives repeated collect, finalize, emit, reset rounds over one
//! input stream. Without batch mode the whole stream is one segment; with it,
//! blank records delimit independent segments, each becoming exactly one tree.
//! Every segment's id is printed and flushed the moment it exists, and the
//! collection is cleared before the next segment starts. Nothing carries over.

use crate::areas::database::Database;
use crate::artifacts::treebuild::collection::EntryCollection;
use crate::artifacts::treebuild::error::TreeBuildError;
use crate::artifacts::treebuild::index_info::{InputRecord, ParsedEntry, RecordReader};
use crate::artifacts::treebuild::materialize::{write_tree, write_tree_literally};
use derive_new::new;
use std::io::{BufRead, Write};

/// Recognized mktree options
#[derive(Debug, Clone, Copy, Default, new)]
pub struct MktreeOptions {
    /// Input records are NUL terminated
    pub nul_terminated: bool,
    /// Tolerate content ids absent from the store
    pub allow_missing: bool,
    /// Bypass sorting, deduplication, and path validation entirely
    pub literally: bool,
    /// Allow creation of more than one tree
    pub batch: bool,
}

/// One mktree invocation over one input stream
pub struct TreeBatch<'repo> {
    database: &'repo Database,
    options: MktreeOptions,
    collection: EntryCollection,
}

impl<'repo> TreeBatch<'repo> {
    pub fn new(database: &'repo Database, options: MktreeOptions) -> Self {
        TreeBatch {
            database,
            options,
            collection: EntryCollection::new(),
        }
    }

    /// Consume the whole input, emitting one tree id per completed segment
    ///
    /// The first error of any kind aborts the run; a failed segment writes no
    /// partial tree object.
    pub fn run(&mut self, input: impl BufRead, writer: &mut impl Write) -> anyhow::Result<()> {
        let mut records = RecordReader::new(input, self.options.nul_terminated);

        loop {
            match records.next_record()? {
                InputRecord::Entry(entry) => self.ingest(entry)?,
                InputRecord::Boundary => {
                    if !self.options.batch {
                        return Err(TreeBuildError::InputFormat(
                            "(blank line only valid in batch mode)".to_owned(),
                        )
                        .into());
                    }
                    self.finalize_segment(writer, false)?;
                }
                InputRecord::Eof => {
                    self.finalize_segment(writer, true)?;
                    return Ok(());
                }
            }
        }
    }

    /// Validate one parsed tuple against its declared type and the store,
    /// then add it to the current segment
    fn ingest(&mut self, entry: ParsedEntry) -> anyhow::Result<()> {
        if entry.stage != 0 {
            return Err(TreeBuildError::Unmerged(entry.path).into());
        }

        let implied = entry.mode.implied_type();
        if let Some(declared) = entry.declared_type
            && declared != implied
        {
            return Err(TreeBuildError::TypeMismatch { declared, implied }.into());
        }

        // Submodule ids point into another repository; there is nothing to
        // look up locally. Everything else is resolved against the store
        // without ever fetching.
        if !entry.mode.is_submodule() {
            match self.database.object_kind(&entry.oid)? {
                Some(actual) if actual != implied => {
                    return Err(TreeBuildError::ObjectKindMismatch {
                        path: entry.path,
                        oid: entry.oid,
                        actual,
                        expected: implied,
                    }
                    .into());
                }
                Some(_) => {}
                None if !self.options.allow_missing => {
                    return Err(TreeBuildError::ObjectMissing {
                        path: entry.path,
                        oid: entry.oid,
                    }
                    .into());
                }
                // Tolerated: the entry is included unresolved
                None => {}
            }
        }

        self.collection
            .append(entry.mode, entry.oid, &entry.path, self.options.literally)
    }

    /// Materialize the current segment, emit its id, and reset
    ///
    /// The one exception: at end of input in batch mode with nothing
    /// accumulated, the final record terminator was simply optional and no
    /// empty tree is emitted for it. An explicit blank-line boundary always
    /// materializes, empty segment or not.
    fn finalize_segment(&mut self, writer: &mut impl Write, at_eof: bool) -> anyhow::Result<()> {
        if at_eof && self.options.batch && self.collection.is_empty() {
            self.collection.clear();
            return Ok(());
        }

        let oid = if self.options.literally {
            write_tree_literally(self.database, &self.collection)?
        } else {
            write_tree(self.database, &mut self.collection)?
        };

        writeln!(writer, "{oid}")?;
        writer.flush()?;

        self.collection.clear();
        Ok(())
    }
}
