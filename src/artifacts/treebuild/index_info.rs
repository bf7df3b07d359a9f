//! Input record parsing
//!
//! `mktree` consumes index-info formatted records, one per line:
//!
//! ```text
//! <mode> SP <oid> TAB <path>
//! <mode> SP <oid> SP <stage> TAB <path>
//! <mode> SP <type> SP <oid> TAB <path>
//! ```
//!
//! Records are newline-terminated by default, NUL-terminated with `-z`.
//! A blank record is a segment boundary (only legal in batch mode); anything
//! else that fails to parse aborts the whole invocation.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::staging::entry_mode::EntryMode;
use crate::artifacts::treebuild::error::TreeBuildError;
use std::io::BufRead;

/// One structured input tuple
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntry {
    pub mode: EntryMode,
    /// Declared object type, when the record spells one out
    pub declared_type: Option<ObjectType>,
    pub oid: ObjectId,
    /// Merge stage; anything non-zero is rejected downstream
    pub stage: u32,
    pub path: String,
}

/// What the record reader saw next
#[derive(Debug)]
pub enum InputRecord {
    Entry(ParsedEntry),
    /// Blank record: a segment boundary in batch mode
    Boundary,
    /// Out-of-band end of input
    Eof,
}

/// Line-oriented reader over the raw input stream
pub struct RecordReader<R> {
    reader: R,
    terminator: u8,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R, nul_terminated: bool) -> Self {
        RecordReader {
            reader,
            terminator: if nul_terminated { b'\0' } else { b'\n' },
        }
    }

    /// Read and parse the next record; the final terminator is optional
    pub fn next_record(&mut self) -> anyhow::Result<InputRecord> {
        let mut buffer = Vec::new();
        let read = self.reader.read_until(self.terminator, &mut buffer)?;
        if read == 0 {
            return Ok(InputRecord::Eof);
        }
        if buffer.last() == Some(&self.terminator) {
            buffer.pop();
        }

        let line = String::from_utf8(buffer)
            .map_err(|_| TreeBuildError::InputFormat("(non UTF-8 line)".to_owned()))?;
        if line.is_empty() {
            return Ok(InputRecord::Boundary);
        }

        parse_record(&line).map(InputRecord::Entry)
    }
}

/// Parse one non-blank record into a structured tuple
pub fn parse_record(line: &str) -> anyhow::Result<ParsedEntry> {
    let malformed = || TreeBuildError::InputFormat(line.to_owned());

    let (fields, path) = line.split_once('\t').ok_or_else(malformed)?;
    if path.is_empty() {
        return Err(malformed().into());
    }

    let fields: Vec<&str> = fields.split(' ').collect();
    let (mode, declared_type, oid, stage) = match fields.as_slice() {
        [mode, oid] => (*mode, None, *oid, 0),
        [mode, second, third] => {
            if let Ok(declared) = ObjectType::try_from(*second) {
                (*mode, Some(declared), *third, 0)
            } else {
                let stage: u32 = third.parse().map_err(|_| malformed())?;
                if stage > 3 {
                    return Err(malformed().into());
                }
                (*mode, None, *second, stage)
            }
        }
        _ => return Err(malformed().into()),
    };

    let mode = EntryMode::from_octal_str(mode).map_err(|_| malformed())?;
    let oid = ObjectId::try_parse(oid.to_string()).map_err(|_| malformed())?;

    Ok(ParsedEntry {
        mode,
        declared_type,
        oid,
        stage,
        path: path.to_owned(),
    })
}
