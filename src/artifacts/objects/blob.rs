//! Git blob object
//!
//! Blobs store file content. They contain only the raw file data, without
//! any metadata like filename or permissions (those are stored in trees).
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::objects::object::{Object, Packable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::Write;

/// Git blob object representing file content
///
/// Each unique file content is stored as a blob, identified by its SHA-1 hash.
#[derive(Debug, Clone, new)]
pub struct Blob {
    /// File content as a string
    content: String,
}

impl Blob {
    /// Get the file content as a string
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content_bytes = self.content.as_bytes();

        let mut blob_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(content_bytes)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
