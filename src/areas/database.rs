//! Loose object database
//!
//! Objects live under `.git/objects/xx/yyyy...`, zlib compressed, written via
//! a temp file and an atomic rename. Storing an object that already exists is
//! a no-op; content addressing makes the write idempotent.

use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use fake::rand;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn new(path: Box<Path>) -> Self {
        Database { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, object: &impl Object) -> anyhow::Result<()> {
        let object_path = self.path.join(object.object_path()?);
        let object_content = object.serialize()?;

        // write the object to disk unless it already exists
        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            self.write_object(object_path, object_content)?;
        }

        Ok(())
    }

    /// Kind of a locally stored object, or `None` when it is not in the store.
    ///
    /// This only ever consults the local store; an absent object is reported
    /// as absent, never fetched.
    pub fn object_kind(&self, object_id: &ObjectId) -> anyhow::Result<Option<ObjectType>> {
        let object_path = self.path.join(object_id.to_path());
        if !object_path.exists() {
            return Ok(None);
        }

        let (object_type, _) = self.parse_object_as_bytes(object_id)?;
        Ok(Some(object_type))
    }

    pub fn parse_object_as_tree(&self, object_id: &ObjectId) -> anyhow::Result<Option<Tree>> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Tree => Ok(Some(Tree::deserialize(object_reader)?)),
            _ => Ok(None),
        }
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_path = self.path.join(object_id.to_path());
        let object_content = self.read_object(object_path)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn read_object(&self, object_path: PathBuf) -> anyhow::Result<Bytes> {
        let object_content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        Self::decompress(object_content.into())
    }

    fn write_object(&self, object_path: PathBuf, object_content: Bytes) -> anyhow::Result<()> {
        let object_dir = object_path
            .parent()
            .context(format!("Invalid object path {}", object_path.display()))?;
        let temp_object_path = object_dir.join(Self::generate_temp_name());

        let object_content = Self::compress(object_content)?;

        let mut file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_object_path)
            .context(format!(
                "Unable to open object file {}",
                temp_object_path.display()
            ))?;

        file.write_all(&object_content).context(format!(
            "Unable to write object file {}",
            temp_object_path.display()
        ))?;

        // rename the temp file to the object file to make it atomic
        std::fs::rename(&temp_object_path, &object_path).context(format!(
            "Unable to rename object file to {}",
            object_path.display()
        ))?;

        Ok(())
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

    fn generate_temp_name() -> String {
        format!("tmp-obj-{}", rand::random::<u32>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::Blob;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn database() -> (assert_fs::TempDir, Database) {
        let dir = assert_fs::TempDir::new().unwrap();
        let database = Database::new(dir.path().join("objects").into_boxed_path());
        std::fs::create_dir_all(database.objects_path()).unwrap();
        (dir, database)
    }

    #[rstest]
    fn stored_blob_is_fanned_out_by_id_prefix(database: (assert_fs::TempDir, Database)) {
        let (_dir, database) = database;
        let blob = Blob::new("test content\n".to_string());

        database.store(&blob).unwrap();

        let expected = database
            .objects_path()
            .join("d6")
            .join("70460b4b4aece5915caf5c68d12f560a9fe3e4");
        assert!(expected.exists());
    }

    #[rstest]
    fn object_kind_reports_stored_and_absent_objects(database: (assert_fs::TempDir, Database)) {
        let (_dir, database) = database;
        let blob = Blob::new("test content\n".to_string());
        database.store(&blob).unwrap();

        let stored = blob.object_id().unwrap();
        let absent =
            ObjectId::try_parse("0000000000000000000000000000000000000000".into()).unwrap();

        assert_eq!(database.object_kind(&stored).unwrap(), Some(ObjectType::Blob));
        assert_eq!(database.object_kind(&absent).unwrap(), None);
    }

    #[rstest]
    fn storing_twice_is_idempotent(database: (assert_fs::TempDir, Database)) {
        let (_dir, database) = database;
        let blob = Blob::new("test content\n".to_string());

        database.store(&blob).unwrap();
        database.store(&blob).unwrap();

        assert_eq!(database.object_kind(&blob.object_id().unwrap()).unwrap(), Some(ObjectType::Blob));
    }
}
