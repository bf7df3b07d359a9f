use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::io::Write;

impl Repository {
    pub fn hash_object(&mut self, object_path: &str, write: bool) -> anyhow::Result<()> {
        let object = self.workspace().parse_blob(object_path.as_ref())?;

        let object_id = object.object_id()?;

        writeln!(self.writer(), "{object_id}")?;

        if !write {
            return Ok(());
        }

        self.database().store(&object)?;

        Ok(())
    }
}
