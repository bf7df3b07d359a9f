use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// List one level of a stored tree, one entry per line:
    /// `<mode> SP <type> SP <oid> TAB <name>`
    pub fn ls_tree(&mut self, object_sha: &str) -> anyhow::Result<()> {
        let oid = ObjectId::try_parse(object_sha.to_string())?;

        let tree = self
            .database()
            .parse_object_as_tree(&oid)?
            .ok_or_else(|| anyhow::anyhow!("not a tree object: {oid}"))?;

        for (name, entry) in tree.entries() {
            writeln!(
                self.writer(),
                "{:06o} {} {}\t{}",
                entry.mode.as_u32(),
                entry.mode.implied_type(),
                entry.oid,
                name
            )?;
        }

        Ok(())
    }
}
