use crate::areas::repository::Repository;
use anyhow::Context;
use std::fs;
use std::io::Write;

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        fs::create_dir_all(self.database().objects_path())
            .context("Failed to create .git/objects directory")?;

        writeln!(
            self.writer(),
            "Initialized empty Git repository in {}",
            self.path().display()
        )?;

        Ok(())
    }
}
