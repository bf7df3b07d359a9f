use crate::artifacts::objects::blob::Blob;
use anyhow::Context;
use std::path::Path;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn parse_blob(&self, path: &Path) -> anyhow::Result<Blob> {
        let data = self.read_file(path)?;
        Ok(Blob::new(data))
    }

    pub fn read_file(&self, file_path: &Path) -> anyhow::Result<String> {
        let file_path = self.path.join(file_path);

        std::fs::read_to_string(&file_path)
            .context(format!("Unable to read file {}", file_path.display()))
    }
}
