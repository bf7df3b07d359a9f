use crate::areas::repository::Repository;
use crate::artifacts::treebuild::batch::{MktreeOptions, TreeBatch};
use std::io::BufRead;

impl Repository {
    /// Build one or more tree objects from index-info formatted input and
    /// print each resulting id
    pub fn mktree(&mut self, options: MktreeOptions, input: impl BufRead) -> anyhow::Result<()> {
        let mut writer = self.writer();

        TreeBatch::new(self.database(), options).run(input, &mut *writer)
    }
}
