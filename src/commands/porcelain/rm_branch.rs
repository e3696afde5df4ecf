use crate::areas::repository::Repository;

impl Repository {
    /// Delete the branch record only; its commits stay in the database.
    pub fn rm_branch(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        self.refs().remove(name)?;

        Ok(())
    }
}
