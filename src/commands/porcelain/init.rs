use crate::areas::repository::Repository;
use crate::artifacts::core::error::UserError;
use anyhow::Context;

impl Repository {
    pub fn init(&self) -> anyhow::Result<()> {
        if self.is_initialized()? {
            return Err(UserError::AlreadyInitialized.into());
        }

        let (root_oid, _) = self
            .commit_graph()
            .create_root()
            .context("Failed to create the root commit")?;

        let branch = self
            .refs()
            .initialize(&root_oid)
            .context("Failed to create the default branch")?;

        tracing::info!(path = %self.path().display(), branch = %branch.name, "initialized repository");

        Ok(())
    }
}
