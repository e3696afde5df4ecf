use crate::areas::repository::Repository;
use crate::artifacts::core::error::UserError;

impl Repository {
    pub fn add(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let content = self
            .workspace()
            .read_file(name)?
            .ok_or(UserError::FileDoesNotExist)?;

        let (_, head) = self.head_commit()?;
        let head_content = self.database().read_tracked(head.snapshot(), name)?;

        let outcome = self.stage().add(name, content, head_content.as_ref())?;
        tracing::debug!(file = name, ?outcome, "add");

        Ok(())
    }
}
