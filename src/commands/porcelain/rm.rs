use crate::areas::repository::Repository;

impl Repository {
    pub fn rm(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let (_, head) = self.head_commit()?;
        let head_content = self.database().read_tracked(head.snapshot(), name)?;

        let outcome = self.stage().remove(name, head_content.as_ref())?;
        if outcome.staged_for_removal {
            self.workspace().remove_file(name)?;
        }

        tracing::debug!(file = name, ?outcome, "rm");

        Ok(())
    }
}
