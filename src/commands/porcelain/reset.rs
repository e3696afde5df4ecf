use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;

impl Repository {
    /// Move the working tree and the active branch to `commit_id`, clearing the
    /// staging area.
    pub fn reset(&self, commit_id: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let target_oid = self.commit_graph().resolve(commit_id)?;
        let target = self.commit_graph().load(&target_oid)?;
        let (_, current) = self.head_commit()?;

        Migration::new(self, current.snapshot(), target.snapshot()).apply_changes()?;

        let branch = self.refs().active_branch()?;
        self.refs().advance(&branch.name, &target_oid)?;
        self.stage().clear()?;

        tracing::info!(branch = %branch.name, commit = %target_oid, "reset");

        Ok(())
    }
}
