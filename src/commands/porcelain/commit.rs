use crate::areas::repository::Repository;
use crate::artifacts::core::error::UserError;
use crate::artifacts::objects::object_id::ObjectId;

impl Repository {
    pub fn commit(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if message.trim().is_empty() {
            return Err(UserError::EmptyCommitMessage.into());
        }

        if self.stage().is_clear()? {
            return Err(UserError::NothingToCommit.into());
        }

        self.write_commit(message, None)?;

        Ok(())
    }

    /// Commit HEAD's snapshot with the staged changes applied, advance the active
    /// branch to it and clear the staging area.
    ///
    /// Staged contents become blobs here, not when they are added.
    pub(crate) fn write_commit(
        &self,
        message: &str,
        second_parent: Option<&ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        let (head_oid, head) = self.head_commit()?;

        let mut snapshot = head.snapshot().clone();
        for (name, content) in self.stage().additions()? {
            let blob_id = self.database().put(content)?;
            snapshot.insert(name, blob_id);
        }
        for name in self.stage().removals()? {
            snapshot.remove(&name);
        }

        let (commit_oid, _) =
            self.commit_graph()
                .create_commit(message, &head_oid, snapshot, second_parent)?;

        let branch = self.refs().active_branch()?;
        self.refs().advance(&branch.name, &commit_oid)?;
        self.stage().clear()?;

        tracing::info!(branch = %branch.name, commit = %commit_oid, "committed");

        Ok(commit_oid)
    }
}
