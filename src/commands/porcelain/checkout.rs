use crate::areas::refs::Branch;
use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::UserError;

impl Repository {
    /// Switch to `name`: move the working tree to its tip, make it active and clear
    /// the staging area.
    pub fn checkout_branch(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let branch = self.refs().find_branch(name)?.ok_or(UserError::NoSuchBranch)?;
        if self.refs().is_active(&branch.name)? {
            return Err(UserError::AlreadyOnBranch.into());
        }

        self.switch_to(&branch)
    }

    /// Restore `name` in the working tree from the given commit, HEAD by default.
    ///
    /// Neither the staging area nor the active branch change.
    pub fn checkout_file(&self, commit_id: Option<&str>, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let commit_oid = match commit_id {
            Some(commit_id) => self.commit_graph().resolve(commit_id)?,
            None => self.refs().read_head()?,
        };
        let commit = self.commit_graph().load(&commit_oid)?;

        let content = self
            .database()
            .read_tracked(commit.snapshot(), name)?
            .ok_or(UserError::FileNotInCommit)?;
        self.workspace().write_file(name, content)?;

        tracing::debug!(file = name, commit = %commit_oid, "restored file");

        Ok(())
    }

    pub(crate) fn switch_to(&self, branch: &Branch) -> anyhow::Result<()> {
        let (_, current) = self.head_commit()?;
        let target = self.commit_graph().load(&branch.pointer)?;

        Migration::new(self, current.snapshot(), target.snapshot()).apply_changes()?;

        self.refs().set_active(&branch.name)?;
        self.stage().clear()?;

        Ok(())
    }
}
