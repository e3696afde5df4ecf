use crate::areas::repository::Repository;

impl Repository {
    /// Every commit ever made, in no particular order.
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        for (oid, commit) in self.commit_graph().all_commits()? {
            self.write_log_entry(&oid, &commit)?;
        }

        Ok(())
    }
}
