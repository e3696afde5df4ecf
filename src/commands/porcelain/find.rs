use crate::areas::repository::Repository;
use crate::artifacts::core::error::UserError;
use std::io::Write;

impl Repository {
    /// Print the ID of every commit whose message starts with `message`.
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let matches = self
            .commit_graph()
            .all_commits()?
            .into_iter()
            .filter(|(_, commit)| commit.message().starts_with(message))
            .map(|(oid, _)| oid)
            .collect::<Vec<_>>();

        if matches.is_empty() {
            return Err(UserError::NoMatchingCommit.into());
        }

        let mut writer = self.writer();
        for oid in matches {
            writeln!(writer, "{}", oid)?;
        }

        Ok(())
    }
}
