use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// First-parent history of HEAD, newest first.
    pub fn log(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let head = self.refs().read_head()?;
        for entry in self.commit_graph().history(&head) {
            let (oid, commit) = entry?;
            self.write_log_entry(&oid, &commit)?;
        }

        Ok(())
    }

    pub(crate) fn write_log_entry(&self, oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", oid)?;
        if let (Some(first), Some(second)) = (commit.parent(), commit.second_parent()) {
            writeln!(writer, "Merge: {} {}", first.to_short_oid(), second.to_short_oid())?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
