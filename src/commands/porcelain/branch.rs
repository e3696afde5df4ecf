use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;

impl Repository {
    /// Create a branch pointing at HEAD. The active branch does not change.
    pub fn branch(&self, name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let name = BranchName::try_parse(name.to_string())?;
        self.refs().create(&name)?;

        Ok(())
    }
}
