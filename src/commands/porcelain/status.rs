use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        let status = self.status_info()?;
        write!(self.writer(), "{}", status)?;

        Ok(())
    }
}
