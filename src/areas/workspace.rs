//! Working tree
//!
//! The user's files live directly in the repository root; only regular files at the
//! top level take part in version control. Subdirectories and the `.bitlet` metadata
//! directory are ignored.

use crate::areas::storage::Storage;
use crate::artifacts::checkout::migration::{ActionType, Migration};
use anyhow::Context;
use bytes::Bytes;

#[derive(Debug)]
pub struct Workspace {
    storage: Box<dyn Storage>,
}

impl Workspace {
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Workspace { storage }
    }

    /// Names of every file in the working tree, sorted.
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        self.storage.keys()
    }

    pub fn contains(&self, name: &str) -> anyhow::Result<bool> {
        self.storage.contains(name)
    }

    pub fn read_file(&self, name: &str) -> anyhow::Result<Option<Bytes>> {
        self.storage
            .read(name)
            .with_context(|| format!("Unable to read working file {}", name))
    }

    pub fn write_file(&self, name: &str, content: Bytes) -> anyhow::Result<()> {
        self.storage
            .write(name, content)
            .with_context(|| format!("Unable to write working file {}", name))
    }

    /// Delete a working file. Returns whether it existed.
    pub fn remove_file(&self, name: &str) -> anyhow::Result<bool> {
        self.storage
            .remove(name)
            .with_context(|| format!("Unable to delete working file {}", name))
    }

    // Deletions go first so a failing write never leaves stale files behind.
    pub fn apply_migration(&self, migration: &Migration) -> anyhow::Result<()> {
        for name in migration.actions_of(ActionType::Delete) {
            if !self.remove_file(name)? {
                tracing::debug!(file = %name, "file to delete was already absent");
            }
        }

        for action in [ActionType::Modify, ActionType::Add] {
            for name in migration.actions_of(action) {
                let content = migration.load_blob_data(name)?;
                self.write_file(name, content)?;
            }
        }

        Ok(())
    }
}
