//! Working tree migration
//!
//! Moving the working tree from one snapshot to another (checkout of a branch,
//! reset, fast-forward) happens in two steps:
//!
//! 1. Plan: detect untracked files that the target snapshot would overwrite and
//!    record which files to add, modify or delete.
//! 2. Apply: delete files no longer tracked, then write every file of the target.
//!
//! Nothing is touched unless planning succeeds, so a refused migration leaves the
//! working tree exactly as it was.

use crate::areas::repository::Repository;
use crate::artifacts::core::error::UserError;
use crate::artifacts::objects::snapshot::Snapshot;
use anyhow::Context;
use bytes::Bytes;
use std::collections::BTreeMap;

/// Type of file system action required by a migration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ActionType {
    /// Create a file the current snapshot does not track
    Add,
    /// Delete a file the target snapshot does not track
    Delete,
    /// Overwrite a file tracked by both snapshots
    Modify,
}

pub struct Migration<'r> {
    repository: &'r Repository,
    /// Snapshot the working tree is assumed to reflect
    current: &'r Snapshot,
    /// Snapshot the working tree is moved to
    target: &'r Snapshot,
    /// Planned file system actions
    actions: BTreeMap<ActionType, Vec<String>>,
}

impl<'r> Migration<'r> {
    pub fn new(repository: &'r Repository, current: &'r Snapshot, target: &'r Snapshot) -> Self {
        let actions = BTreeMap::from([
            (ActionType::Add, Vec::new()),
            (ActionType::Delete, Vec::new()),
            (ActionType::Modify, Vec::new()),
        ]);

        Migration {
            repository,
            current,
            target,
            actions,
        }
    }

    pub fn actions_of(&self, action: ActionType) -> &[String] {
        self.actions
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn apply_changes(&mut self) -> anyhow::Result<()> {
        self.plan_changes()?;
        self.repository.workspace().apply_migration(self)?;

        Ok(())
    }

    /// Working files not tracked by the current snapshot that the target would overwrite.
    pub fn untracked_files_in_the_way(&self) -> anyhow::Result<Vec<String>> {
        Ok(self
            .repository
            .workspace()
            .list_files()?
            .into_iter()
            .filter(|name| self.target.tracks(name) && !self.current.tracks(name))
            .collect())
    }

    fn plan_changes(&mut self) -> anyhow::Result<()> {
        let untracked = self.untracked_files_in_the_way()?;
        if !untracked.is_empty() {
            tracing::debug!(files = ?untracked, "untracked files block the migration");
            return Err(UserError::UntrackedFileInTheWay.into());
        }

        for name in self.target.names() {
            let action = if self.current.tracks(name) {
                ActionType::Modify
            } else {
                ActionType::Add
            };
            self.actions.entry(action).or_default().push(name.clone());
        }

        for name in self.current.names() {
            if !self.target.tracks(name) {
                self.actions
                    .entry(ActionType::Delete)
                    .or_default()
                    .push(name.clone());
            }
        }

        Ok(())
    }

    /// Content the target snapshot holds for `name`.
    pub fn load_blob_data(&self, name: &str) -> anyhow::Result<Bytes> {
        let oid = self
            .target
            .get(name)
            .with_context(|| format!("{} is not tracked by the target snapshot", name))?;

        self.repository
            .database()
            .get(oid)
            .with_context(|| format!("Failed to load blob {} for {}", oid, name))
    }
}
