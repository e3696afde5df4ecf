//! Staging area
//!
//! The staging area holds the delta the next commit will apply to its parent's
//! snapshot: files staged for addition (with the content to commit) and files staged
//! for removal (with the content they had at HEAD). A name is never staged in both
//! sets at once. Blobs are not created here; staged content only becomes an object
//! when a commit is made.

use crate::areas::storage::Storage;
use crate::artifacts::core::error::UserError;
use bytes::Bytes;
use std::collections::{BTreeMap, BTreeSet};

/// What `add` did to the staging area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The working content is now staged for addition
    Staged,
    /// A pending removal was cancelled because the file was restored as it was
    RemovalCancelled,
    /// A stale staged addition was dropped because the file matches HEAD again
    AdditionReverted,
    /// The file matches HEAD and nothing was staged
    Unchanged,
}

/// What `remove` did to the staging area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveOutcome {
    /// A staged addition was dropped
    pub unstaged: bool,
    /// The file is tracked by HEAD and is now staged for removal
    pub staged_for_removal: bool,
}

#[derive(Debug)]
pub struct Stage {
    additions: Box<dyn Storage>,
    removals: Box<dyn Storage>,
}

impl Stage {
    pub fn new(additions: Box<dyn Storage>, removals: Box<dyn Storage>) -> Self {
        Stage {
            additions,
            removals,
        }
    }

    /// Stage the working content of `name`.
    ///
    /// `head_content` is the file's content in the HEAD snapshot, if it is tracked.
    pub fn add(
        &self,
        name: &str,
        working_content: Bytes,
        head_content: Option<&Bytes>,
    ) -> anyhow::Result<AddOutcome> {
        if let Some(removed_content) = self.removals.read(name)?
            && removed_content == working_content
        {
            self.removals.remove(name)?;
            return Ok(AddOutcome::RemovalCancelled);
        }

        if head_content == Some(&working_content) {
            if self.additions.contains(name)? {
                self.additions.remove(name)?;
                return Ok(AddOutcome::AdditionReverted);
            }

            return Ok(AddOutcome::Unchanged);
        }

        self.stage_addition(name, working_content)?;
        Ok(AddOutcome::Staged)
    }

    /// Unstage `name` and, if HEAD tracks it, stage its removal.
    ///
    /// Deleting the working file is left to the caller. Fails with
    /// [`UserError::NothingToRemove`] when the file is neither staged nor tracked.
    pub fn remove(&self, name: &str, head_content: Option<&Bytes>) -> anyhow::Result<RemoveOutcome> {
        let staged = self.additions.contains(name)?;

        if !staged && head_content.is_none() {
            return Err(UserError::NothingToRemove.into());
        }

        if staged {
            self.additions.remove(name)?;
        }

        if let Some(head_content) = head_content {
            self.stage_removal(name, head_content.clone())?;
        }

        Ok(RemoveOutcome {
            unstaged: staged,
            staged_for_removal: head_content.is_some(),
        })
    }

    /// Stage `content` for addition under `name`, replacing any previous entry.
    pub fn stage_addition(&self, name: &str, content: Bytes) -> anyhow::Result<()> {
        self.removals.remove(name)?;
        self.additions.write(name, content)?;

        tracing::debug!(file = name, "staged for addition");
        Ok(())
    }

    /// Stage `name` for removal; `head_content` is what HEAD holds for it.
    pub fn stage_removal(&self, name: &str, head_content: Bytes) -> anyhow::Result<()> {
        self.additions.remove(name)?;
        self.removals.write(name, head_content)?;

        tracing::debug!(file = name, "staged for removal");
        Ok(())
    }

    pub fn staged_addition(&self, name: &str) -> anyhow::Result<Option<Bytes>> {
        self.additions.read(name)
    }

    pub fn is_staged_for_addition(&self, name: &str) -> anyhow::Result<bool> {
        self.additions.contains(name)
    }

    pub fn is_staged_for_removal(&self, name: &str) -> anyhow::Result<bool> {
        self.removals.contains(name)
    }

    /// Every staged addition with its content, sorted by name.
    pub fn additions(&self) -> anyhow::Result<BTreeMap<String, Bytes>> {
        let mut additions = BTreeMap::new();

        for name in self.additions.keys()? {
            if let Some(content) = self.additions.read(&name)? {
                additions.insert(name, content);
            }
        }

        Ok(additions)
    }

    /// Every name staged for removal, sorted.
    pub fn removals(&self) -> anyhow::Result<BTreeSet<String>> {
        Ok(self.removals.keys()?.into_iter().collect())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        for name in self.additions.keys()? {
            self.additions.remove(&name)?;
        }
        for name in self.removals.keys()? {
            self.removals.remove(&name)?;
        }

        Ok(())
    }

    pub fn is_clear(&self) -> anyhow::Result<bool> {
        Ok(self.additions.is_empty()? && self.removals.is_empty()?)
    }
}
