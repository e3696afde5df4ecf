//! Branch registry
//!
//! Branches are human-readable names pointing to commits. Exactly one branch is
//! active at a time; the commit it points to is HEAD.
//!
//! ## Records
//!
//! - one record per branch, keyed by name, holding the 40-character commit ID
//! - `ACTIVE_BRANCH`: the name of the active branch
//! - `HEAD`: the commit ID the active branch points to
//!
//! Branch records are always written before `HEAD`, and both only after the commit
//! they reference has been stored.

use crate::areas::storage::Storage;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::error::UserError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;

/// Name of the record holding the HEAD commit ID
pub const HEAD_RECORD: &str = "HEAD";

/// Name of the record holding the active branch name
pub const ACTIVE_BRANCH_RECORD: &str = "ACTIVE_BRANCH";

/// A branch and the commit it currently points to
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Branch {
    pub name: BranchName,
    pub pointer: ObjectId,
}

#[derive(Debug)]
pub struct Refs {
    /// One record per branch
    branches: Box<dyn Storage>,
    /// Single-slot records (`HEAD`, `ACTIVE_BRANCH`)
    records: Box<dyn Storage>,
}

impl Refs {
    pub fn new(branches: Box<dyn Storage>, records: Box<dyn Storage>) -> Self {
        Refs { branches, records }
    }

    /// Create the initial active branch pointing at the root commit.
    pub fn initialize(&self, root_oid: &ObjectId) -> anyhow::Result<Branch> {
        let branch = Branch::new(BranchName::default_branch(), root_oid.clone());

        self.write_branch(&branch)?;
        self.write_record(ACTIVE_BRANCH_RECORD, branch.name.as_ref())?;
        self.write_record(HEAD_RECORD, root_oid.as_ref())?;

        Ok(branch)
    }

    pub fn is_initialized(&self) -> anyhow::Result<bool> {
        Ok(self.records.contains(HEAD_RECORD)? && self.records.contains(ACTIVE_BRANCH_RECORD)?)
    }

    /// Create a new, inactive branch pointing at HEAD.
    pub fn create(&self, name: &BranchName) -> anyhow::Result<Branch> {
        if self.branches.contains(name.as_ref())? {
            return Err(UserError::BranchAlreadyExists.into());
        }

        let branch = Branch::new(name.clone(), self.read_head()?);
        self.write_branch(&branch)?;

        tracing::debug!(branch = %branch.name, pointer = %branch.pointer, "created branch");

        Ok(branch)
    }

    /// Delete a branch; the active branch cannot be deleted.
    pub fn remove(&self, name: &str) -> anyhow::Result<Branch> {
        let branch = self.find_branch(name)?.ok_or(UserError::BranchNotFound)?;

        if self.active_branch()?.name == branch.name {
            return Err(UserError::CannotRemoveCurrentBranch.into());
        }

        self.branches.remove(branch.name.as_ref())?;
        tracing::debug!(branch = %branch.name, "removed branch");

        Ok(branch)
    }

    pub fn active_branch(&self) -> anyhow::Result<Branch> {
        let name = self
            .read_record(ACTIVE_BRANCH_RECORD)?
            .context("active branch record is missing")?;
        let name = BranchName::try_parse(name)
            .context("active branch record holds an invalid branch name")?;

        self.read_branch(&name)?
            .with_context(|| format!("active branch {} has no record", name))
    }

    pub fn is_active(&self, name: &BranchName) -> anyhow::Result<bool> {
        Ok(&self.active_branch()?.name == name)
    }

    /// Make `name` the active branch and move HEAD to its tip.
    pub fn set_active(&self, name: &BranchName) -> anyhow::Result<Branch> {
        let branch = self
            .read_branch(name)?
            .with_context(|| format!("cannot activate unknown branch {}", name))?;

        self.write_record(ACTIVE_BRANCH_RECORD, branch.name.as_ref())?;
        self.write_record(HEAD_RECORD, branch.pointer.as_ref())?;

        tracing::debug!(branch = %branch.name, head = %branch.pointer, "switched active branch");

        Ok(branch)
    }

    /// Move the active branch to `oid` and update HEAD accordingly.
    pub fn advance(&self, name: &BranchName, oid: &ObjectId) -> anyhow::Result<Branch> {
        if !self.is_active(name)? {
            anyhow::bail!("only the active branch can be advanced, {} is not active", name);
        }

        let branch = Branch::new(name.clone(), oid.clone());
        self.write_branch(&branch)?;
        self.write_record(HEAD_RECORD, oid.as_ref())?;

        tracing::debug!(branch = %branch.name, head = %oid, "advanced branch");

        Ok(branch)
    }

    pub fn read_head(&self) -> anyhow::Result<ObjectId> {
        let head = self
            .read_record(HEAD_RECORD)?
            .context("HEAD record is missing")?;

        ObjectId::try_parse(head).context("HEAD record holds an invalid commit ID")
    }

    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<Option<Branch>> {
        match self.branches.read(name.as_ref())? {
            None => Ok(None),
            Some(content) => {
                let pointer = ObjectId::try_parse(String::from_utf8(content.to_vec())?.trim().to_string())
                    .with_context(|| format!("branch {} holds an invalid commit ID", name))?;

                Ok(Some(Branch::new(name.clone(), pointer)))
            }
        }
    }

    /// Look a branch up by a raw, user-supplied name; invalid names simply don't exist.
    pub fn find_branch(&self, name: &str) -> anyhow::Result<Option<Branch>> {
        match BranchName::try_parse(name.to_string()) {
            Ok(name) => self.read_branch(&name),
            Err(_) => Ok(None),
        }
    }

    /// All branches, sorted by name.
    pub fn list_branches(&self) -> anyhow::Result<Vec<Branch>> {
        let mut branches = Vec::new();

        for key in self.branches.keys()? {
            let name = BranchName::try_parse(key)?;
            if let Some(branch) = self.read_branch(&name)? {
                branches.push(branch);
            }
        }

        Ok(branches)
    }

    fn write_branch(&self, branch: &Branch) -> anyhow::Result<()> {
        self.branches
            .write(
                branch.name.as_ref(),
                Bytes::from(branch.pointer.as_ref().to_string()),
            )
            .with_context(|| format!("failed to write branch {}", branch.name))
    }

    fn read_record(&self, record: &str) -> anyhow::Result<Option<String>> {
        self.records
            .read(record)?
            .map(|content| {
                String::from_utf8(content.to_vec())
                    .map(|content| content.trim().to_string())
                    .with_context(|| format!("{} record is not valid UTF-8", record))
            })
            .transpose()
    }

    fn write_record(&self, record: &str, value: &str) -> anyhow::Result<()> {
        self.records
            .write(record, Bytes::from(value.to_string()))
            .with_context(|| format!("failed to write {} record", record))
    }
}
