//! Commit graph
//!
//! Creation and traversal of the commit DAG stored in the object database. Commits
//! have zero (root), one (regular) or two (merge) parents; traversals other than the
//! first-parent history follow every parent link.

use crate::areas::database::Database;
use crate::artifacts::core::error::UserError;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::merge::bca_finder::BCAFinder;
use crate::artifacts::objects::commit::{Commit, SlimCommit};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::snapshot::Snapshot;
use derive_new::new;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, new)]
pub struct CommitGraph<'d> {
    database: &'d Database,
}

impl<'d> CommitGraph<'d> {
    /// Store the root commit every repository starts from.
    pub fn create_root(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let root = Commit::root();
        let oid = self.database.store(&root)?;

        Ok((oid, root))
    }

    /// Build and store a commit on top of `parent` (and `second_parent` for merges).
    ///
    /// The ID is computed once every field is set.
    pub fn create_commit(
        &self,
        message: &str,
        parent: &ObjectId,
        snapshot: Snapshot,
        second_parent: Option<&ObjectId>,
    ) -> anyhow::Result<(ObjectId, Commit)> {
        let commit = Commit::try_new(
            message,
            parent.clone(),
            second_parent.cloned(),
            snapshot,
            Commit::timestamp_from_env(),
        )?;
        let oid = self.database.store(&commit)?;

        tracing::debug!(%oid, parents = commit.parents().len(), "created commit");

        Ok((oid, commit))
    }

    pub fn load(&self, oid: &ObjectId) -> anyhow::Result<Commit> {
        self.database.parse_object_as_commit(oid)
    }

    pub fn slim_commit(&self, oid: &ObjectId) -> anyhow::Result<SlimCommit> {
        Ok(self.load(oid)?.to_slim(oid.clone()))
    }

    /// Every commit reachable from `oid` through any parent link, excluding `oid`
    /// itself, in breadth-first order. Each ancestor appears once.
    pub fn ancestors_of(&self, oid: &ObjectId) -> anyhow::Result<Vec<ObjectId>> {
        let mut seen = HashSet::from([oid.clone()]);
        let mut queue = VecDeque::from([oid.clone()]);
        let mut ancestors = Vec::new();

        while let Some(current) = queue.pop_front() {
            for parent in self.load(&current)?.parents() {
                if seen.insert(parent.clone()) {
                    ancestors.push(parent.clone());
                    queue.push_back(parent.clone());
                }
            }
        }

        Ok(ancestors)
    }

    /// Split point of two commits, see [`BCAFinder`].
    pub fn merge_base(&self, left: &ObjectId, right: &ObjectId) -> anyhow::Result<Option<ObjectId>> {
        BCAFinder::new(|oid| self.slim_commit(oid)).find_best_common_ancestor(left, right)
    }

    /// First-parent history starting at `oid`.
    pub fn history(&self, oid: &ObjectId) -> RevList<'d> {
        RevList::new(self.database, oid.clone())
    }

    /// Resolve a full commit ID or a unique abbreviation of one.
    pub fn resolve(&self, id: &str) -> anyhow::Result<ObjectId> {
        let id = id.trim();

        if let Ok(oid) = ObjectId::try_parse(id.to_string())
            && self.is_commit(&oid)?
        {
            return Ok(oid);
        }

        let mut candidates = Vec::new();
        for oid in self.database.find_objects_by_prefix(id)? {
            if self.is_commit(&oid)? {
                candidates.push(oid);
            }
        }

        match candidates.len() {
            0 => Err(UserError::NoSuchCommit.into()),
            1 => Ok(candidates.remove(0)),
            _ => Err(UserError::AmbiguousCommitId(id.to_string()).into()),
        }
    }

    /// Every stored commit, ordered by ID.
    pub fn all_commits(&self) -> anyhow::Result<Vec<(ObjectId, Commit)>> {
        self.database
            .commit_ids()?
            .into_iter()
            .map(|oid| {
                let commit = self.load(&oid)?;
                Ok((oid, commit))
            })
            .collect()
    }

    fn is_commit(&self, oid: &ObjectId) -> anyhow::Result<bool> {
        Ok(self.database.contains(oid)? && self.database.get_object_type(oid)? == ObjectType::Commit)
    }
}
