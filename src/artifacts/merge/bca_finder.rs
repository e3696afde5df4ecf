//! Merge base finder
//!
//! Finds the split point of two commits: the common ancestor a three-way merge uses
//! as its base.
//!
//! ## Algorithm
//!
//! 1. Walk the full history of both commits (every parent link, not only the first
//!    parent) breadth-first, recording for each reached commit the shortest distance
//!    from the starting commit. A commit counts as its own ancestor at distance 0.
//! 2. Commits reached from both sides are the common ancestors.
//! 3. Apply the **best common ancestor** invariant: a common ancestor that is itself
//!    an ancestor of another common ancestor is redundant and dropped.
//! 4. Among the remaining candidates, pick the one with the smallest combined
//!    distance; ties go to the earlier commit timestamp, then to the smaller ID.
//!
//! Step 3 guarantees that when one commit is an ancestor of the other, that commit is
//! the result, whatever the path lengths. Disjoint histories have no merge base.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let finder = BCAFinder::new(|commit_id| graph.slim_commit(commit_id));
//!
//! let merge_base = finder.find_best_common_ancestor(&current, &other)?;
//! ```

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, VecDeque};
use std::fmt;

bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const VISITED_FROM_SOURCE = 0b01;
        const VISITED_FROM_TARGET = 0b10;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const REDUNDANT = 0b100; // ancestor of another common ancestor
    }
}

impl fmt::Debug for VisitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut flags = Vec::new();
        if self.contains(VisitState::VISITED_FROM_SOURCE) {
            flags.push("SOURCE");
        }
        if self.contains(VisitState::VISITED_FROM_TARGET) {
            flags.push("TARGET");
        }
        if self.contains(VisitState::REDUNDANT) {
            flags.push("REDUNDANT");
        }
        if flags.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", flags.join("|"))
        }
    }
}

/// What the traversal learned about one commit
#[derive(Debug, Clone)]
struct AncestorInfo {
    commit: SlimCommit,
    state: VisitState,
    distance_from_source: usize,
    distance_from_target: usize,
}

impl AncestorInfo {
    fn combined_distance(&self) -> usize {
        self.distance_from_source + self.distance_from_target
    }
}

/// Best common ancestor finder
///
/// Generic over the way commits are loaded, so it runs the same against the object
/// database and against in-memory graphs. The loader returns a [`SlimCommit`] with an
/// empty parent list for root commits.
pub struct BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Find the merge base of two commits.
    ///
    /// The result does not depend on the order of the arguments. `None` means the two
    /// histories share no commit at all.
    pub fn find_best_common_ancestor(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        if source_commit_id == target_commit_id {
            return Ok(Some(source_commit_id.clone()));
        }

        let mut ancestors = HashMap::<ObjectId, AncestorInfo>::new();
        self.walk(source_commit_id, VisitState::VISITED_FROM_SOURCE, &mut ancestors)?;
        self.walk(target_commit_id, VisitState::VISITED_FROM_TARGET, &mut ancestors)?;

        let common_ancestors = ancestors
            .iter()
            .filter(|(_, info)| info.state.contains(VisitState::VISITED_FROM_BOTH))
            .map(|(oid, _)| oid.clone())
            .collect::<Vec<_>>();

        tracing::trace!(count = common_ancestors.len(), "found common ancestors");

        Self::mark_redundant(&common_ancestors, &mut ancestors);

        let best = common_ancestors
            .iter()
            .filter_map(|oid| ancestors.get(oid))
            .filter(|info| !info.state.contains(VisitState::REDUNDANT))
            .inspect(|info| {
                tracing::trace!(
                    oid = %info.commit.oid,
                    distance = info.combined_distance(),
                    "best common ancestor candidate"
                )
            })
            .min_by(|left, right| {
                left.combined_distance()
                    .cmp(&right.combined_distance())
                    .then(left.commit.timestamp.cmp(&right.commit.timestamp))
                    .then(left.commit.oid.cmp(&right.commit.oid))
            })
            .map(|info| info.commit.oid.clone());

        Ok(best)
    }

    /// Breadth-first walk over every parent link, so the first visit of a commit is
    /// along its shortest path from `start`.
    fn walk(
        &self,
        start: &ObjectId,
        side: VisitState,
        ancestors: &mut HashMap<ObjectId, AncestorInfo>,
    ) -> anyhow::Result<()> {
        let mut queue = VecDeque::from([(start.clone(), 0usize)]);

        while let Some((oid, distance)) = queue.pop_front() {
            let info = match ancestors.entry(oid.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(AncestorInfo {
                    commit: (self.commit_loader)(&oid)?,
                    state: VisitState::NONE,
                    distance_from_source: usize::MAX,
                    distance_from_target: usize::MAX,
                }),
            };
            if info.state.contains(side) {
                continue;
            }

            info.state |= side;
            if side == VisitState::VISITED_FROM_SOURCE {
                info.distance_from_source = distance;
            } else {
                info.distance_from_target = distance;
            }

            tracing::trace!(%oid, state = ?info.state, distance, "visited commit");

            for parent in &info.commit.parents {
                queue.push_back((parent.clone(), distance + 1));
            }
        }

        Ok(())
    }

    /// Flag every strict ancestor of a common ancestor as redundant.
    ///
    /// Ancestors of a common ancestor are common ancestors themselves, so they are all
    /// already loaded. A walk stops at commits an earlier walk has flagged.
    fn mark_redundant(common_ancestors: &[ObjectId], ancestors: &mut HashMap<ObjectId, AncestorInfo>) {
        for oid in common_ancestors {
            let mut stack = ancestors
                .get(oid)
                .map(|info| info.commit.parents.clone())
                .unwrap_or_default();

            while let Some(parent) = stack.pop() {
                let Some(info) = ancestors.get_mut(&parent) else {
                    continue;
                };
                if info.state.contains(VisitState::REDUNDANT) {
                    continue;
                }

                info.state |= VisitState::REDUNDANT;
                stack.extend(info.commit.parents.iter().cloned());
            }
        }
    }
}
