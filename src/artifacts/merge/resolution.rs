//! Per-file merge resolution
//!
//! Every file name present in the base (split point), current or other snapshot is
//! classified by comparing the three blob IDs it maps to:
//!
//! | base | current | other | outcome |
//! |------|---------|-------|---------|
//! | S | S | O≠S | take other |
//! | S | C≠S | O≠S, O≠C | conflict |
//! | any | C | O==C | nothing |
//! | S | C≠S | S | nothing (current changed it, other did not) |
//! | S | - | O≠S | conflict |
//! | S | - | S | nothing (stays removed) |
//! | - | - | O | take other (new file) |
//! | - | C | O≠C | conflict |
//! | S | S | - | remove |
//! | S | C≠S | - | conflict |
//! | S | - | - | nothing |
//! | - | C | - | nothing |

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::snapshot::Snapshot;
use bytes::{BufMut, Bytes, BytesMut};
use std::collections::{BTreeMap, BTreeSet};

pub const CONFLICT_MARKER_HEAD: &str = "<<<<<<< HEAD\n";
pub const CONFLICT_MARKER_SEPARATOR: &str = "=======\n";
pub const CONFLICT_MARKER_END: &str = ">>>>>>>";

/// What the merge does to one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MergeAction {
    /// Take the other branch's version
    Checkout,
    /// Delete the file: the other branch removed it and current left it untouched
    Remove,
    /// Both sides changed the file differently
    Conflict,
    /// Keep the current version (or absence)
    NoAction,
}

impl MergeAction {
    pub fn classify(
        base: Option<&ObjectId>,
        current: Option<&ObjectId>,
        other: Option<&ObjectId>,
    ) -> Self {
        match (base, current, other) {
            (_, Some(current), Some(other)) if current == other => MergeAction::NoAction,
            (Some(base), Some(current), Some(other)) => {
                if current == base {
                    MergeAction::Checkout
                } else if other == base {
                    MergeAction::NoAction
                } else {
                    MergeAction::Conflict
                }
            }
            (Some(base), None, Some(other)) if other == base => MergeAction::NoAction,
            (Some(_), None, Some(_)) => MergeAction::Conflict,
            (None, None, Some(_)) => MergeAction::Checkout,
            (None, Some(_), Some(_)) => MergeAction::Conflict,
            (Some(base), Some(current), None) if current == base => MergeAction::Remove,
            (Some(_), Some(_), None) => MergeAction::Conflict,
            (_, _, None) => MergeAction::NoAction,
        }
    }
}

/// Classification of every file involved in a merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    actions: BTreeMap<String, MergeAction>,
}

impl MergePlan {
    pub fn new(base: &Snapshot, current: &Snapshot, other: &Snapshot) -> Self {
        let names = base
            .names()
            .chain(current.names())
            .chain(other.names())
            .collect::<BTreeSet<_>>();

        let actions = names
            .into_iter()
            .map(|name| {
                let action = MergeAction::classify(base.get(name), current.get(name), other.get(name));
                tracing::debug!(file = %name, ?action, "classified file");

                (name.clone(), action)
            })
            .collect();

        MergePlan { actions }
    }

    pub fn action(&self, name: &str) -> Option<MergeAction> {
        self.actions.get(name).copied()
    }

    /// Names classified as `action`, sorted.
    pub fn files_with(&self, action: MergeAction) -> impl Iterator<Item = &str> {
        self.actions
            .iter()
            .filter(move |(_, file_action)| **file_action == action)
            .map(|(name, _)| name.as_str())
    }

    pub fn has_conflicts(&self) -> bool {
        self.files_with(MergeAction::Conflict).next().is_some()
    }
}

/// Content written for a conflicted file.
///
/// An absent side is empty. A non-empty side missing a final newline gets one, so the
/// markers always start on their own line.
pub fn conflict_content(current: Option<&[u8]>, other: Option<&[u8]>) -> Bytes {
    let mut content = BytesMut::new();

    content.put_slice(CONFLICT_MARKER_HEAD.as_bytes());
    put_side(&mut content, current);
    content.put_slice(CONFLICT_MARKER_SEPARATOR.as_bytes());
    put_side(&mut content, other);
    content.put_slice(CONFLICT_MARKER_END.as_bytes());

    content.freeze()
}

fn put_side(content: &mut BytesMut, side: Option<&[u8]>) {
    let side = side.unwrap_or_default();

    content.put_slice(side);
    if !side.is_empty() && !side.ends_with(b"\n") {
        content.put_u8(b'\n');
    }
}
