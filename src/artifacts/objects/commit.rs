//! Commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - Parent commit ID(s) (none for the root commit, two for merge commits)
//! - A timestamp
//! - The snapshot mapping every tracked file name to its blob
//! - Commit message
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! date <unix-timestamp> <timezone>
//! file <blob-sha> <file-name>
//!
//! <commit message>
//! ```
//!
//! The commit ID is the hash of this complete record, so it is only computed
//! once every field is set.

use crate::artifacts::core::error::UserError;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, pack_with_header};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::snapshot::Snapshot;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset};
use std::io::BufRead;

/// Message of the commit every repository starts from
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Environment variable overriding the timestamp of new commits
pub const COMMIT_DATE_ENV: &str = "BITLET_COMMIT_DATE";

/// Slim representation of a commit
///
/// Contains only what graph traversals need (merge base finding, ancestry walks).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SlimCommit {
    /// The commit's object ID
    pub oid: ObjectId,
    /// The commit's parent object IDs
    pub parents: Vec<ObjectId>,
    /// Commit timestamp (needed for tie-breaking)
    pub timestamp: DateTime<FixedOffset>,
}

/// Commit object
///
/// An immutable node of the history graph carrying a full snapshot of the tracked files.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for the root commit, two for merge commits)
    parents: Vec<ObjectId>,
    /// Time the commit was made
    timestamp: DateTime<FixedOffset>,
    /// Every tracked file at this point in history
    snapshot: Snapshot,
    /// Commit message
    message: String,
}

impl Commit {
    /// The root commit: no parents, empty snapshot, fixed message and epoch timestamp.
    ///
    /// It is identical in every repository.
    pub fn root() -> Self {
        Commit {
            parents: Vec::new(),
            timestamp: DateTime::<chrono::Utc>::UNIX_EPOCH.fixed_offset(),
            snapshot: Snapshot::new(),
            message: ROOT_COMMIT_MESSAGE.to_string(),
        }
    }

    /// Create a regular (one parent) or merge (two parents) commit.
    ///
    /// Fails with [`UserError::EmptyCommitMessage`] if the message is blank.
    pub fn try_new(
        message: &str,
        parent: ObjectId,
        second_parent: Option<ObjectId>,
        snapshot: Snapshot,
        timestamp: DateTime<FixedOffset>,
    ) -> anyhow::Result<Self> {
        if message.trim().is_empty() {
            return Err(UserError::EmptyCommitMessage.into());
        }

        let parents = std::iter::once(parent).chain(second_parent).collect();

        Ok(Commit {
            parents,
            timestamp,
            snapshot,
            message: message.to_string(),
        })
    }

    /// Timestamp for a new commit: `BITLET_COMMIT_DATE` if set and parseable, now otherwise.
    pub fn timestamp_from_env() -> DateTime<FixedOffset> {
        std::env::var(COMMIT_DATE_ENV)
            .ok()
            .and_then(|date_str| {
                DateTime::parse_from_rfc2822(&date_str)
                    .or_else(|_| DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z"))
                    .ok()
            })
            .unwrap_or_else(|| chrono::Local::now().fixed_offset())
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.parents.get(1)
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }

    pub fn to_slim(&self, oid: ObjectId) -> SlimCommit {
        SlimCommit {
            oid,
            parents: self.parents.clone(),
            timestamp: self.timestamp,
        }
    }

    fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
        DateTime::parse_from_str(value, "%s %z")
            .with_context(|| format!("Invalid commit object: malformed date {:?}", value))
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![];

        for parent in &self.parents {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!(
            "date {} {}",
            self.timestamp.timestamp(),
            self.timestamp.format("%z")
        ));
        for (name, oid) in &self.snapshot {
            lines.push(format!("file {} {}", oid, name));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        pack_with_header(self.object_type(), lines.join("\n").as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)?;

        let (header, message) = content
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut snapshot = Snapshot::new();

        for line in header.lines() {
            let (keyword, value) = line
                .split_once(' ')
                .with_context(|| format!("Invalid commit object: malformed line {:?}", line))?;

            match keyword {
                "parent" => parents.push(ObjectId::try_parse(value.to_string())?),
                "date" => timestamp = Some(Self::parse_timestamp(value)?),
                "file" => {
                    let (oid, name) = value
                        .split_once(' ')
                        .context("Invalid commit object: malformed file line")?;
                    snapshot.insert(name.to_string(), ObjectId::try_parse(oid.to_string())?);
                }
                _ => anyhow::bail!("Invalid commit object: unknown field {:?}", keyword),
            }
        }

        Ok(Commit {
            parents,
            timestamp: timestamp.context("Invalid commit object: missing date line")?,
            snapshot,
            message: message.to_string(),
        })
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
