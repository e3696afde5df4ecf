//! Repository handle
//!
//! Owns every area of a repository (objects, branches, staging sets, working tree)
//! together with the writer user-facing output goes to. Commands are implemented as
//! methods on [`Repository`].

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::areas::stage::Stage;
use crate::areas::storage::{DiskStorage, MemoryStorage, Storage};
use crate::areas::workspace::Workspace;
use crate::artifacts::log::commit_graph::CommitGraph;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::status_info::{Status, StatusInfo};
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;

/// Name of the metadata directory inside the repository root
pub const METADATA_DIR: &str = ".bitlet";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    database: Database,
    refs: Refs,
    stage: Stage,
    workspace: Workspace,
}

impl Repository {
    pub fn new(path: &str, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = Path::new(path)
            .canonicalize()
            .with_context(|| format!("Unable to open repository directory {}", path))?;
        let metadata = path.join(METADATA_DIR);

        let storage = |area: &str| -> Box<dyn Storage> {
            Box::new(DiskStorage::new(metadata.join(area).into_boxed_path()))
        };

        Ok(Repository {
            writer: RefCell::new(writer),
            database: Database::new(storage("objects")),
            refs: Refs::new(
                storage("branches"),
                Box::new(DiskStorage::new(metadata.clone().into_boxed_path())),
            ),
            stage: Stage::new(storage("staged_for_addition"), storage("staged_for_removal")),
            workspace: Workspace::new(Box::new(DiskStorage::new(path.clone().into_boxed_path()))),
            path: path.into_boxed_path(),
        })
    }

    /// A repository whose every area, working tree included, lives in memory.
    pub fn in_memory(writer: Box<dyn std::io::Write>) -> Self {
        Repository {
            path: Path::new(".").into(),
            writer: RefCell::new(writer),
            database: Database::new(Box::new(MemoryStorage::new())),
            refs: Refs::new(
                Box::new(MemoryStorage::new()),
                Box::new(MemoryStorage::new()),
            ),
            stage: Stage::new(
                Box::new(MemoryStorage::new()),
                Box::new(MemoryStorage::new()),
            ),
            workspace: Workspace::new(Box::new(MemoryStorage::new())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn commit_graph(&'_ self) -> CommitGraph<'_> {
        CommitGraph::new(&self.database)
    }

    /// Inspect the staging area and working tree against HEAD.
    pub fn status_info(&self) -> anyhow::Result<StatusInfo> {
        Status::new(self).initialize()
    }

    pub fn is_initialized(&self) -> anyhow::Result<bool> {
        self.refs.is_initialized()
    }

    pub fn ensure_initialized(&self) -> anyhow::Result<()> {
        if !self.is_initialized()? {
            anyhow::bail!(
                "not a bitlet repository (or not initialized): {}",
                self.path.display()
            );
        }

        Ok(())
    }

    /// The commit HEAD points to, with its ID.
    pub fn head_commit(&self) -> anyhow::Result<(ObjectId, Commit)> {
        let head = self.refs.read_head()?;
        let commit = self
            .database
            .parse_object_as_commit(&head)
            .with_context(|| format!("HEAD points to an unreadable commit {}", head))?;

        Ok((head, commit))
    }
}
