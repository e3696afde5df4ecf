use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

/// Snapshot of everything `status` reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    /// Every branch name, sorted, paired with whether it is the active one
    pub(crate) branches: Vec<(String, bool)>,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self) -> anyhow::Result<StatusInfo> {
        let refs = self.repository.refs();
        let stage = self.repository.stage();
        let workspace = self.repository.workspace();

        let active = refs.active_branch()?;
        let branches = refs
            .list_branches()?
            .into_iter()
            .map(|branch| {
                let is_active = branch.name == active.name;
                (branch.name.to_string(), is_active)
            })
            .collect();

        let (_, head) = self.repository.head_commit()?;
        let head_snapshot = head.snapshot();
        let staged = stage.additions()?;
        let removed_files = stage.removals()?;
        let working_files = workspace.list_files()?.into_iter().collect::<FileSet>();

        let mut workspace_changeset = ChangeSet::new();
        let mut untracked_files = FileSet::new();

        for name in &working_files {
            let content = workspace.read_file(name)?.unwrap_or_default();

            match (staged.get(name), head_snapshot.get(name)) {
                (Some(staged_content), _) => {
                    if *staged_content != content {
                        workspace_changeset.insert(name.clone(), WorkspaceChangeType::Modified);
                    }
                }
                (None, Some(head_oid)) if !removed_files.contains(name) => {
                    if Blob::new(content).object_id()? != *head_oid {
                        workspace_changeset.insert(name.clone(), WorkspaceChangeType::Modified);
                    }
                }
                // untracked, or re-created after being staged for removal
                (None, _) => {
                    untracked_files.insert(name.clone());
                }
            }
        }

        let vanished = staged
            .keys()
            .chain(head_snapshot.names().filter(|name| !removed_files.contains(*name)))
            .filter(|name| !working_files.contains(*name));
        for name in vanished {
            workspace_changeset.insert(name.clone(), WorkspaceChangeType::Deleted);
        }

        Ok(StatusInfo {
            branches,
            staged_files: staged.into_keys().collect(),
            removed_files,
            workspace_changeset,
            untracked_files,
        })
    }
}

impl std::fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Branches ===")?;
        for (name, is_active) in &self.branches {
            if *is_active {
                writeln!(f, "*{}", name)?;
            } else {
                writeln!(f, "{}", name)?;
            }
        }
        writeln!(f)?;

        writeln!(f, "=== Staged Files ===")?;
        for name in &self.staged_files {
            writeln!(f, "{}", name)?;
        }
        writeln!(f)?;

        writeln!(f, "=== Removed Files ===")?;
        for name in &self.removed_files {
            writeln!(f, "{}", name)?;
        }
        writeln!(f)?;

        writeln!(f, "=== Modifications Not Staged For Commit ===")?;
        for (name, change) in &self.workspace_changeset {
            writeln!(f, "{} ({})", name, change)?;
        }
        writeln!(f)?;

        writeln!(f, "=== Untracked Files ===")?;
        for name in &self.untracked_files {
            writeln!(f, "{}", name)?;
        }
        writeln!(f)
    }
}
