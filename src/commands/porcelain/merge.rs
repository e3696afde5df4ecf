use crate::areas::repository::Repository;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::error::UserError;
use crate::artifacts::merge::resolution::{conflict_content, MergeAction, MergePlan};
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Merge the branch `other_name` into the active branch.
    ///
    /// Depending on where the split point lies this reports that nothing needs to be
    /// done, fast-forwards, or resolves every file and records a merge commit whose
    /// second parent is the other branch's tip.
    pub fn merge(&self, other_name: &str) -> anyhow::Result<()> {
        self.ensure_initialized()?;

        if !self.stage().is_clear()? {
            return Err(UserError::UncommittedChanges.into());
        }

        let other = self
            .refs()
            .find_branch(other_name)?
            .ok_or(UserError::BranchNotFound)?;
        let current_branch = self.refs().active_branch()?;
        if other.name == current_branch.name {
            return Err(UserError::MergeWithSelf.into());
        }

        let (current_oid, current) = self.head_commit()?;
        let other_commit = self.commit_graph().load(&other.pointer)?;

        let untracked = Migration::new(self, current.snapshot(), other_commit.snapshot())
            .untracked_files_in_the_way()?;
        if !untracked.is_empty() {
            tracing::debug!(files = ?untracked, "untracked files block the merge");
            return Err(UserError::UntrackedFileInTheWay.into());
        }

        let base_oid = self
            .commit_graph()
            .merge_base(&current_oid, &other.pointer)?
            .ok_or(UserError::NoCommonAncestor)?;
        tracing::debug!(base = %base_oid, current = %current_oid, other = %other.pointer, "found split point");

        if base_oid == other.pointer {
            writeln!(self.writer(), "Given branch is an ancestor of the current branch.")?;
            return Ok(());
        }

        if base_oid == current_oid {
            self.switch_to(&other)?;
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }

        let base = self.commit_graph().load(&base_oid)?;
        let plan = MergePlan::new(base.snapshot(), current.snapshot(), other_commit.snapshot());
        self.apply_merge_plan(&plan, &current, &other_commit)?;

        let message = format!("Merged {} into {}.", other.name, current_branch.name);
        self.write_commit(&message, Some(&other.pointer))?;

        if plan.has_conflicts() {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }

        Ok(())
    }

    /// Write the outcome of every file into the working tree and the staging area.
    fn apply_merge_plan(&self, plan: &MergePlan, current: &Commit, other: &Commit) -> anyhow::Result<()> {
        let database = self.database();
        let workspace = self.workspace();
        let stage = self.stage();

        // a file to remove must still be there, checked up front so a failure leaves
        // the working tree untouched
        for name in plan.files_with(MergeAction::Remove) {
            if !workspace.contains(name)? {
                anyhow::bail!("{} is tracked by HEAD but missing from the working tree", name);
            }
        }

        for name in plan.files_with(MergeAction::Remove) {
            let head_content = database
                .read_tracked(current.snapshot(), name)?
                .with_context(|| format!("{} is not tracked by HEAD", name))?;

            workspace.remove_file(name)?;
            stage.stage_removal(name, head_content)?;
        }

        for name in plan.files_with(MergeAction::Checkout) {
            let content = database
                .read_tracked(other.snapshot(), name)?
                .with_context(|| format!("{} is not tracked by the merged branch", name))?;

            workspace.write_file(name, content.clone())?;
            stage.stage_addition(name, content)?;
        }

        for name in plan.files_with(MergeAction::Conflict) {
            let current_content = database.read_tracked(current.snapshot(), name)?;
            let other_content = database.read_tracked(other.snapshot(), name)?;
            let content = conflict_content(current_content.as_deref(), other_content.as_deref());

            tracing::info!(file = name, "merge conflict");

            workspace.write_file(name, content.clone())?;
            stage.stage_addition(name, content)?;
        }

        Ok(())
    }
}
