//! User-facing error outcomes
//!
//! Operations return `anyhow::Result`. When an operation is refused because of
//! something the user asked for (a missing branch, an untracked file in the way, ...)
//! the error carried inside the `anyhow::Error` is a [`UserError`]. Its message is
//! printed as-is and the command still terminates successfully. Any other error is
//! fatal: it means the repository's persisted state is broken or unreadable.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("A Bitlet version-control system already exists in the current directory.")]
    AlreadyInitialized,
    #[error("File does not exist.")]
    FileDoesNotExist,
    #[error("No reason to remove the file.")]
    NothingToRemove,
    #[error("Please enter a commit message.")]
    EmptyCommitMessage,
    #[error("No changes added to the commit.")]
    NothingToCommit,
    #[error("Found no commit with that message.")]
    NoMatchingCommit,
    #[error("No such branch exists.")]
    NoSuchBranch,
    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,
    #[error("Please enter a valid branch name.")]
    InvalidBranchName,
    #[error("A branch with that name already exists.")]
    BranchAlreadyExists,
    #[error("A branch with that name does not exist.")]
    BranchNotFound,
    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,
    #[error("No commit with that id exists.")]
    NoSuchCommit,
    #[error("Commit id {0} is ambiguous.")]
    AmbiguousCommitId(String),
    #[error("File does not exist in that commit.")]
    FileNotInCommit,
    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileInTheWay,
    #[error("You have uncommitted changes.")]
    UncommittedChanges,
    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,
    #[error("There are no common ancestors between the current branch and given branch.")]
    NoCommonAncestor,
}

/// Find the [`UserError`] carried by `error`, if it is one.
pub fn as_user_error(error: &anyhow::Error) -> Option<&UserError> {
    error.downcast_ref::<UserError>()
}
