//! Porcelain commands
//!
//! ## Commands
//!
//! - `init`: Create a repository with a root commit and a `master` branch
//! - `add`: Stage a file for addition
//! - `rm`: Unstage a file or stage its removal
//! - `commit`: Snapshot the staged changes
//! - `log`: Show the first-parent history of HEAD
//! - `global_log`: Show every commit ever made
//! - `find`: Print the IDs of commits with a given message
//! - `status`: Show branches, staged changes and working tree changes
//! - `checkout`: Restore a file or switch branches
//! - `branch`: Create a branch at HEAD
//! - `rm_branch`: Delete a branch
//! - `reset`: Move the active branch to a commit
//! - `merge`: Merge another branch into the active one

pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod find;
pub mod global_log;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod rm;
pub mod rm_branch;
pub mod status;
