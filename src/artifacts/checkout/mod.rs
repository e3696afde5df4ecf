//! Checkout operations
//!
//! Switching the working tree from one snapshot to another is planned as a
//! [`migration::Migration`]: every file is classified as added, deleted or modified,
//! and untracked files that would be overwritten abort the move before any change
//! is made to the working tree.

pub mod migration;
