//! Working tree status inspection
//!
//! Compares the working tree against the HEAD snapshot and the staging area.
//!
//! ## Components
//!
//! - `file_change`: kinds of unstaged changes
//! - `status_info`: status computation and report

pub mod file_change;
pub mod status_info;
