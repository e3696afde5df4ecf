//! Data structures and algorithms
//!
//! - `branch`: Branch names
//! - `checkout`: Moving the working tree between snapshots
//! - `core`: Errors shared by every command
//! - `log`: Commit graph creation and traversal
//! - `merge`: Split-point search and per-file merge resolution
//! - `objects`: Stored object types (blob, commit) and their IDs
//! - `status`: Working tree status inspection

pub mod branch;
pub mod checkout;
pub mod core;
pub mod log;
pub mod merge;
pub mod objects;
pub mod status;
