//! Commit history
//!
//! - `commit_graph`: commit creation and traversal over the object database
//! - `rev_list`: first-parent history walk used by `log`

pub mod commit_graph;
pub mod rev_list;
