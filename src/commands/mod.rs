//! Command implementations
//!
//! Every user-facing command is a method on [`crate::areas::repository::Repository`],
//! one file per command under `porcelain`. Commands write their output to the
//! repository's writer and report user-facing failures as
//! [`crate::artifacts::core::error::UserError`].

pub mod porcelain;
