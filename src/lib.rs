//! A miniature local version-control engine.
//!
//! The crate is split the same way a repository is:
//!
//! - `areas`: persistent parts of a repository (objects, branches, staging, working tree)
//! - `artifacts`: data types and algorithms operating on those areas
//! - `commands`: user-facing commands, each implemented on [`areas::repository::Repository`]

pub mod areas;
pub mod artifacts;
pub mod commands;
