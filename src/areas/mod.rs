//! Core repository components
//!
//! This module contains the fundamental building blocks of a repository:
//!
//! - `storage`: Key-value persistence shared by every other area (on disk or in memory)
//! - `database`: Content-addressed object store for blobs and commits
//! - `refs`: Branch registry (named pointers, active branch, HEAD)
//! - `stage`: Staging area (pending additions and removals)
//! - `workspace`: Working directory file access
//! - `repository`: High-level repository handle tying everything together

pub mod database;
pub mod refs;
pub mod repository;
pub mod stage;
pub mod storage;
pub mod workspace;
