//! Three-way merge
//!
//! - `bca_finder`: merge base (split point) discovery
//! - `resolution`: per-file classification and conflict content

pub mod bca_finder;
pub mod resolution;
