//! Stored object types
//!
//! Everything the repository stores immutably is an object identified by the SHA-1
//! hash of its serialized form. There are two kinds:
//!
//! - **Blob**: File content (raw bytes)
//! - **Commit**: Snapshot of every tracked file plus message, timestamp and parent links
//!
//! All objects share the serialized layout `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod snapshot;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated form used in log output
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
