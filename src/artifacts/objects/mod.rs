//! Git object types and operations
//!
//! All content is stored as objects identified by SHA-1 hashes:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//!
//! Commit objects are never constructed here; the `commit` kind only appears
//! as the implied type of submodule (gitlink) tree entries.
//!
//! All objects implement serialization/deserialization for the loose object
//! format: `<type> <size>\0<content>`

pub mod blob;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
