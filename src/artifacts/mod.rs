//! Git data structures and algorithms
//!
//! This module contains the core types and algorithms:
//!
//! - `database`: Database entry types
//! - `objects`: Git object types (blob, tree)
//! - `staging`: Entry modes and the ephemeral staging index
//! - `treebuild`: The tree construction engine behind `mktree`

pub mod database;
pub mod objects;
pub mod staging;
pub mod treebuild;
