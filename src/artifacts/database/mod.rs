//! Database entry types
//!
//! This module contains types used when reading objects from the database.
//! Database entries represent references to objects with their mode information.

pub mod database_entry;
