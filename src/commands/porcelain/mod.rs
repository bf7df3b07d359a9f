//! Porcelain commands (user-facing operations)

pub mod init;
