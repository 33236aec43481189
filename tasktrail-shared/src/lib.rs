//! # Tasktrail Shared Library
//!
//! This crate contains the types and business logic shared by the Tasktrail
//! API server and its integration tests.
//!
//! ## Module Organization
//!
//! - `models`: Database models and their CRUD operations
//! - `auth`: Password hashing, session tokens, and request authentication
//! - `query`: Owner-scoped task filter composition
//! - `db`: Connection pooling and migrations

pub mod auth;
pub mod db;
pub mod models;
pub mod query;

/// Current version of the Tasktrail shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
