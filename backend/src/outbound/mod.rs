//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: process-local repositories for database-free runs and tests
//! - **credentials**: Argon2id password hashing and HS256 bearer tokens
//!
//! Adapters translate between domain types and infrastructure representations
//! and contain no business rules.

pub mod credentials;
pub mod memory;
pub mod persistence;
