//! SQLite storage implementation for Goldfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `goldfolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - A serialized write actor so every ledger insert is one transaction
//! - Repository implementations for accounts and investments
//!
//! This crate is the only place in the application where Diesel
//! dependencies exist; everything above it works with traits.

pub mod accounts;
pub mod db;
pub mod errors;
pub mod investments;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from goldfolio-core for convenience
pub use goldfolio_core::errors::{DatabaseError, Error, Result};
