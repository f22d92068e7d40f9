//! # gridminer-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the `OptionsStore` port defined in `gridminer-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between entry options and database rows (one row per key, JSON value)
//!
//! ## Dependency rule
//! Depends on `gridminer-app` (for port traits) and `gridminer-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

mod error;
mod options_store;
mod pool;

pub use error::StorageError;
pub use options_store::SqliteOptionsStore;
pub use pool::{Config, Database};
