//! Database module: models and schema for persistent storage.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `sqlite.rs`: `SnippetStorage`, the only owner of persisted records

pub mod models;
pub mod schema;
pub mod sqlite;

pub use sqlite::SnippetStorage;
