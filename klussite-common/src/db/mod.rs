//! Database initialization
//!
//! Opens (or creates) the SQLite database and applies the schema. Table
//! creation is idempotent, so calling it on every startup is safe.

pub mod init;
pub mod models;

pub use init::{create_all_tables, init_database};
