//! Database layer (SQLite).

pub mod sqlite;

pub use sqlite::{QueryRows, SqliteDb};
