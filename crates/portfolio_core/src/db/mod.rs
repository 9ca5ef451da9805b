//! SQLite bootstrap for the durable key-value slot file.
//!
//! # Responsibility
//! - Open connections whose `kv_entries` table is ready for slot access.
//! - Classify schema mismatches between the slot file and this build.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - No slot reads/writes happen before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure opening or migrating the slot database.
#[derive(Debug)]
pub enum DbError {
    /// Driver-level failure outside a migration step.
    Sqlite(rusqlite::Error),
    /// A migration script failed; the transaction was rolled back.
    MigrationFailed { version: u32, source: rusqlite::Error },
    /// The file was written by a newer build; it is never downgraded.
    SchemaAhead { found: u32, supported: u32 },
    /// The connection was handed over without running migrations.
    SchemaBehind { found: u32, required: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "slot database error: {err}"),
            Self::MigrationFailed { version, source } => {
                write!(f, "slot schema migration {version} failed: {source}")
            }
            Self::SchemaAhead { found, supported } => write!(
                f,
                "slot database schema {found} is newer than supported {supported}"
            ),
            Self::SchemaBehind { found, required } => write!(
                f,
                "slot database schema {found} is behind required {required}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::MigrationFailed { source: err, .. } => Some(err),
            Self::SchemaAhead { .. } | Self::SchemaBehind { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
