//! Key-value persistence capability used by the project store.
//!
//! # Responsibility
//! - Define the injected `get`/`set` byte-slot contract.
//! - Provide an in-memory backend and a SQLite-backed durable backend.
//!
//! # Invariants
//! - `set` replaces the whole value stored under a key.
//! - A failed `set` leaves the previous value readable.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure raised by a key-value backend.
#[derive(Debug)]
pub enum StorageError {
    /// Write would exceed the backend byte quota.
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
    /// SQLite transport or schema failure.
    Db(DbError),
    /// Any other backend specific failure.
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QuotaExceeded { key, needed, limit } => write!(
                f,
                "storage quota exceeded writing `{key}`: needs {needed} bytes, limit {limit}"
            ),
            Self::Db(err) => write!(f, "{err}"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::QuotaExceeded { .. } | Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed byte slot storage, modeled on browser local storage.
pub trait KeyValueStore {
    /// Returns the bytes stored under `key`, or `None` when the slot is empty.
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;
    /// Replaces the bytes stored under `key`.
    fn set(&mut self, key: &str, value: &[u8]) -> StorageResult<()>;
    /// Clears the slot. Removing an empty slot is not an error.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &mut T {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
