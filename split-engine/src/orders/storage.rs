//! redb-backed key-value store for saved parties
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `kv` | storage key | raw bytes | One JSON document per key |
//!
//! The party list lives under a single key as one JSON array, so a save is a
//! read-modify-write of that value inside one write transaction.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::error::AppError;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// key = storage key, value = raw document bytes
const KV_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Serialization(e) => AppError::with_message(
                shared::error::ErrorCode::SerializationError,
                e.to_string(),
            ),
            other => AppError::storage(other.to_string()),
        }
    }
}

/// Key-value storage backed by redb
#[derive(Clone)]
pub struct KvStorage {
    db: Arc<Database>,
}

impl KvStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init(db)
    }

    /// In-memory database, for tests
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init(db)
    }

    fn init(db: Database) -> StorageResult<Self> {
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(KV_TABLE)?;
        }
        write_txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Raw value under `key`
    pub fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(KV_TABLE)?;
        Ok(table.get(key)?.map(|v| v.value().to_vec()))
    }

    pub fn put(&self, key: &str, value: &[u8]) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Read-modify-write of one key inside a single write transaction.
    ///
    /// `f` receives the current value (if any) and returns the new one.
    pub fn update<F>(&self, key: &str, f: F) -> StorageResult<()>
    where
        F: FnOnce(Option<&[u8]>) -> StorageResult<Vec<u8>>,
    {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(KV_TABLE)?;
            let current = table.get(key)?.map(|v| v.value().to_vec());
            let next = f(current.as_deref())?;
            table.insert(key, next.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Delete `key`, returning whether it existed
    pub fn remove(&self, key: &str) -> StorageResult<bool> {
        let write_txn = self.db.begin_write()?;
        let existed = {
            let mut table = write_txn.open_table(KV_TABLE)?;
            table.remove(key)?.is_some()
        };
        write_txn.commit()?;
        Ok(existed)
    }
}
