//! Embedded key-value store backed by a single redb file.
//!
//! Every record lives in one named bucket (a redb table). Each operation runs
//! in its own transaction: redb serializes writers, allows concurrent readers,
//! and commits copy-on-write so a crash mid-write never loses committed data.

use redb::{Database, ReadableTable, TableDefinition};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info};

use crate::error::StoreError;

/// Durable, bucket-scoped string → string store.
///
/// Cloning is cheap and every clone shares the same file handle. After
/// [`KvStore::close`] all clones fail with [`StoreError::Closed`].
#[derive(Clone)]
pub struct KvStore {
    inner: Arc<Inner>,
}

struct Inner {
    path: PathBuf,
    bucket: String,
    db: RwLock<Option<Database>>,
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore")
            .field("path", &self.inner.path)
            .field("bucket", &self.inner.bucket)
            .field("open", &self.is_open())
            .finish()
    }
}

fn bucket_table(bucket: &str) -> TableDefinition<'_, &'static str, &'static str> {
    TableDefinition::new(bucket)
}

impl KvStore {
    /// Opens or creates the store file at `path` and ensures `bucket` exists.
    ///
    /// On Unix a newly created file gets the permission bits in `mode`
    /// (e.g. `0o600`). Reopening an existing file with the same bucket name
    /// keeps all previously committed records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Open`] if:
    /// - the file cannot be created or read (permissions, missing directory, disk full)
    /// - the file is already held by another open store
    /// - the file is not a valid store
    /// - `bucket` is empty
    pub fn open(path: impl AsRef<Path>, mode: u32, bucket: &str) -> Result<Self, StoreError> {
        let path = path.as_ref();

        if bucket.is_empty() {
            return Err(StoreError::open(path, "bucket name must not be empty"));
        }

        let file = open_file(path, mode).map_err(|e| StoreError::open(path, e))?;
        let db = Database::builder()
            .create_file(file)
            .map_err(|e| StoreError::open(path, e))?;

        let txn = db.begin_write().map_err(|e| StoreError::open(path, e))?;
        txn.open_table(bucket_table(bucket))
            .map_err(|e| StoreError::open(path, e))?;
        txn.commit().map_err(|e| StoreError::open(path, e))?;

        info!(path = %path.display(), bucket, "Store opened");

        Ok(Self {
            inner: Arc::new(Inner {
                path: path.to_path_buf(),
                bucket: bucket.to_string(),
                db: RwLock::new(Some(db)),
            }),
        })
    }

    /// Writes `value` under `key`, replacing any previous value.
    pub fn insert(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.with_db(|db| {
            let txn = db.begin_write()?;
            {
                let mut table = txn.open_table(self.table())?;
                table.insert(key, value)?;
            }
            txn.commit()?;
            debug!(key, bucket = %self.inner.bucket, "Record stored");
            Ok(())
        })
    }

    /// Returns the value stored under `key`, or an empty string when absent.
    pub fn lookup(&self, key: &str) -> Result<String, StoreError> {
        self.with_db(|db| {
            let txn = db.begin_read()?;
            let table = txn.open_table(self.table())?;
            let value = table
                .get(key)?
                .map(|guard| guard.value().to_string())
                .unwrap_or_default();
            Ok(value)
        })
    }

    /// Removes `key`. Removing an absent key is a no-op.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.with_db(|db| {
            let txn = db.begin_write()?;
            let removed = {
                let mut table = txn.open_table(self.table())?;
                table.remove(key)?.is_some()
            };
            txn.commit()?;
            debug!(key, removed, bucket = %self.inner.bucket, "Record deleted");
            Ok(())
        })
    }

    /// Returns every record in the bucket in key order.
    pub fn entries(&self) -> Result<Vec<(String, String)>, StoreError> {
        self.with_db(|db| {
            let txn = db.begin_read()?;
            let table = txn.open_table(self.table())?;
            let mut entries = Vec::new();
            for item in table.iter()? {
                let (key, value) = item?;
                entries.push((key.value().to_string(), value.value().to_string()));
            }
            Ok(entries)
        })
    }

    /// Releases the file handle.
    ///
    /// Waits for in-flight operations on other clones to finish. Closing an
    /// already closed store is a no-op.
    pub fn close(&self) -> Result<(), StoreError> {
        let mut guard = self
            .inner
            .db
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if guard.take().is_some() {
            info!(path = %self.inner.path.display(), "Store closed");
        }
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.inner
            .db
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn bucket(&self) -> &str {
        &self.inner.bucket
    }

    fn table(&self) -> TableDefinition<'_, &'static str, &'static str> {
        bucket_table(&self.inner.bucket)
    }

    fn with_db<T>(
        &self,
        op: impl FnOnce(&Database) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let guard = self
            .inner
            .db
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(db) => op(db),
            None => Err(StoreError::Closed),
        }
    }
}

fn open_file(path: &Path, mode: u32) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true).truncate(false);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path)
}
