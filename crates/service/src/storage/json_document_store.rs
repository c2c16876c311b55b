use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

/// What a mutation closure decided about the document it was handed.
pub enum Mutation<R> {
    /// Persist the modified document, then return the value.
    Commit(R),
    /// Leave the file untouched and return the value.
    Discard(R),
}

/// Single JSON document persisted as the entire content of one file.
///
/// Nothing is cached: every call reads the file again. Reads share a lock and
/// writes hold it exclusively across the whole read → mutate → write span, so
/// concurrent writers inside one process cannot lose each other's updates.
/// Other processes writing the same file are not coordinated.
pub struct JsonDocumentStore {
    file_path: PathBuf,
    lock: RwLock<()>,
}

impl JsonDocumentStore {
    /// Point the store at a file. The file is not touched until first use.
    pub fn new<P: Into<PathBuf>>(path: P) -> Arc<Self> {
        Arc::new(Self { file_path: path.into(), lock: RwLock::new(()) })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Write `doc` if the file does not exist yet; returns whether it was written.
    pub async fn seed_if_missing<T: Serialize>(&self, doc: &T) -> Result<bool, ServiceError> {
        let _guard = self.lock.write().await;
        if fs::try_exists(&self.file_path).await? {
            return Ok(false);
        }
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        self.write_unlocked(doc).await?;
        Ok(true)
    }

    /// Read and parse the whole document.
    pub async fn load<T: DeserializeOwned>(&self) -> Result<T, ServiceError> {
        let _guard = self.lock.read().await;
        self.read_unlocked().await
    }

    /// Read the document, let `f` mutate it, and rewrite the file on [`Mutation::Commit`].
    /// An error from `f` leaves the file untouched.
    pub async fn modify<T, R, F>(&self, f: F) -> Result<R, ServiceError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T) -> Result<Mutation<R>, ServiceError>,
    {
        let _guard = self.lock.write().await;
        let mut doc: T = self.read_unlocked().await?;
        match f(&mut doc)? {
            Mutation::Commit(out) => {
                self.write_unlocked(&doc).await?;
                Ok(out)
            }
            Mutation::Discard(out) => Ok(out),
        }
    }

    async fn read_unlocked<T: DeserializeOwned>(&self) -> Result<T, ServiceError> {
        let bytes = fs::read(&self.file_path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_unlocked<T: Serialize>(&self, doc: &T) -> Result<(), ServiceError> {
        let data = serde_json::to_vec(doc)?;
        // fs::write truncates, so a shorter document leaves no stale tail behind
        fs::write(&self.file_path, &data).await?;
        debug!(path = %self.file_path.display(), bytes = data.len(), "document written");
        Ok(())
    }
}
