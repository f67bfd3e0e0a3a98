//! Durable Storage Module
//!
//! File-backed key/value storage for client state that must survive restarts.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tracing::{info, error, debug};

/// Key under which the bearer token is persisted
pub const TOKEN_KEY: &str = "token";

/// JSON-encoded values stored as `<key>.dat` files in one directory
#[derive(Debug)]
pub struct DurableStorage {
    storage_path: PathBuf,
}

impl DurableStorage {
    /// Create storage rooted at `storage_path`, creating the directory if needed
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();

        if let Err(e) = std::fs::create_dir_all(&storage_path) {
            error!("Failed to create storage directory: {}", e);
        }

        debug!("Durable storage initialized at: {:?}", storage_path);

        Self { storage_path }
    }

    /// Directory holding the stored files
    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Save a value under `key`, replacing any previous value
    pub fn save<T: Serialize>(&self, key: &str, data: &T) -> Result<(), StorageError> {
        let json = serde_json::to_vec(data)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let file_path = self.file_path(key);
        std::fs::write(&file_path, json)
            .map_err(|e| StorageError::Io(e.to_string()))?;
        restrict_permissions(&file_path);

        info!("Saved data for key: {}", key);
        Ok(())
    }

    /// Load the value stored under `key`
    pub fn load<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<T, StorageError> {
        let file_path = self.file_path(key);

        let bytes = match std::fs::read(&file_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(key.to_string()));
            }
            Err(e) => return Err(StorageError::Io(e.to_string())),
        };

        serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Delete stored data; deleting a missing key is not an error
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        let file_path = self.file_path(key);

        if file_path.exists() {
            std::fs::remove_file(&file_path)
                .map_err(|e| StorageError::Io(e.to_string()))?;
            info!("Deleted stored data for key: {}", key);
        }

        Ok(())
    }

    /// Check if key exists
    pub fn exists(&self, key: &str) -> bool {
        self.file_path(key).exists()
    }

    fn file_path(&self, key: &str) -> PathBuf {
        self.storage_path.join(format!("{}.dat", key))
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(e) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)) {
        error!("Failed to restrict permissions on {:?}: {}", path, e);
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("No stored data for key: {0}")]
    NotFound(String),
}
