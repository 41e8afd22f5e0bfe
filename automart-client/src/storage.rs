//! Durable key-value storage backing the session store.

use std::{
    collections::{BTreeMap, HashMap},
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use thiserror::Error;
use tracing::warn;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage file could not be read or written.
    #[error("failed to access session storage at {}: {source}", path.display())]
    Io {
        /// Storage file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The storage file is not a JSON object of strings.
    #[error("session storage at {} is corrupt: {source}", path.display())]
    Corrupt {
        /// Storage file.
        path: PathBuf,
        /// Parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// A value could not be turned into JSON.
    #[error("failed to serialize session value: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// String-keyed, string-valued storage that survives process restarts.
pub trait KeyValueStorage: Send + Sync + fmt::Debug {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    /// Returns an error when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns an error when the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error when the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// JSON object file holding every key, written owner-readable only.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStorage {
    /// Storage kept in the JSON file at `path`. Nothing is touched until the
    /// first access.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the storage file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|source| StorageError::Corrupt {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(StorageError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }

    // A corrupt file is replaced rather than blocking every later write.
    fn load_for_update(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.load() {
            Err(err @ StorageError::Corrupt { .. }) => {
                warn!(error = %err, "discarding corrupt session storage");
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_error = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };

        if entries.is_empty() {
            return match fs::remove_file(&self.path) {
                Err(err) if err.kind() != io::ErrorKind::NotFound => Err(io_error(err)),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        let contents = serde_json::to_string_pretty(entries)?;

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(io_error)?;
        // The creation mode does not apply to a file that already existed.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(io_error)?;
        }
        file.write_all(contents.as_bytes()).map_err(io_error)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load_for_update()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut entries = self.load_for_update()?;
        entries.remove(key);
        self.save(&entries)
    }
}

/// In-process storage for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}
