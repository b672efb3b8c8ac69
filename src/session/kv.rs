// Persistent key/value store - the browser localStorage analog

use crate::core::errors::ClientError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Process-wide persistent string key/value store.
///
/// All session state lives behind this seam so tests can substitute an
/// in-memory implementation. Mutations are last-write-wins; the web
/// client this mirrors had a single UI thread and no locking discipline.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;
    fn remove(&self, key: &str) -> Result<(), ClientError>;
}

/// File-backed store persisting a flat JSON object on every mutation
pub struct FileKvStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileKvStore {
    /// Open the store, loading existing entries if the file is present.
    ///
    /// A missing file is an empty store, not an error. Parent directories
    /// are created eagerly so the first write cannot fail on a missing dir.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref().to_path_buf();

        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    ClientError::State(format!(
                        "Failed to create session directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        let entries = if path.exists() {
            let raw = std::fs::read_to_string(&path).map_err(|e| {
                ClientError::State(format!("Failed to read session file {}: {}", path.display(), e))
            })?;
            serde_json::from_str(&raw).map_err(|e| {
                ClientError::State(format!("Corrupt session file {}: {}", path.display(), e))
            })?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), ClientError> {
        let serialized = serde_json::to_string_pretty(entries)
            .map_err(|e| ClientError::State(format!("Failed to serialize session state: {}", e)))?;
        std::fs::write(&self.path, serialized).map_err(|e| {
            ClientError::State(format!(
                "Failed to write session file {}: {}",
                self.path.display(),
                e
            ))
        })
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ClientError::State("Session store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ClientError::State("Session store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ClientError::State("Session store lock poisoned".to_string()))?;
        entries.remove(key);
        self.persist(&entries)
    }
}

/// In-memory store for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| ClientError::State("Session store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ClientError::State("Session store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| ClientError::State("Session store lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
