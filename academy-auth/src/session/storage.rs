use crate::error::AuthError;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use tempfile::NamedTempFile;

/// Durable key/value backend for session tokens.
///
/// Multi-key writes are a single call so a backend can apply them at once,
/// and `snapshot` returns every key from one consistent read.
pub trait StorageBackend: Send + Sync {
    fn snapshot(&self) -> Result<HashMap<String, String>, AuthError>;
    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), AuthError>;
    fn remove_all(&self, keys: &[&str]) -> Result<(), AuthError>;

    fn get(&self, key: &str) -> Result<Option<String>, AuthError> {
        Ok(self.snapshot()?.remove(key))
    }
}

/// Process-local storage, used by tests and when no durable backend is wanted.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AuthError {
    AuthError::TokenStorage("storage lock poisoned".to_string())
}

impl StorageBackend for MemoryStorage {
    fn snapshot(&self) -> Result<HashMap<String, String>, AuthError> {
        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.clone())
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), AuthError> {
        let mut map = self.entries.write().map_err(|_| poisoned())?;
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), AuthError> {
        let mut map = self.entries.write().map_err(|_| poisoned())?;
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

/// JSON file in the user cache directory, readable by the owner only.
///
/// The file is re-read on every access so that a second client process sees
/// logins and logouts made by the first one. Writes go to a temporary file
/// that is renamed over the old one, so readers never see a partial file.
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("academy");
        Self::with_path(cache_dir.join("session.json"))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let path = path.into();

        // Create the parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to create cache directory: {}", e))
                })?;
            }
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, AuthError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                return Err(AuthError::TokenStorage(format!(
                    "Failed to read session: {}",
                    e
                )))
            }
        };
        if json.trim().is_empty() {
            return Ok(HashMap::new());
        }

        Ok(serde_json::from_str(&json)?)
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<(), AuthError> {
        if entries.is_empty() {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to delete session: {}", e))
                })?;
            }
            return Ok(());
        }

        let json = serde_json::to_string_pretty(entries)?;
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        // Created with 0600 permissions (read/write for owner only)
        let mut file = NamedTempFile::new_in(dir).map_err(|e| {
            AuthError::TokenStorage(format!("Failed to create session file: {}", e))
        })?;
        file.write_all(json.as_bytes())
            .and_then(|_| file.as_file().sync_all())
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save session: {}", e)))?;
        file.persist(&self.path).map_err(|e| {
            AuthError::TokenStorage(format!("Failed to replace session file: {}", e.error))
        })?;

        Ok(())
    }
}

impl StorageBackend for FileStorage {
    fn snapshot(&self) -> Result<HashMap<String, String>, AuthError> {
        self.load()
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().map_err(|_| poisoned())?;
        let mut map = self.load()?;
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_string());
        }
        self.save(&map)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), AuthError> {
        let _guard = self.write_lock.lock().map_err(|_| poisoned())?;
        let mut map = self.load()?;
        for key in keys {
            map.remove(*key);
        }
        self.save(&map)
    }
}
