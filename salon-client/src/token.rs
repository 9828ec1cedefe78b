// salon-client/src/token.rs
// Access token storage - in memory or JSON file

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Persistent home of the access token.
///
/// `take` must be atomic: of several concurrent callers only one may
/// receive the token.
pub trait TokenStore: Send + Sync + std::fmt::Debug {
    /// Current token, if any
    fn load(&self) -> Option<String>;

    /// Replace the stored token
    fn save(&self, token: &str) -> std::io::Result<()>;

    /// Remove the token, returning it if one was stored
    fn take(&self) -> Option<String>;
}

/// Process-local token storage
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn save(&self, token: &str) -> std::io::Result<()> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn take(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// On-disk token record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredToken {
    access_token: String,
}

/// Token storage in a JSON file (`{"accessToken": "..."}`)
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    // serializes take() against save()
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Token file location
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Option<String> {
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<StoredToken>(&json) {
            Ok(stored) if !stored.access_token.is_empty() => Some(stored.access_token),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring unreadable token file");
                None
            }
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read()
    }

    fn save(&self, token: &str) -> std::io::Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&StoredToken {
            access_token: token.to_string(),
        })?;
        fs::write(&self.path, json)
    }

    fn take(&self) -> Option<String> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let token = self.read();
        if self.path.exists()
            && let Err(e) = fs::remove_file(&self.path)
        {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to remove token file");
        }
        token
    }
}
