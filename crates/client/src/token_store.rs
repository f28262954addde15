// Bearer token storage
//
// A single-slot store for the access token issued by the backend.
// Reads are on demand: nothing is loaded eagerly, so a token written by one
// holder is seen by the next `get` of any other holder of the same store.

use crate::error::TokenStoreError;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Storage key under which the token is persisted
pub const TOKEN_KEY: &str = "accessToken";

/// File name of the persisted session inside the config directory
pub const TOKEN_FILE_NAME: &str = "session.json";

/// Opaque bearer token issued by the backend.
///
/// The client never inspects its contents. `Debug` is redacted so the value
/// does not end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

/// Durable single-slot holder of the bearer token.
///
/// At most one token is held; `set` overwrites unconditionally and `clear`
/// on an empty store is a no-op. Concurrent writers race, last write wins.
pub trait TokenStore: Send + Sync {
    /// Currently stored token, if any
    fn get(&self) -> Option<AccessToken>;

    /// Replace the stored token
    fn set(&self, token: &AccessToken) -> Result<(), TokenStoreError>;

    /// Remove the stored token
    fn clear(&self) -> Result<(), TokenStoreError>;
}

// ============================================================================
// InMemoryTokenStore - process-local slot, used by tests and one-shot sessions
// ============================================================================

/// In-memory token store
///
/// Clones share the same slot.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTokenStore {
    slot: Arc<RwLock<Option<AccessToken>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding `token`
    pub fn with_token(token: impl Into<AccessToken>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(token.into()))),
        }
    }
}

impl TokenStore for InMemoryTokenStore {
    fn get(&self) -> Option<AccessToken> {
        self.slot.read().clone()
    }

    fn set(&self, token: &AccessToken) -> Result<(), TokenStoreError> {
        *self.slot.write() = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        *self.slot.write() = None;
        Ok(())
    }
}

// ============================================================================
// FileTokenStore - JSON document with a single `accessToken` key
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct TokenDocument {
    #[serde(rename = "accessToken")]
    access_token: AccessToken,
}

/// Token store persisted to a JSON file.
///
/// The file survives restarts and is only removed by `clear`. A missing,
/// unreadable or corrupt file reads as "no token".
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Platform config location, e.g. `~/.config/authdemo/session.json` on Linux
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "authdemo")
            .map(|dirs| dirs.config_dir().join(TOKEN_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> TokenStoreError {
        TokenStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<AccessToken> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Failed to read token file");
                return None;
            }
        };

        match serde_json::from_str::<TokenDocument>(&content) {
            Ok(doc) => Some(doc.access_token),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring malformed token file");
                None
            }
        }
    }

    fn set(&self, token: &AccessToken) -> Result<(), TokenStoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let doc = TokenDocument {
            access_token: token.clone(),
        };
        let content = serde_json::to_string_pretty(&doc)?;

        // Write beside the target and rename so readers never see a partial file.
        // NamedTempFile is created 0600 with a unique name.
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(content.as_bytes()).map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        tracing::debug!(path = %self.path.display(), "Stored access token");
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Cleared access token");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_set_then_get() {
        let store = InMemoryTokenStore::new();
        assert!(store.get().is_none());

        store.set(&AccessToken::new("abc.def.ghi")).unwrap();
        assert_eq!(store.get(), Some(AccessToken::new("abc.def.ghi")));

        // Overwrites unconditionally
        store.set(&AccessToken::new("second")).unwrap();
        assert_eq!(store.get().unwrap().as_str(), "second");
    }

    #[test]
    fn test_in_memory_clear_is_idempotent() {
        let store = InMemoryTokenStore::with_token("t");
        store.clear().unwrap();
        assert!(store.get().is_none());
        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_in_memory_clones_share_slot() {
        let store = InMemoryTokenStore::new();
        let other = store.clone();
        store.set(&AccessToken::new("shared")).unwrap();
        assert_eq!(other.get().unwrap().as_str(), "shared");
    }

    #[test]
    fn test_access_token_debug_is_redacted() {
        let token = AccessToken::new("super-secret");
        assert!(!format!("{:?}", token).contains("super-secret"));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(TOKEN_FILE_NAME);

        let writer = FileTokenStore::new(&path);
        assert!(writer.get().is_none());
        writer.set(&AccessToken::new("jwt-1")).unwrap();

        let reader = FileTokenStore::new(&path);
        assert_eq!(reader.get().unwrap().as_str(), "jwt-1");

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[TOKEN_KEY], "jwt-1");
    }

    #[test]
    fn test_file_store_write_leaves_only_the_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TOKEN_FILE_NAME);
        let store = FileTokenStore::new(&path);

        store.set(&AccessToken::new("jwt-1")).unwrap();
        store.set(&AccessToken::new("jwt-2")).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(TOKEN_FILE_NAME)]);
        assert_eq!(store.get().unwrap().as_str(), "jwt-2");
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TOKEN_FILE_NAME);
        FileTokenStore::new(&path).set(&AccessToken::new("jwt")).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TOKEN_FILE_NAME);
        let store = FileTokenStore::new(&path);

        store.set(&AccessToken::new("jwt")).unwrap();
        assert!(path.exists());

        store.clear().unwrap();
        assert!(!path.exists());
        assert!(store.get().is_none());

        // No token stored: still fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TOKEN_FILE_NAME);
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(store.get().is_none());

        store.set(&AccessToken::new("fresh")).unwrap();
        assert_eq!(store.get().unwrap().as_str(), "fresh");
    }
}
