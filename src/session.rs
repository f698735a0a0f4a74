use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use parking_lot::Mutex;
use tracing::warn;

use crate::models::Identity;

/// Storage for the single logged-in identity. Injected wherever the session
/// is read or written so tests can substitute an in-memory store.
pub trait SessionStore {
    /// Returns the saved identity, or `None` if nothing (readable) is saved.
    /// An unreadable record is discarded and reported as absence.
    fn restore(&self) -> anyhow::Result<Option<Identity>>;
    fn save(&self, identity: &Identity) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

/// File-backed store: one JSON file holding the serialized identity.
pub struct FileSessionStore {
    path: PathBuf,
}

const SESSION_PATH_ENV: &str = "MINDMATE_SESSION_PATH";
const DEFAULT_SESSION_FILE: &str = ".mindmate-session.json";

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_env() -> Self {
        let path = std::env::var(SESSION_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_FILE));
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn restore(&self) -> anyhow::Result<Option<Identity>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to read {}", self.path.display()))
            }
        };

        match serde_json::from_str(&raw) {
            Ok(identity) => Ok(Some(identity)),
            Err(err) => {
                warn!("discarding unreadable session record: {err}");
                fs::remove_file(&self.path).with_context(|| {
                    format!("failed to remove corrupt session file {}", self.path.display())
                })?;
                Ok(None)
            }
        }
    }

    fn save(&self, identity: &Identity) -> anyhow::Result<()> {
        let payload = serde_json::to_string(identity)?;
        fs::write(&self.path, payload)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }
}

/// In-memory store for tests and for wiring the router without touching disk.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<Identity>>,
}

impl SessionStore for MemorySessionStore {
    fn restore(&self) -> anyhow::Result<Option<Identity>> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, identity: &Identity) -> anyhow::Result<()> {
        *self.slot.lock() = Some(identity.clone());
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        *self.slot.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn identity() -> Identity {
        Identity {
            role: Role::Student,
            username: "alex".to_string(),
        }
    }

    #[test]
    fn save_then_restore_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.save(&identity()).unwrap();
        let restored = store.restore().unwrap();
        assert_eq!(restored, Some(identity()));
    }

    #[test]
    fn restore_without_saved_session_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.restore().unwrap(), None);
    }

    #[test]
    fn clear_then_restore_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.save(&identity()).unwrap();
        store.clear().unwrap();
        assert_eq!(store.restore().unwrap(), None);
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.clear().unwrap();
        store.clear().unwrap();
    }

    #[test]
    fn corrupt_record_is_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert_eq!(store.restore().unwrap(), None);
        assert!(!path.exists(), "corrupt file should have been removed");
    }

    #[test]
    fn serialized_form_uses_legacy_field_names() {
        let payload = serde_json::to_string(&identity()).unwrap();
        assert_eq!(payload, r#"{"type":"student","username":"alex"}"#);
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemorySessionStore::default();
        assert_eq!(store.restore().unwrap(), None);
        store.save(&identity()).unwrap();
        assert_eq!(store.restore().unwrap(), Some(identity()));
        store.clear().unwrap();
        assert_eq!(store.restore().unwrap(), None);
    }
}
