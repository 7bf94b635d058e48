//! Flat-file subscriber storage.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access subscriber file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse subscriber file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Set of subscribed chat ids, persisted to a JSON array file.
///
/// Every successful mutation is persisted before it is acknowledged.
/// Persistence failures are logged and swallowed; the in-memory set keeps
/// the new state.
pub struct SubscriberStore {
    path: PathBuf,
    subscribers: RwLock<BTreeSet<i64>>,
}

impl SubscriberStore {
    /// Load the store from the given file.
    /// A missing file is the first-run condition and yields an empty set.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let subscribers = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeSet::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            subscribers: RwLock::new(subscribers),
        })
    }

    /// Subscribe a chat. Returns false if it was already subscribed.
    pub fn add(&self, chat_id: i64) -> bool {
        let added = self
            .subscribers
            .write()
            .expect("subscriber lock poisoned")
            .insert(chat_id);
        if added {
            self.persist();
        }
        added
    }

    /// Unsubscribe a chat. Returns false if it was not subscribed.
    pub fn remove(&self, chat_id: i64) -> bool {
        let removed = self
            .subscribers
            .write()
            .expect("subscriber lock poisoned")
            .remove(&chat_id);
        if removed {
            self.persist();
        }
        removed
    }

    /// Current subscribers, for broadcast iteration.
    pub fn snapshot(&self) -> Vec<i64> {
        self.subscribers
            .read()
            .expect("subscriber lock poisoned")
            .iter()
            .copied()
            .collect()
    }

    pub fn contains(&self, chat_id: i64) -> bool {
        self.subscribers
            .read()
            .expect("subscriber lock poisoned")
            .contains(&chat_id)
    }

    pub fn len(&self) -> usize {
        self.subscribers
            .read()
            .expect("subscriber lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        let set = self.subscribers.read().expect("subscriber lock poisoned");
        if let Err(e) = write_atomic(&self.path, &set) {
            error!(path = %self.path.display(), error = %e, "Failed to persist subscribers");
        }
    }
}

/// Write the set as a JSON array via a temp file and rename, so a
/// concurrent load never observes a partial file.
fn write_atomic(path: &Path, set: &BTreeSet<i64>) -> Result<(), StoreError> {
    let json = serde_json::to_string(set)?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "coinwatch-store-{}-{}.json",
            std::process::id(),
            name
        ))
    }

    fn cleanup(path: &Path) {
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let path = temp_path("missing");
        cleanup(&path);

        let store = SubscriberStore::load(&path).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_persists_and_reloads() {
        let path = temp_path("roundtrip");
        cleanup(&path);

        let store = SubscriberStore::load(&path).unwrap();
        assert!(store.add(42));
        assert!(store.add(7));

        let reloaded = SubscriberStore::load(&path).unwrap();
        assert_eq!(reloaded.snapshot(), vec![7, 42]);

        cleanup(&path);
    }

    #[test]
    fn test_double_add_is_idempotent() {
        let path = temp_path("double-add");
        cleanup(&path);

        let store = SubscriberStore::load(&path).unwrap();
        assert!(store.add(1));
        assert!(!store.add(1));
        assert_eq!(store.len(), 1);

        // Persisted state holds a single entry too.
        let contents = std::fs::read_to_string(&path).unwrap();
        let persisted: Vec<i64> = serde_json::from_str(&contents).unwrap();
        assert_eq!(persisted, vec![1]);

        cleanup(&path);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let path = temp_path("remove-absent");
        cleanup(&path);

        let store = SubscriberStore::load(&path).unwrap();
        store.add(1);
        assert!(!store.remove(99));
        assert_eq!(store.len(), 1);

        cleanup(&path);
    }

    #[test]
    fn test_remove_persists() {
        let path = temp_path("remove");
        cleanup(&path);

        let store = SubscriberStore::load(&path).unwrap();
        store.add(1);
        store.add(2);
        assert!(store.remove(1));

        let reloaded = SubscriberStore::load(&path).unwrap();
        assert_eq!(reloaded.snapshot(), vec![2]);
        assert!(!reloaded.contains(1));

        cleanup(&path);
    }
}
