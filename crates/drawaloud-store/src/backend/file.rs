use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::backend::KeyValueStore;
use crate::error::{Result, StoreError};

/// One `<key>.json` file per key inside a directory.
///
/// Writes go to a temp file that is synced and then renamed over the target,
/// so a crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9._-]` become `_`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io {
                operation: "read",
                path,
                source: e,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");

        fs::create_dir_all(&self.root).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: self.root.clone(),
            source: e,
        })?;

        let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
            operation: "create",
            path: temp_path.clone(),
            source: e,
        })?;

        file.write_all(value.as_bytes())
            .map_err(|e| StoreError::Io {
                operation: "write",
                path: temp_path.clone(),
                source: e,
            })?;

        file.sync_all().map_err(|e| StoreError::Io {
            operation: "sync",
            path: temp_path.clone(),
            source: e,
        })?;

        fs::rename(&temp_path, &path).map_err(|e| StoreError::AtomicWriteFailed {
            temp_path: temp_path.clone(),
            target_path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "wrote store value");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("drawaloudResponses").unwrap(), None);
    }

    #[test]
    fn write_then_read() {
        let dir = tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));
        store.set("drawaloudResponses", "{}").unwrap();
        assert_eq!(
            store.get("drawaloudResponses").unwrap().as_deref(),
            Some("{}")
        );
        assert!(!store.path_for("drawaloudResponses").with_extension("json.tmp").exists());
    }

    #[test]
    fn keys_are_sanitized() {
        let store = FileStore::new("/tmp/store");
        assert_eq!(
            store.path_for("../session 1"),
            PathBuf::from("/tmp/store/.._session_1.json")
        );
    }
}
