use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use labor_core::store::{KeyValueStore, StoreError};
use tracing::debug;

const EXTENSION: &str = "json";

/// One file per key under a single directory.
///
/// Writes go to a temporary file in the same directory which is then renamed
/// over the target, so a reader never sees a half-written value.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StoreError::Io(format!("create {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`. Characters outside `[A-Za-z0-9._-]` are written as
    /// `%XX` so distinct keys never share a file.
    pub fn path_for(
        &self,
        key: &str,
    ) -> Result<PathBuf, StoreError> {
        if key.is_empty() || key.starts_with('.') {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        let mut name = String::with_capacity(key.len() + EXTENSION.len() + 1);
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("%{byte:02X}"));
            }
        }
        name.push('.');
        name.push_str(EXTENSION);
        Ok(self.dir.join(name))
    }

    fn write_atomic(
        &self,
        path: &Path,
        data: &[u8],
    ) -> Result<(), StoreError> {
        let io = |e: std::io::Error| StoreError::Io(format!("write {}: {e}", path.display()));

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(io)?;
        tmp.write_all(data).map_err(io)?;
        tmp.flush().map_err(io)?;
        tmp.persist(path).map_err(|e| io(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Io(format!("read {}: {e}", path.display()))),
        }
    }

    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        self.write_atomic(&path, value.as_bytes())?;
        debug!(key, path = %path.display(), "value written");
        Ok(())
    }

    fn remove(
        &self,
        key: &str,
    ) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(format!("remove {}: {e}", path.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn open_temp() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("data")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_directory() {
        let (_dir, store) = open_temp();

        assert!(store.dir().is_dir());
    }

    #[test]
    fn missing_key_reads_as_none() {
        let (_dir, store) = open_temp();

        assert_eq!(store.get("ai-labor-dark-mode").unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let (_dir, store) = open_temp();
        store.set("ai-labor-dark-mode", "true").unwrap();

        assert_eq!(store.get("ai-labor-dark-mode").unwrap(), Some("true".to_string()));
    }

    #[test]
    fn set_replaces_existing_value_without_leftovers() {
        let (_dir, store) = open_temp();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();

        assert_eq!(store.get("k").unwrap(), Some("second".to_string()));
        let files = fs::read_dir(store.dir()).unwrap().count();
        assert_eq!(files, 1);
    }

    #[test]
    fn slash_in_key_is_escaped() {
        let (_dir, store) = open_temp();
        let path = store.path_for("ai-labor-inputs/overtime-pay").unwrap();

        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "ai-labor-inputs%2Fovertime-pay.json"
        );
    }

    #[test]
    fn escaped_keys_do_not_collide() {
        let (_dir, store) = open_temp();
        store.set("a/b", "slash").unwrap();
        store.set("a%2Fb", "percent").unwrap();

        assert_eq!(store.get("a/b").unwrap(), Some("slash".to_string()));
        assert_eq!(store.get("a%2Fb").unwrap(), Some("percent".to_string()));
    }

    #[test]
    fn dot_keys_are_rejected() {
        let (_dir, store) = open_temp();

        assert_eq!(
            store.set("..", "x"),
            Err(StoreError::InvalidKey("..".to_string()))
        );
        assert_eq!(store.get(""), Err(StoreError::InvalidKey(String::new())));
    }

    #[test]
    fn remove_deletes_value_and_tolerates_missing() {
        let (_dir, store) = open_temp();
        store.set("k", "v").unwrap();

        store.remove("k").unwrap();
        store.remove("k").unwrap();

        assert_eq!(store.get("k").unwrap(), None);
    }

    #[test]
    fn values_survive_reopen() {
        let (dir, store) = open_temp();
        store.set("ai-labor-history", "[]").unwrap();

        let reopened = FileStore::open(dir.path().join("data")).unwrap();

        assert_eq!(reopened.get("ai-labor-history").unwrap(), Some("[]".to_string()));
    }
}
