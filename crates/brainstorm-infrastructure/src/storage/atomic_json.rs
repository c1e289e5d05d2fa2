//! Whole-file JSON documents replaced by rename.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;

use brainstorm_core::error::BrainstormError;

#[derive(Debug, Error)]
pub enum AtomicJsonError {
    #[error("file access failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not lock {0}")]
    Lock(String),
}

impl From<AtomicJsonError> for BrainstormError {
    fn from(err: AtomicJsonError) -> Self {
        match err {
            AtomicJsonError::Io(e) => e.into(),
            AtomicJsonError::Json(e) => e.into(),
            AtomicJsonError::Lock(message) => BrainstormError::io(message),
        }
    }
}

/// A JSON file that is only ever replaced whole.
///
/// A save goes to a synced sibling temp file that is then renamed over the
/// target, so readers see the old document or the new one and never need the
/// lock. Writers doing read-modify-write take [`AtomicJsonFile::lock`] first.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Clone for AtomicJsonFile<T> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    /// The file this handle reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document; `None` when the file is absent or blank.
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Pretty-prints `data` and swaps it in.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(data)?;

        let tmp_path = self.sibling_path("tmp")?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Acquires the exclusive advisory lock guarding read-modify-write cycles.
    ///
    /// Blocks until the lock is available. Released when the guard drops.
    pub fn lock(&self) -> Result<FileLock, AtomicJsonError> {
        FileLock::acquire(&self.sibling_path("lock")?)
    }

    /// `dir/.name.json.<suffix>` next to the target file.
    fn sibling_path(&self, suffix: &str) -> Result<PathBuf, AtomicJsonError> {
        let file_name = self.path.file_name().ok_or_else(|| {
            AtomicJsonError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no file name",
            ))
        })?;

        let name = format!(".{}.{}", file_name.to_string_lossy(), suffix);
        Ok(match self.path.parent() {
            Some(parent) => parent.join(name),
            None => PathBuf::from(name),
        })
    }
}

/// Held exclusive lock on a `.lock` sibling; unlocks on drop.
///
/// The lock file is never removed, so every process contends on the same inode.
pub struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(lock_path: &Path) -> Result<Self, AtomicJsonError> {
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)?;

        fs2::FileExt::lock_exclusive(&file)
            .map_err(|e| AtomicJsonError::Lock(format!("{} ({})", lock_path.display(), e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        count: i64,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Vec<Entry>>::new(temp_dir.path().join("entries.json"));

        let entries = vec![
            Entry {
                name: "a".to_string(),
                count: 1,
            },
            Entry {
                name: "b".to_string(),
                count: -3,
            },
        ];

        file.save(&entries).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded, entries);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Vec<Entry>>::new(temp_dir.path().join("missing.json"));

        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_blank_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blank.json");
        fs::write(&path, "  \n").unwrap();

        let file = AtomicJsonFile::<Vec<Entry>>::new(path);
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_corrupt_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("corrupt.json");
        fs::write(&path, "[{\"name\": ").unwrap();

        let file = AtomicJsonFile::<Vec<Entry>>::new(path);
        assert!(matches!(file.load(), Err(AtomicJsonError::Json(_))));
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("entries.json");
        let file = AtomicJsonFile::<Vec<Entry>>::new(path.clone());

        file.save(&Vec::new()).unwrap();

        assert!(!temp_dir.path().join(".entries.json.tmp").exists());
        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("entries.json");
        let file = AtomicJsonFile::<Vec<Entry>>::new(path.clone());

        file.save(&Vec::new()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_lock_can_be_reacquired_after_drop() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Vec<Entry>>::new(temp_dir.path().join("entries.json"));

        {
            let _guard = file.lock().unwrap();
        }
        let _guard = file.lock().unwrap();
    }
}
