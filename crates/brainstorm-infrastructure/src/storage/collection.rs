//! A keyed store over one JSON array file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use brainstorm_core::error::{BrainstormError, Result};
use tokio::sync::{Mutex, MutexGuard};

use super::atomic_json::{AtomicJsonFile, FileLock};
use super::{Change, KeyedStore, Record, next_id};

/// One collection of records persisted as a JSON array.
///
/// Plain reads load the whole file and never fail: a missing, unreadable or
/// unparsable file is logged and read as an empty collection. Anything that
/// writes loads strictly instead, so a damaged file is never overwritten with
/// a mutation of an empty collection.
pub struct JsonCollection<T> {
    name: &'static str,
    file: AtomicJsonFile<Vec<T>>,
    writer: Mutex<()>,
}

impl<T: Record> JsonCollection<T> {
    /// Creates a collection handle. Nothing is touched on disk.
    pub fn new(name: &'static str, path: PathBuf) -> Self {
        Self {
            name,
            file: AtomicJsonFile::new(path),
            writer: Mutex::new(()),
        }
    }

    /// Collection name used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Writes an empty array when the backing file does not exist yet.
    pub async fn ensure_initialized(&self) -> Result<()> {
        let _writer = self.writer().await?;
        let file = self.file.clone();
        let created = run_blocking(move || {
            if file.path().exists() {
                return Ok(false);
            }
            file.save(&Vec::new())?;
            Ok(true)
        })
        .await?;

        if created {
            tracing::info!("[Storage] Created {} at {}", self.name, self.path().display());
        }
        Ok(())
    }

    /// Loads the whole collection as an owned value.
    pub async fn snapshot(&self) -> Vec<T> {
        self.load_soft().await
    }

    /// Overwrites the collection with `items`.
    pub async fn replace_all(&self, items: Vec<T>) -> Result<()> {
        let writer = self.writer().await?;
        writer.replace(items).await
    }

    /// Takes exclusive write access to this collection.
    ///
    /// Callers holding writers on several collections must acquire them in a
    /// fixed order (sessions before ideas).
    pub async fn writer(&self) -> Result<CollectionWriter<'_, T>> {
        let guard = self.writer.lock().await;
        let file = self.file.clone();
        let file_lock = run_blocking(move || Ok(file.lock()?)).await?;

        Ok(CollectionWriter {
            collection: self,
            _file_lock: file_lock,
            _guard: guard,
        })
    }

    async fn load_soft(&self) -> Vec<T> {
        let file = self.file.clone();
        match tokio::task::spawn_blocking(move || file.load()).await {
            Ok(Ok(items)) => items.unwrap_or_default(),
            Ok(Err(e)) => {
                tracing::warn!(
                    "[Storage] Reading {} as empty, {} is unreadable: {}",
                    self.name,
                    self.path().display(),
                    e
                );
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("[Storage] Load task for {} failed: {}", self.name, e);
                Vec::new()
            }
        }
    }

    async fn load_strict(&self) -> Result<Vec<T>> {
        let file = self.file.clone();
        let result = run_blocking(move || Ok(file.load()?)).await;

        match result {
            Ok(items) => Ok(items.unwrap_or_default()),
            Err(e) => {
                tracing::error!("[Storage] Refusing to modify {}: {}", self.name, e);
                Err(e)
            }
        }
    }

    async fn save(&self, items: Vec<T>) -> Result<()> {
        let count = items.len();
        let file = self.file.clone();
        let result = run_blocking(move || Ok(file.save(&items)?)).await;

        match &result {
            Ok(()) => tracing::debug!("[Storage] Saved {} {}", count, self.name),
            Err(e) => tracing::error!("[Storage] Failed to save {}: {}", self.name, e),
        }
        result
    }
}

/// Exclusive write access to a [`JsonCollection`].
///
/// Holds the in-process writer mutex and the advisory file lock until dropped.
pub struct CollectionWriter<'a, T> {
    collection: &'a JsonCollection<T>,
    // Field order is drop order: the file lock is released before the mutex.
    _file_lock: FileLock,
    _guard: MutexGuard<'a, ()>,
}

impl<T: Record> CollectionWriter<'_, T> {
    /// Loads the current collection. Fails if the file cannot be parsed.
    pub async fn load(&self) -> Result<Vec<T>> {
        self.collection.load_strict().await
    }

    /// Loads the collection, lets `f` mutate it, and persists it on [`Change::Commit`].
    pub async fn modify<R>(&self, f: impl FnOnce(&mut Vec<T>) -> Change<R>) -> Result<R> {
        let mut items = self.collection.load_strict().await?;
        match f(&mut items) {
            Change::Commit(value) => {
                self.collection.save(items).await?;
                Ok(value)
            }
            Change::Discard(value) => Ok(value),
        }
    }

    /// Overwrites the collection with `items`.
    pub async fn replace(&self, items: Vec<T>) -> Result<()> {
        self.collection.save(items).await
    }
}

#[async_trait]
impl<T: Record> KeyedStore<T> for JsonCollection<T> {
    async fn get(&self, id: u64) -> Option<T> {
        self.snapshot().await.into_iter().find(|r| r.id() == id)
    }

    async fn list_where(
        &self,
        predicate: &(dyn for<'r> Fn(&'r T) -> bool + Send + Sync),
    ) -> Vec<T> {
        self.snapshot()
            .await
            .into_iter()
            .filter(|r| predicate(r))
            .collect()
    }

    async fn insert_with(&self, build: Box<dyn FnOnce(u64) -> T + Send>) -> Result<T> {
        let writer = self.writer().await?;
        writer
            .modify(move |items| {
                let record = build(next_id(items));
                items.push(record.clone());
                Change::Commit(record)
            })
            .await
    }

    async fn update(
        &self,
        id: u64,
        apply: Box<dyn for<'r> FnOnce(&'r mut T) + Send>,
    ) -> Result<Option<T>> {
        let writer = self.writer().await?;
        writer
            .modify(move |items| match items.iter_mut().find(|r| r.id() == id) {
                Some(record) => {
                    apply(record);
                    Change::Commit(Some(record.clone()))
                }
                None => Change::Discard(None),
            })
            .await
    }

    async fn delete(&self, id: u64) -> Result<bool> {
        let writer = self.writer().await?;
        writer
            .modify(move |items| match items.iter().position(|r| r.id() == id) {
                Some(index) => {
                    items.remove(index);
                    Change::Commit(true)
                }
                None => Change::Discard(false),
            })
            .await
    }

    async fn delete_where(
        &self,
        predicate: &(dyn for<'r> Fn(&'r T) -> bool + Send + Sync),
    ) -> Result<usize> {
        let writer = self.writer().await?;
        writer
            .modify(|items| {
                let before = items.len();
                items.retain(|r| !predicate(r));
                match before - items.len() {
                    0 => Change::Discard(0),
                    removed => Change::Commit(removed),
                }
            })
            .await
    }
}

async fn run_blocking<R, F>(f: F) -> Result<R>
where
    R: Send + 'static,
    F: FnOnce() -> Result<R> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BrainstormError::internal(format!("Storage task failed: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        id: u64,
        label: String,
        value: i64,
    }

    impl Record for Counter {
        fn id(&self) -> u64 {
            self.id
        }
    }

    fn create_test_collection() -> (JsonCollection<Counter>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let collection = JsonCollection::new("counters", temp_dir.path().join("counters.json"));
        (collection, temp_dir)
    }

    fn counter(label: &str) -> Box<dyn FnOnce(u64) -> Counter + Send> {
        let label = label.to_string();
        Box::new(move |id| Counter {
            id,
            label,
            value: 0,
        })
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let (collection, _temp_dir) = create_test_collection();

        let first = collection.insert_with(counter("a")).await.unwrap();
        let second = collection.insert_with(counter("b")).await.unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(collection.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_next_id_follows_max_not_count() {
        let (collection, _temp_dir) = create_test_collection();
        collection
            .replace_all(vec![Counter {
                id: 41,
                label: "imported".to_string(),
                value: 0,
            }])
            .await
            .unwrap();

        let created = collection.insert_with(counter("next")).await.unwrap();
        assert_eq!(created.id, 42);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_do_not_write() {
        let (collection, _temp_dir) = create_test_collection();

        let updated = collection
            .update(9, Box::new(|c: &mut Counter| c.value = 1))
            .await
            .unwrap();
        assert!(updated.is_none());
        assert!(!collection.delete(9).await.unwrap());
        assert!(!collection.path().exists());
    }

    #[tokio::test]
    async fn test_delete_where_removes_matching() {
        let (collection, _temp_dir) = create_test_collection();
        for label in ["keep", "drop", "drop", "keep"] {
            collection.insert_with(counter(label)).await.unwrap();
        }

        let removed = collection.delete_where(&|c: &Counter| c.label == "drop").await.unwrap();

        assert_eq!(removed, 2);
        let remaining = collection.list_where(&|_: &Counter| true).await;
        assert!(remaining.iter().all(|c| c.label == "keep"));
        assert_eq!(remaining.len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_empty() {
        let (collection, _temp_dir) = create_test_collection();
        std::fs::write(collection.path(), "{not json").unwrap();

        assert!(collection.snapshot().await.is_empty());
        assert!(collection.get(1).await.is_none());
    }

    #[tokio::test]
    async fn test_mutations_refuse_corrupt_file() {
        let (collection, _temp_dir) = create_test_collection();
        for label in ["a", "b", "c"] {
            collection.insert_with(counter(label)).await.unwrap();
        }
        let intact = std::fs::read_to_string(collection.path()).unwrap();
        let damaged = &intact[..intact.len() - 2];
        std::fs::write(collection.path(), damaged).unwrap();

        assert!(collection.insert_with(counter("d")).await.is_err());
        assert!(
            collection
                .update(1, Box::new(|c: &mut Counter| c.value = 9))
                .await
                .is_err()
        );
        assert!(collection.delete(2).await.is_err());
        assert!(collection.delete_where(&|_: &Counter| true).await.is_err());
        assert!(collection.writer().await.unwrap().load().await.is_err());

        assert_eq!(std::fs::read_to_string(collection.path()).unwrap(), damaged);
        assert!(collection.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_ensure_initialized_keeps_existing_data() {
        let (collection, _temp_dir) = create_test_collection();
        collection.ensure_initialized().await.unwrap();
        assert_eq!(std::fs::read_to_string(collection.path()).unwrap(), "[]");

        collection.insert_with(counter("a")).await.unwrap();
        collection.ensure_initialized().await.unwrap();
        assert_eq!(collection.snapshot().await.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_do_not_lose_updates() {
        let (collection, _temp_dir) = create_test_collection();
        let collection = Arc::new(collection);
        let target_id = collection.insert_with(counter("hot")).await.unwrap().id;

        let mut handles = Vec::new();
        for i in 0..40 {
            let collection = Arc::clone(&collection);
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    collection
                        .update(target_id, Box::new(|c: &mut Counter| c.value += 1))
                        .await
                        .unwrap();
                } else {
                    collection.insert_with(counter("new")).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let items = collection.snapshot().await;
        assert_eq!(items.len(), 21);
        let hot = items.iter().find(|c| c.id == target_id).unwrap();
        assert_eq!(hot.value, 20);

        let mut ids: Vec<u64> = items.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 21);
    }
}
