//! Storage layer.
//!
//! Each collection is one JSON array file, replaced atomically on every
//! write. Writers of a collection are serialized in-process by an async mutex
//! and across processes by an advisory lock file, so a read-modify-write
//! cycle never interleaves with another one on the same file.
//!
//! # Module Structure
//!
//! - `atomic_json`: temp-file + rename writes, advisory file lock
//! - `collection`: [`JsonCollection`], a keyed store over one file
//! - `store`: [`BrainstormStore`], the sessions/ideas file pair

mod atomic_json;
mod collection;
mod store;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile, FileLock};
pub use collection::{CollectionWriter, JsonCollection};
pub use store::{BrainstormStore, IDEAS_FILE, SESSIONS_FILE};

use async_trait::async_trait;
use brainstorm_core::error::Result;
use serde::{Serialize, de::DeserializeOwned};

/// A persisted record addressed by a numeric id.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    fn id(&self) -> u64;
}

/// Outcome of a mutation closure: whether the modified collection is written back.
pub enum Change<R> {
    /// Persist the modified collection, then yield the value.
    Commit(R),
    /// Leave the file untouched and yield the value.
    Discard(R),
}

/// Per-record access to a collection.
///
/// Every mutating call is one serialized read-modify-write of the backing
/// collection; loaded collections are private to the call. Reads treat an
/// unreadable file as empty, but mutations refuse to run on one.
#[async_trait]
pub trait KeyedStore<T: Record>: Send + Sync {
    /// Finds a record by id.
    async fn get(&self, id: u64) -> Option<T>;

    /// Returns every record matching `predicate`, in stored order.
    async fn list_where(
        &self,
        predicate: &(dyn for<'r> Fn(&'r T) -> bool + Send + Sync),
    ) -> Vec<T>;

    /// Allocates the next id (max + 1, or 1 when empty), builds the record and appends it.
    async fn insert_with(&self, build: Box<dyn FnOnce(u64) -> T + Send>) -> Result<T>;

    /// Applies `apply` to the record with `id` and persists it.
    ///
    /// Returns `Ok(None)` without writing when no record has that id.
    async fn update(
        &self,
        id: u64,
        apply: Box<dyn for<'r> FnOnce(&'r mut T) + Send>,
    ) -> Result<Option<T>>;

    /// Removes the record with `id`. Returns `Ok(false)` without writing when absent.
    async fn delete(&self, id: u64) -> Result<bool>;

    /// Removes every record matching `predicate`, returning how many were removed.
    async fn delete_where(
        &self,
        predicate: &(dyn for<'r> Fn(&'r T) -> bool + Send + Sync),
    ) -> Result<usize>;
}

/// Next id for a collection: max existing id + 1, or 1 when empty.
pub(crate) fn next_id<T: Record>(items: &[T]) -> u64 {
    items.iter().map(Record::id).max().map_or(1, |max| max + 1)
}
