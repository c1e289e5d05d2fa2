//! The sessions/ideas file pair.

use std::path::{Path, PathBuf};

use brainstorm_core::error::Result;

use super::collection::JsonCollection;
use crate::dto::{IdeaRecord, SessionRecord};

/// File name of the session collection inside the data directory.
pub const SESSIONS_FILE: &str = "sessions.json";

/// File name of the idea collection inside the data directory.
pub const IDEAS_FILE: &str = "ideas.json";

/// Both persisted collections of one data directory.
///
/// The `load_*`/`save_*` methods are whole-collection operations; per-record
/// work goes through [`BrainstormStore::sessions`] and [`BrainstormStore::ideas`].
pub struct BrainstormStore {
    data_dir: PathBuf,
    sessions: JsonCollection<SessionRecord>,
    ideas: JsonCollection<IdeaRecord>,
}

impl BrainstormStore {
    /// Creates a store rooted at `data_dir` without touching the filesystem.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            sessions: JsonCollection::new("sessions", data_dir.join(SESSIONS_FILE)),
            ideas: JsonCollection::new("ideas", data_dir.join(IDEAS_FILE)),
            data_dir,
        }
    }

    /// Creates the data directory and any missing collection file (as `[]`).
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(data_dir);
        tokio::fs::create_dir_all(&store.data_dir).await?;
        store.sessions.ensure_initialized().await?;
        store.ideas.ensure_initialized().await?;

        tracing::info!("[Storage] Opened data directory: {}", store.data_dir.display());
        Ok(store)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn sessions(&self) -> &JsonCollection<SessionRecord> {
        &self.sessions
    }

    pub fn ideas(&self) -> &JsonCollection<IdeaRecord> {
        &self.ideas
    }

    /// Loads every session. Never fails; unreadable data reads as empty.
    pub async fn load_sessions(&self) -> Vec<SessionRecord> {
        self.sessions.snapshot().await
    }

    /// Replaces the whole session collection.
    pub async fn save_sessions(&self, sessions: Vec<SessionRecord>) -> Result<()> {
        self.sessions.replace_all(sessions).await
    }

    /// Loads every idea. Never fails; unreadable data reads as empty.
    pub async fn load_ideas(&self) -> Vec<IdeaRecord> {
        self.ideas.snapshot().await
    }

    /// Replaces the whole idea collection.
    pub async fn save_ideas(&self, ideas: Vec<IdeaRecord>) -> Result<()> {
        self.ideas.replace_all(ideas).await
    }
}
