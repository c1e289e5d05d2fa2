//! JSON-file BrainstormRepository implementation

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use brainstorm_core::error::{BrainstormError, Result};
use brainstorm_core::idea::{Idea, IdeaId, IdeaPatch, IdeaRepository, NewIdea, sort_ideas};
use brainstorm_core::session::{NewSession, Session, SessionId, SessionPatch, SessionRepository};
use chrono::Utc;

use crate::dto::{IdeaRecord, SessionRecord};
use crate::storage::{BrainstormStore, Change, KeyedStore};

/// A repository storing sessions and ideas in two JSON array files.
///
/// This implementation:
/// - Keeps the session and idea collections in `sessions.json` / `ideas.json`
/// - Serializes writers per collection, so concurrent calls never lose updates
/// - Derives each session's idea list from the idea collection on every read
/// - Takes the sessions writer before the ideas writer whenever it needs both
pub struct JsonFileBrainstormRepository {
    store: BrainstormStore,
}

impl JsonFileBrainstormRepository {
    /// Wraps an already opened store.
    pub fn new(store: BrainstormStore) -> Self {
        Self { store }
    }

    /// Opens (and initializes if needed) the store in `data_dir`.
    pub async fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(BrainstormStore::open(data_dir).await?))
    }

    pub fn store(&self) -> &BrainstormStore {
        &self.store
    }

    async fn ideas_of(&self, session_id: SessionId) -> Vec<Idea> {
        let records = self
            .store
            .ideas()
            .list_where(&|idea: &IdeaRecord| idea.session_id == session_id)
            .await;

        let mut ideas: Vec<Idea> = records.into_iter().map(Idea::from).collect();
        sort_ideas(&mut ideas);
        ideas
    }
}

#[async_trait]
impl SessionRepository for JsonFileBrainstormRepository {
    async fn create_session(&self, session: NewSession) -> Result<Session> {
        let NewSession { topic, created_by } = session;
        let now = Utc::now();

        let record = self
            .store
            .sessions()
            .insert_with(Box::new(move |id| SessionRecord {
                id,
                topic,
                created_by,
                created_at: now,
                updated_at: now,
            }))
            .await?;

        tracing::info!("[Repository] Created session {}: {}", record.id, record.topic);
        Ok(record.into_domain(Vec::new()))
    }

    async fn get_session(&self, id: SessionId) -> Result<Option<Session>> {
        let Some(record) = self.store.sessions().get(id).await else {
            tracing::debug!("[Repository] Session {} not found", id);
            return Ok(None);
        };

        let ideas = self.ideas_of(id).await;
        Ok(Some(record.into_domain(ideas)))
    }

    async fn list_sessions(&self) -> Result<Vec<Session>> {
        let sessions = self.store.load_sessions().await;

        let mut ideas_by_session: HashMap<SessionId, Vec<Idea>> = HashMap::new();
        for record in self.store.load_ideas().await {
            ideas_by_session
                .entry(record.session_id)
                .or_default()
                .push(Idea::from(record));
        }

        let mut result: Vec<Session> = sessions
            .into_iter()
            .map(|record| {
                let mut ideas = ideas_by_session.remove(&record.id).unwrap_or_default();
                sort_ideas(&mut ideas);
                record.into_domain(ideas)
            })
            .collect();

        result.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        tracing::debug!("[Repository] Listed {} sessions", result.len());
        Ok(result)
    }

    async fn update_session(&self, id: SessionId, patch: SessionPatch) -> Result<Option<Session>> {
        let updated = self
            .store
            .sessions()
            .update(
                id,
                Box::new(move |record: &mut SessionRecord| {
                    record.topic = patch.topic;
                    record.updated_at = Utc::now();
                }),
            )
            .await?;

        let Some(record) = updated else {
            tracing::debug!("[Repository] Session {} not found for update", id);
            return Ok(None);
        };

        tracing::info!("[Repository] Renamed session {}: {}", id, record.topic);
        let ideas = self.ideas_of(id).await;
        Ok(Some(record.into_domain(ideas)))
    }

    async fn delete_session(&self, id: SessionId) -> Result<bool> {
        let sessions = self.store.sessions().writer().await?;
        let ideas = self.store.ideas().writer().await?;

        if !sessions.load().await?.iter().any(|s| s.id == id) {
            tracing::debug!("[Repository] Session {} not found for deletion", id);
            return Ok(false);
        }

        // Ideas go first: a failure below leaves the session in place rather
        // than orphaned ideas that a later session could inherit by id.
        let removed_ideas = ideas
            .modify(|items| {
                let before = items.len();
                items.retain(|idea| idea.session_id != id);
                match before - items.len() {
                    0 => Change::Discard(0),
                    removed => Change::Commit(removed),
                }
            })
            .await?;

        sessions
            .modify(|items| {
                items.retain(|session| session.id != id);
                Change::Commit(())
            })
            .await?;

        tracing::info!("[Repository] Deleted session {} and {} ideas", id, removed_ideas);
        Ok(true)
    }

    async fn session_exists(&self, id: SessionId) -> Result<bool> {
        Ok(self.store.sessions().get(id).await.is_some())
    }
}

#[async_trait]
impl IdeaRepository for JsonFileBrainstormRepository {
    async fn create_idea(&self, idea: NewIdea) -> Result<Idea> {
        // Held until the idea is written so the session cannot be deleted in between.
        let sessions = self.store.sessions().writer().await?;
        if !sessions.load().await?.iter().any(|s| s.id == idea.session_id) {
            return Err(BrainstormError::not_found("Session", idea.session_id));
        }

        let NewIdea {
            session_id,
            content,
            category,
            created_by,
        } = idea;
        let now = Utc::now();

        let record = self
            .store
            .ideas()
            .insert_with(Box::new(move |id| IdeaRecord {
                id,
                content,
                category,
                votes: 0,
                created_by,
                created_at: now,
                updated_at: now,
                session_id,
            }))
            .await?;
        drop(sessions);

        tracing::info!("[Repository] Created idea {} in session {}", record.id, record.session_id);
        Ok(record.into())
    }

    async fn get_idea(&self, id: IdeaId) -> Result<Option<Idea>> {
        Ok(self.store.ideas().get(id).await.map(Idea::from))
    }

    async fn list_ideas_for_session(&self, session_id: SessionId) -> Result<Vec<Idea>> {
        Ok(self.ideas_of(session_id).await)
    }

    async fn update_idea(&self, id: IdeaId, patch: IdeaPatch) -> Result<Option<Idea>> {
        let updated = self
            .store
            .ideas()
            .update(
                id,
                Box::new(move |record: &mut IdeaRecord| {
                    if let Some(content) = patch.content {
                        record.content = content;
                    }
                    if let Some(category) = patch.category {
                        record.category = category;
                    }
                    if let Some(votes) = patch.votes {
                        record.votes = votes;
                    }
                    record.updated_at = Utc::now();
                }),
            )
            .await?;

        match &updated {
            Some(_) => tracing::info!("[Repository] Updated idea {}", id),
            None => tracing::debug!("[Repository] Idea {} not found for update", id),
        }
        Ok(updated.map(Idea::from))
    }

    async fn apply_vote(&self, id: IdeaId, delta: i64) -> Result<Option<Idea>> {
        let updated = self
            .store
            .ideas()
            .update(
                id,
                Box::new(move |record: &mut IdeaRecord| {
                    record.votes = record.votes.saturating_add(delta);
                    record.updated_at = Utc::now();
                }),
            )
            .await?;

        match &updated {
            Some(record) => tracing::info!("[Repository] Applied vote {:+} to idea {} (now {})", delta, id, record.votes),
            None => tracing::debug!("[Repository] Idea {} not found for vote", id),
        }
        Ok(updated.map(Idea::from))
    }

    async fn delete_idea(&self, id: IdeaId) -> Result<bool> {
        let deleted = self.store.ideas().delete(id).await?;
        if deleted {
            tracing::info!("[Repository] Deleted idea {}", id);
        }
        Ok(deleted)
    }

    async fn idea_exists(&self, id: IdeaId) -> Result<bool> {
        Ok(self.store.ideas().get(id).await.is_some())
    }
}
