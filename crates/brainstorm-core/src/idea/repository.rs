//! Persistence port for ideas.

use super::model::{Idea, IdeaId, IdeaPatch, NewIdea};
use crate::error::Result;
use crate::session::SessionId;
use async_trait::async_trait;

/// Storage for ideas. Every idea belongs to exactly one stored session.
#[async_trait]
pub trait IdeaRepository: Send + Sync {
    /// Persists a new idea with zero votes.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `idea.session_id` does not reference an existing session.
    async fn create_idea(&self, idea: NewIdea) -> Result<Idea>;

    async fn get_idea(&self, id: IdeaId) -> Result<Option<Idea>>;

    /// Lists the ideas of one session in listing order.
    ///
    /// An unknown session yields an empty list.
    async fn list_ideas_for_session(&self, session_id: SessionId) -> Result<Vec<Idea>>;

    /// Writes the fields the patch carries and stamps the update time.
    ///
    /// Returns `Ok(None)` when the idea does not exist.
    async fn update_idea(&self, id: IdeaId, patch: IdeaPatch) -> Result<Option<Idea>>;

    /// Adds `delta` to the stored vote count without touching any other field
    /// except the update time.
    ///
    /// Returns `Ok(None)` when the idea does not exist.
    async fn apply_vote(&self, id: IdeaId, delta: i64) -> Result<Option<Idea>>;

    /// Deletes an idea. Returns `Ok(false)` when it did not exist.
    async fn delete_idea(&self, id: IdeaId) -> Result<bool>;

    /// Checks whether an idea with the given id exists.
    async fn idea_exists(&self, id: IdeaId) -> Result<bool>;
}
