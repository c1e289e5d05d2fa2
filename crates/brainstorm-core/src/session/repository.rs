//! Persistence port for sessions.

use super::model::{NewSession, Session, SessionId, SessionPatch};
use crate::error::Result;
use async_trait::async_trait;

/// Storage for sessions, independent of the backing medium.
///
/// New ids are the largest stored id plus one (1 when empty). Returned
/// sessions carry their ideas in [`crate::idea::sort_ideas`] order, and a
/// deleted session takes its ideas with it.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Persists a new session and returns it with its assigned id and timestamps.
    async fn create_session(&self, session: NewSession) -> Result<Session>;

    /// `Ok(None)` when no session has this id.
    async fn get_session(&self, id: SessionId) -> Result<Option<Session>>;

    /// Lists all sessions with their ideas attached, newest first.
    async fn list_sessions(&self) -> Result<Vec<Session>>;

    /// Renames a session's topic and stamps its update time.
    ///
    /// Returns `Ok(None)` when the session does not exist.
    async fn update_session(&self, id: SessionId, patch: SessionPatch) -> Result<Option<Session>>;

    /// Removes the session and its ideas. `Ok(false)` leaves storage untouched.
    async fn delete_session(&self, id: SessionId) -> Result<bool>;

    /// Checks whether a session with the given id exists.
    async fn session_exists(&self, id: SessionId) -> Result<bool>;
}
