//! Session domain model.

use chrono::{DateTime, Utc};

use crate::idea::Idea;

/// Identifier assigned to a session by the repository (max existing + 1).
pub type SessionId = u64;

/// Creator recorded when a request does not name one.
pub const DEFAULT_CREATOR: &str = "Anonymous";

/// Maximum topic length, in characters.
pub const MAX_TOPIC_LEN: usize = 200;

/// Maximum creator name length, in characters.
pub const MAX_CREATOR_LEN: usize = 100;

/// A brainstorming session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Unique, monotonically assigned identifier.
    pub id: SessionId,
    /// The topic ideas are generated for.
    pub topic: String,
    /// Name of whoever opened the session.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Ideas belonging to this session, highest votes first.
    ///
    /// Derived from the idea store on read; empty on freshly created sessions.
    pub ideas: Vec<Idea>,
}

/// Fields supplied by the caller when creating a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSession {
    pub topic: String,
    pub created_by: String,
}

/// The only in-place mutation a session supports: a topic rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPatch {
    pub topic: String,
}
