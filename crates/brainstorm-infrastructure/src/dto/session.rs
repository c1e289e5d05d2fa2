//! Session record

use brainstorm_core::idea::Idea;
use brainstorm_core::session::Session;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::Record;

/// One element of `sessions.json`.
///
/// A session's ideas live in `ideas.json`; any `ideas` field found in older
/// files is ignored on load and never written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: u64,
    pub topic: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Builds the domain session, attaching `ideas` as given.
    pub fn into_domain(self, ideas: Vec<Idea>) -> Session {
        Session {
            id: self.id,
            topic: self.topic,
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
            ideas,
        }
    }
}

impl From<&Session> for SessionRecord {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id,
            topic: session.topic.clone(),
            created_by: session.created_by.clone(),
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

impl Record for SessionRecord {
    fn id(&self) -> u64 {
        self.id
    }
}
