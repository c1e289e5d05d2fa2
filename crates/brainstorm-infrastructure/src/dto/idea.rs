//! Idea record

use brainstorm_core::idea::Idea;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::Record;

/// One element of `ideas.json`. The owning session id is stored inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaRecord {
    pub id: u64,
    pub content: String,
    pub category: String,
    pub votes: i64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub session_id: u64,
}

impl From<IdeaRecord> for Idea {
    fn from(record: IdeaRecord) -> Self {
        Idea {
            id: record.id,
            content: record.content,
            category: record.category,
            votes: record.votes,
            created_by: record.created_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
            session_id: record.session_id,
        }
    }
}

impl From<&Idea> for IdeaRecord {
    fn from(idea: &Idea) -> Self {
        Self {
            id: idea.id,
            content: idea.content.clone(),
            category: idea.category.clone(),
            votes: idea.votes,
            created_by: idea.created_by.clone(),
            created_at: idea.created_at,
            updated_at: idea.updated_at,
            session_id: idea.session_id,
        }
    }
}

impl Record for IdeaRecord {
    fn id(&self) -> u64 {
        self.id
    }
}
