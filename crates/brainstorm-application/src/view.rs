//! Read models returned to API clients.

use brainstorm_core::idea::Idea;
use brainstorm_core::session::Session;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format of `createdAt` in views (UTC).
pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format(CREATED_AT_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: u64,
    pub topic: String,
    pub created_by: String,
    pub created_at: String,
    pub ideas: Vec<IdeaView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaView {
    pub id: u64,
    pub content: String,
    pub category: String,
    pub votes: i64,
    pub created_by: String,
    pub created_at: String,
    pub session_id: u64,
}

impl From<&Idea> for IdeaView {
    fn from(idea: &Idea) -> Self {
        Self {
            id: idea.id,
            content: idea.content.clone(),
            category: idea.category.clone(),
            votes: idea.votes,
            created_by: idea.created_by.clone(),
            created_at: format_timestamp(&idea.created_at),
            session_id: idea.session_id,
        }
    }
}

impl From<Idea> for IdeaView {
    fn from(idea: Idea) -> Self {
        Self::from(&idea)
    }
}

impl From<Session> for SessionView {
    fn from(session: Session) -> Self {
        Self {
            id: session.id,
            created_at: format_timestamp(&session.created_at),
            ideas: session.ideas.iter().map(IdeaView::from).collect(),
            topic: session.topic,
            created_by: session.created_by,
        }
    }
}
