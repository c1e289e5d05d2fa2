//! Idea domain model.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use strum::{Display, EnumString};

use crate::session::SessionId;

/// Identifier assigned to an idea by the repository (max existing + 1).
pub type IdeaId = u64;

/// Maximum idea content length, in characters.
pub const MAX_CONTENT_LEN: usize = 500;

/// Maximum category length, in characters.
pub const MAX_CATEGORY_LEN: usize = 100;

/// A single suggestion belonging to exactly one session.
#[derive(Debug, Clone, PartialEq)]
pub struct Idea {
    pub id: IdeaId,
    pub content: String,
    pub category: String,
    /// Net votes. Starts at 0 and may go negative.
    pub votes: i64,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owning session. Must reference an existing session at creation time.
    pub session_id: SessionId,
}

impl Idea {
    /// Ordering used wherever ideas are listed: votes descending, then
    /// newest first, then highest id first.
    pub fn listing_order(a: &Idea, b: &Idea) -> Ordering {
        b.votes
            .cmp(&a.votes)
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    }
}

/// Sorts ideas into listing order in place.
pub fn sort_ideas(ideas: &mut [Idea]) {
    ideas.sort_by(Idea::listing_order);
}

/// Fields supplied when creating an idea. Votes always start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdea {
    pub session_id: SessionId,
    pub content: String,
    pub category: String,
    pub created_by: String,
}

/// Partial update of an idea. Each `None` field keeps the stored value, so
/// concurrent edits to different fields never overwrite each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdeaPatch {
    pub content: Option<String>,
    pub category: Option<String>,
    pub votes: Option<i64>,
}

impl IdeaPatch {
    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.category.is_none() && self.votes.is_none()
    }
}

/// Direction of a vote. Only the exact literals `up` and `down` parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum VoteType {
    Up,
    Down,
}

impl VoteType {
    /// The vote delta applied to an idea's count.
    pub fn delta(self) -> i64 {
        match self {
            VoteType::Up => 1,
            VoteType::Down => -1,
        }
    }
}
