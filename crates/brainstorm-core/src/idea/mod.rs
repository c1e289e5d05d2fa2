//! Idea domain module.
//!
//! # Module Structure
//!
//! - `model`: `Idea`, creation/patch inputs, `VoteType`, ordering rules
//! - `repository`: Idea repository trait for persistence

mod model;
pub mod repository;

pub use model::{
    Idea, IdeaId, IdeaPatch, MAX_CATEGORY_LEN, MAX_CONTENT_LEN, NewIdea, VoteType, sort_ideas,
};
pub use repository::IdeaRepository;
