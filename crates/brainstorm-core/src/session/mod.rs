//! Session domain module.
//!
//! A session is a brainstorming unit scoped to one topic. Its ideas are
//! never stored with it; repositories attach them on every read.

mod model;
pub mod repository;

pub use model::{
    DEFAULT_CREATOR, MAX_CREATOR_LEN, MAX_TOPIC_LEN, NewSession, Session, SessionId, SessionPatch,
};
pub use repository::SessionRepository;
