//! Application layer for Brainstorm.
//!
//! This crate provides the use cases that coordinate the domain model, the
//! idea generator and the repository, plus the view types handed to the API.

pub mod session_service;
pub mod validation;
pub mod view;

pub use session_service::SessionService;
pub use view::{IdeaView, SessionView};
