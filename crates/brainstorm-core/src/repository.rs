//! Repository trait re-exports.
//!
//! This module provides centralized access to all repository traits.

pub use crate::idea::IdeaRepository;
pub use crate::session::SessionRepository;

/// A store that owns both sessions and their ideas.
///
/// Cascading deletes need both collections, so services hold one handle
/// implementing both traits.
pub trait BrainstormRepository: SessionRepository + IdeaRepository {}

impl<T> BrainstormRepository for T where T: SessionRepository + IdeaRepository {}
