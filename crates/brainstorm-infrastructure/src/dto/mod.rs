//! Persisted record shapes.
//!
//! These are the exact layouts of `sessions.json` and `ideas.json`: flat
//! lower-camel-case objects. Domain types never touch serde directly; the
//! repository converts at the boundary.

mod idea;
mod session;

pub use idea::IdeaRecord;
pub use session::SessionRecord;
