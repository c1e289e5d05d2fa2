//! HTTP surface and process wiring for Brainstorm.
//!
//! `api` holds the axum router and handlers; `app` builds the shared state
//! from configuration, installs logging and runs the server.

pub mod api;
pub mod app;

pub use api::router;
pub use app::{AppBootstrap, AppState};
