//! HTTP API.
//!
//! # Routes
//!
//! Relative to the configured prefix (default `/api/Brainstorming`):
//!
//! | Method | Path                           | Handler                      |
//! |--------|--------------------------------|------------------------------|
//! | POST   | `/sessions`                    | [`sessions::create_session`] |
//! | GET    | `/sessions`                    | [`sessions::list_sessions`]  |
//! | GET    | `/sessions/{id}`               | [`sessions::get_session`]    |
//! | PATCH  | `/sessions/{id}`               | [`sessions::rename_session`] |
//! | DELETE | `/sessions/{id}`               | [`sessions::delete_session`] |
//! | GET    | `/sessions/{id}/ideas`         | [`ideas::list_ideas`]        |
//! | POST   | `/sessions/{id}/ideas`         | [`ideas::add_idea`]          |
//! | POST   | `/sessions/{id}/generate-ideas`| [`ideas::generate_ideas`]    |
//! | GET    | `/ideas/{id}`                  | [`ideas::get_idea`]          |
//! | PATCH  | `/ideas/{id}`                  | [`ideas::edit_idea`]         |
//! | DELETE | `/ideas/{id}`                  | [`ideas::delete_idea`]       |
//! | POST   | `/ideas/{id}/vote`             | [`ideas::vote_on_idea`]      |
//!
//! `GET /health` is always served at the root.

pub mod error;
mod extract;
pub mod health;
pub mod ideas;
pub mod sessions;

use axum::Router;
use axum::routing::{get, post};

pub use error::{ApiError, ErrorResponse};

use crate::app::AppState;

/// Builds the full application router for `state`.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route(
            "/sessions",
            get(sessions::list_sessions).post(sessions::create_session),
        )
        .route(
            "/sessions/{id}",
            get(sessions::get_session)
                .patch(sessions::rename_session)
                .delete(sessions::delete_session),
        )
        .route(
            "/sessions/{id}/ideas",
            get(ideas::list_ideas).post(ideas::add_idea),
        )
        .route("/sessions/{id}/generate-ideas", post(ideas::generate_ideas))
        .route(
            "/ideas/{id}",
            get(ideas::get_idea)
                .patch(ideas::edit_idea)
                .delete(ideas::delete_idea),
        )
        .route("/ideas/{id}/vote", post(ideas::vote_on_idea));

    // `nest` rejects an empty or root path, so an unprefixed API is merged instead.
    let routes = if state.api_prefix.is_empty() {
        Router::new().merge(api)
    } else {
        Router::new().nest(&state.api_prefix, api)
    };

    routes
        .route("/health", get(health::health_check))
        .fallback(route_not_found)
        .with_state(state)
}

async fn route_not_found() -> ApiError {
    ApiError::not_found("Resource not found")
}
