//! Session endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use brainstorm_application::SessionView;
use serde::Deserialize;

use super::error::ApiError;
use super::extract::{ApiJson, ApiPath};
use crate::app::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub topic: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameSessionRequest {
    pub topic: Option<String>,
}

/// `POST /sessions`: creates a session seeded with generated ideas.
pub async fn create_session(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .session_service
        .create_session(request.topic.unwrap_or_default(), request.created_by)
        .await?;

    let location = state.location(&format!("/sessions/{}", session.id));
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(session)))
}

pub async fn list_sessions(State(state): State<AppState>) -> Result<Json<Vec<SessionView>>, ApiError> {
    Ok(Json(state.session_service.list_sessions().await?))
}

pub async fn get_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<SessionView>, ApiError> {
    Ok(Json(state.session_service.get_session(id).await?))
}

pub async fn rename_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(request): ApiJson<RenameSessionRequest>,
) -> Result<Json<SessionView>, ApiError> {
    let session = state
        .session_service
        .rename_session(id, request.topic.unwrap_or_default())
        .await?;
    Ok(Json(session))
}

/// `DELETE /sessions/{id}`: removes the session and all of its ideas.
pub async fn delete_session(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<StatusCode, ApiError> {
    state.session_service.delete_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
