//! Idea and voting endpoints.

use std::str::FromStr;

use axum::Json;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use brainstorm_application::IdeaView;
use brainstorm_core::idea::VoteType;
use serde::Deserialize;

use super::error::ApiError;
use super::extract::{ApiJson, ApiPath};
use crate::app::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIdeaRequest {
    pub content: Option<String>,
    pub category: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditIdeaRequest {
    pub content: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub vote_type: Option<String>,
}

impl VoteRequest {
    /// Accepts exactly `up` or `down`.
    fn parse(&self) -> Result<VoteType, ApiError> {
        match self.vote_type.as_deref() {
            None => Err(ApiError::bad_request("Vote type is required")),
            Some(raw) if raw.trim().is_empty() => Err(ApiError::bad_request("Vote type is required")),
            Some(raw) => VoteType::from_str(raw)
                .map_err(|_| ApiError::bad_request("Vote type must be 'up' or 'down'")),
        }
    }
}

/// `POST /sessions/{id}/ideas`
pub async fn add_idea(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<u64>,
    ApiJson(request): ApiJson<CreateIdeaRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let idea = state
        .session_service
        .add_idea(
            session_id,
            request.content.unwrap_or_default(),
            request.category.unwrap_or_default(),
            request.created_by,
        )
        .await?;

    let location = state.location(&format!("/ideas/{}", idea.id));
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(idea)))
}

/// `GET /sessions/{id}/ideas`
pub async fn list_ideas(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<u64>,
) -> Result<Json<Vec<IdeaView>>, ApiError> {
    Ok(Json(state.session_service.list_ideas(session_id).await?))
}

/// `POST /sessions/{id}/generate-ideas`
pub async fn generate_ideas(
    State(state): State<AppState>,
    ApiPath(session_id): ApiPath<u64>,
) -> Result<Json<Vec<IdeaView>>, ApiError> {
    let ideas = state
        .session_service
        .generate_ideas_for_session(session_id)
        .await?;
    Ok(Json(ideas))
}

pub async fn get_idea(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<Json<IdeaView>, ApiError> {
    Ok(Json(state.session_service.get_idea(id).await?))
}

pub async fn edit_idea(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(request): ApiJson<EditIdeaRequest>,
) -> Result<Json<IdeaView>, ApiError> {
    let idea = state
        .session_service
        .edit_idea(id, request.content, request.category)
        .await?;
    Ok(Json(idea))
}

/// `POST /ideas/{id}/vote` with `{"voteType": "up" | "down"}`
pub async fn vote_on_idea(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
    ApiJson(request): ApiJson<VoteRequest>,
) -> Result<Json<IdeaView>, ApiError> {
    let vote = request.parse()?;
    Ok(Json(state.session_service.vote_on_idea(id, vote).await?))
}

pub async fn delete_idea(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<u64>,
) -> Result<StatusCode, ApiError> {
    state.session_service.delete_idea(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
