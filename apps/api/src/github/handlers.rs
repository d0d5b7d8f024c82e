//! Axum route handlers for the GitHub lookup API.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::handlers::extract_upload;
use crate::github::username::{detect_username, normalize_login};
use crate::github::{fetch_profile, GithubProfile};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct InsightResponse {
    pub text: String,
    pub profile: GithubProfile,
}

/// GET /api/github/:login
///
/// Looks up a manually entered handle; a leading `@` is tolerated.
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(login): Path<String>,
) -> Result<Json<GithubProfile>, AppError> {
    let login = normalize_login(&login)?
        .ok_or_else(|| AppError::Validation("GitHub username cannot be empty".to_string()))?;

    let profile = fetch_profile(state.github.as_ref(), &login).await?;
    Ok(Json(profile))
}

/// POST /api/insight
///
/// Full pipeline for an uploaded resume: extract text, detect a handle, fetch
/// the profile. Any failure along the way returns only the error.
pub async fn handle_insight(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<InsightResponse>, AppError> {
    let text = extract_upload(&state, &mut multipart).await?;

    let login = detect_username(&text).ok_or(AppError::NoGithubHandleFound)?;
    info!("Detected GitHub handle {login} in upload");

    let profile = fetch_profile(state.github.as_ref(), &login).await?;
    Ok(Json(InsightResponse { text, profile }))
}
