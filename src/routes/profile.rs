use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    dto::profile_dto::{ProfileResponse, UpdateProfilePayload},
    error::Result,
    middleware::auth::Session,
    AppState,
};

#[axum::debug_handler]
pub async fn get_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse> {
    let profile = state.profile_service.find(session.user_id).await?;
    Ok(Json(ProfileResponse::from(profile)))
}

#[axum::debug_handler]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<UpdateProfilePayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let profile = state
        .profile_service
        .upsert_username(session.user_id, payload.username.trim())
        .await?;
    Ok(Json(ProfileResponse::from(Some(profile))))
}
