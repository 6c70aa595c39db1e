use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    dto::learning_dto::{
        LearningModulesResponse, LearningProgressResponse, ToggleLessonPayload,
        ToggleLessonResponse,
    },
    error::{Error, Result},
    middleware::auth::Session,
    models::{page::Page, persona::Persona, profile::Profile},
    services::{
        curriculum_service::{Catalogue, CurriculumService},
        unlock_service::SURVEY_REQUIRED_NOTICE,
    },
    AppState,
};

fn catalogue_for(profile: Option<&Profile>) -> Result<(Persona, Catalogue)> {
    let profile =
        profile.ok_or_else(|| Error::Forbidden(SURVEY_REQUIRED_NOTICE.to_string()))?;
    let persona = profile
        .persona()
        .ok_or_else(|| Error::Internal(format!("unknown persona on profile {}", profile.id)))?;
    Ok((persona, CurriculumService::catalogue_for(persona, profile.college())))
}

#[axum::debug_handler]
pub async fn list_modules(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse> {
    let navigation = &state.navigation_service;
    let snapshot = navigation.require(session.user_id, Page::Learning).await?;
    let (persona, catalogue) = catalogue_for(snapshot.profile.as_ref())?;
    let rows = state.learning_service.list(session.user_id).await?;
    let gate = navigation.gate().status(snapshot.completed_lessons);

    Ok(Json(LearningModulesResponse::build(
        persona, &catalogue, &rows, gate,
    )))
}

#[axum::debug_handler]
pub async fn get_progress(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse> {
    let items = state.learning_service.list(session.user_id).await?;
    let completed_lessons = items.iter().filter(|r| r.completed).count() as u32;
    let gate = state.navigation_service.gate().status(completed_lessons);
    Ok(Json(LearningProgressResponse {
        items,
        completed_lessons,
        gate,
    }))
}

#[axum::debug_handler]
pub async fn toggle_lesson(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<ToggleLessonPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    payload.validate()?;
    let navigation = &state.navigation_service;
    let snapshot = navigation.require(session.user_id, Page::Learning).await?;
    let (_, catalogue) = catalogue_for(snapshot.profile.as_ref())?;

    let progress = state
        .learning_service
        .toggle(
            session.user_id,
            &catalogue,
            &payload.module_id,
            &payload.lesson_title,
        )
        .await?;
    let completed = state.learning_service.completed_count(session.user_id).await?;

    Ok(Json(ToggleLessonResponse {
        progress,
        gate: navigation.gate().status(completed),
    }))
}
