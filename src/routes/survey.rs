use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    dto::survey_dto::{
        SubmitSurveyPayload, SurveyOutcomeResponse, SurveyResponsesQuery, SurveyResponsesResponse,
    },
    error::{Error, Result},
    middleware::auth::Session,
    models::survey_response::SurveyType,
    AppState,
};

#[axum::debug_handler]
pub async fn submit_survey(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<SubmitSurveyPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    let outcome = state
        .survey_service
        .submit(session.user_id, session.default_username(), &payload)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SurveyOutcomeResponse {
            persona: outcome.persona,
            persona_en: outcome.persona.english_name(),
            knowledge_score: outcome.knowledge_score,
            college_score: outcome.college_score,
            profile: outcome.profile,
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_responses(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<SurveyResponsesQuery>,
) -> Result<impl IntoResponse> {
    let survey_type = parse_survey_type(query.survey_type.as_deref())?;
    let items = state.survey_service.list(session.user_id, survey_type).await?;
    Ok(Json(SurveyResponsesResponse::from(items)))
}

/// Empty or absent means no filter.
pub fn parse_survey_type(raw: Option<&str>) -> Result<Option<SurveyType>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value.parse().map(Some).map_err(Error::BadRequest),
    }
}
