use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};

use crate::{
    dto::{
        admin_dto::{ResponseListResponse, UserListResponse},
        calculator_dto::CalculatorResultList,
        survey_dto::SurveyResponsesQuery,
    },
    error::Result,
    routes::survey::parse_survey_type,
    AppState,
};

#[axum::debug_handler]
pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.admin_service.stats().await?;
    Ok(Json(stats))
}

#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.admin_service.users().await?;
    Ok(Json(UserListResponse::from(users)))
}

#[axum::debug_handler]
pub async fn list_responses(
    State(state): State<AppState>,
    Query(query): Query<SurveyResponsesQuery>,
) -> Result<impl IntoResponse> {
    let survey_type = parse_survey_type(query.survey_type.as_deref())?;
    let items = state.survey_service.list_all(survey_type).await?;
    Ok(Json(ResponseListResponse::from(items)))
}

#[axum::debug_handler]
pub async fn list_calculator_results(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let items = state.calculator_service.list_all().await?;
    Ok(Json(CalculatorResultList::from(items)))
}
