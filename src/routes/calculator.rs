use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    dto::calculator_dto::{BreakdownResponse, CalculatorHistoryResponse, SavedResultResponse},
    error::Result,
    middleware::auth::Session,
    models::page::Page,
    services::emissions_service::{self, CalculatorInputs},
    AppState,
};

#[axum::debug_handler]
pub async fn emission_factors() -> impl IntoResponse {
    Json(emissions_service::factor_table())
}

/// Stateless breakdown; nothing is stored. Non-numeric quantities are a 400.
#[axum::debug_handler]
pub async fn preview(
    payload: std::result::Result<Json<CalculatorInputs>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(inputs) = payload?;
    Ok(Json(BreakdownResponse::from(emissions_service::calculate(&inputs))))
}

#[axum::debug_handler]
pub async fn save_result(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<CalculatorInputs>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(inputs) = payload?;
    state
        .navigation_service
        .require(session.user_id, Page::Calculator)
        .await?;
    let (result, breakdown) = state
        .calculator_service
        .save(session.user_id, &inputs)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SavedResultResponse {
            result,
            breakdown: BreakdownResponse::from(breakdown),
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_results(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse> {
    state
        .navigation_service
        .require(session.user_id, Page::Calculator)
        .await?;
    let items = state.calculator_service.history(session.user_id).await?;
    Ok(Json(CalculatorHistoryResponse::from(items)))
}
