use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

use crate::{
    dto::navigation_dto::NavigationResponse,
    error::{Error, Result},
    middleware::auth::Session,
    models::page::Page,
    AppState,
};

#[axum::debug_handler]
pub async fn get_navigation(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse> {
    let navigation = &state.navigation_service;
    let snapshot = navigation.snapshot(session.user_id).await?;
    let pages = Page::ALL
        .into_iter()
        .map(|page| navigation.decide_for(&snapshot, page))
        .collect();

    Ok(Json(NavigationResponse {
        is_quiz_completed: snapshot.is_quiz_completed(),
        gate: navigation.gate().status(snapshot.completed_lessons),
        pages,
    }))
}

#[axum::debug_handler]
pub async fn get_page_access(
    State(state): State<AppState>,
    session: Session,
    Path(page): Path<String>,
) -> Result<impl IntoResponse> {
    let page: Page = page.parse().map_err(Error::NotFound)?;
    let decision = state
        .navigation_service
        .decide(session.user_id, page)
        .await?;
    Ok(Json(decision))
}
