use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    dto::post_quiz_dto::{graded_from_rows, PostQuizQuestion, PostQuizView, SubmitPostQuizPayload},
    error::{Error, Result},
    middleware::auth::Session,
    models::page::Page,
    services::{
        curriculum_service::POST_QUIZ_KEYS, grading_service::GradingService,
        unlock_service::SURVEY_REQUIRED_NOTICE,
    },
    AppState,
};

/// Lock status, the questions, or the graded submission, depending on
/// where the learner is.
#[axum::debug_handler]
pub async fn get_post_quiz(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse> {
    let navigation = &state.navigation_service;
    let snapshot = navigation.snapshot(session.user_id).await?;
    if !snapshot.is_quiz_completed() {
        return Err(Error::Forbidden(SURVEY_REQUIRED_NOTICE.to_string()));
    }

    let rows = state
        .survey_service
        .post_quiz_responses(session.user_id)
        .await?;
    if !rows.is_empty() {
        let score = GradingService::score(graded_from_rows(&rows, &POST_QUIZ_KEYS));
        return Ok(Json(PostQuizView::Completed { score }));
    }

    let gate = navigation.gate();
    let status = gate.status(snapshot.completed_lessons);
    if !status.unlocked {
        return Ok(Json(PostQuizView::Locked {
            gate: status,
            notice: gate.locked_notice(),
        }));
    }

    Ok(Json(PostQuizView::Open {
        gate: status,
        questions: POST_QUIZ_KEYS.iter().map(PostQuizQuestion::from).collect(),
    }))
}

#[axum::debug_handler]
pub async fn submit_post_quiz(
    State(state): State<AppState>,
    session: Session,
    payload: std::result::Result<Json<SubmitPostQuizPayload>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(payload) = payload?;
    state
        .navigation_service
        .require(session.user_id, Page::PostQuiz)
        .await?;

    let missing = GradingService::unanswered_post_quiz(&payload.answers);
    if missing > 0 {
        return Err(Error::BadRequest(format!(
            "請回答所有題目 (還有 {} 題未作答)",
            missing
        )));
    }

    let score = GradingService::grade_post_quiz(&payload.answers);
    state
        .survey_service
        .record_post_quiz(session.user_id, &GradingService::post_quiz_rows(&score))
        .await?;

    Ok((StatusCode::CREATED, Json(score)))
}
