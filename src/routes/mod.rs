pub mod admin;
pub mod calculator;
pub mod export;
pub mod health;
pub mod learning;
pub mod navigation;
pub mod post_quiz;
pub mod profile;
pub mod survey;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::middleware::{
    auth::{require_admin, require_bearer_auth},
    cors::cors_layer,
    rate_limit::{rps_middleware, RateLimiter},
};
use crate::AppState;

pub fn router(state: AppState) -> Router {
    let public_limiter = RateLimiter::new(state.config.public_rps);
    let api_limiter = RateLimiter::new(state.config.api_rps);

    let base_routes = Router::new().route("/health", get(health::health));

    let public_api = Router::new()
        .route("/api/emission-factors", get(calculator::emission_factors))
        .route("/api/calculator/preview", post(calculator::preview))
        .layer(from_fn_with_state(public_limiter, rps_middleware));

    let learner_api = Router::new()
        .route(
            "/api/profile",
            get(profile::get_profile).put(profile::update_profile),
        )
        .route("/api/survey", post(survey::submit_survey))
        .route("/api/survey/responses", get(survey::list_responses))
        .route("/api/navigation", get(navigation::get_navigation))
        .route("/api/navigation/:page", get(navigation::get_page_access))
        .route("/api/learning/modules", get(learning::list_modules))
        .route("/api/learning/progress", get(learning::get_progress))
        .route(
            "/api/learning/progress/toggle",
            post(learning::toggle_lesson),
        )
        .route(
            "/api/calculator/results",
            get(calculator::list_results).post(calculator::save_result),
        )
        .route(
            "/api/post-quiz",
            get(post_quiz::get_post_quiz).post(post_quiz::submit_post_quiz),
        )
        .route_layer(from_fn_with_state(state.clone(), require_bearer_auth))
        .layer(from_fn_with_state(api_limiter.clone(), rps_middleware));

    let admin_api = Router::new()
        .route("/api/admin/stats", get(admin::get_stats))
        .route("/api/admin/users", get(admin::list_users))
        .route("/api/admin/users/export", get(export::export_users))
        .route("/api/admin/responses", get(admin::list_responses))
        .route(
            "/api/admin/calculator-results",
            get(admin::list_calculator_results),
        )
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn_with_state(state.clone(), require_bearer_auth))
        .layer(from_fn_with_state(api_limiter, rps_middleware));

    let cors = cors_layer(&state.config.cors_allowed_origins);

    base_routes
        .merge(public_api)
        .merge(learner_api)
        .merge(admin_api)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
