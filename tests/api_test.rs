use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use carbon_curriculum_backend::{
    config::Config, routes, utils::token::issue_token, AppState,
};
use serde_json::{json, Value as JsonValue};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;

const SECRET: &str = "test_secret_key";

fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: "postgres://localhost/never_connected".into(),
        jwt_secret: SECRET.into(),
        public_rps: 1000,
        api_rps: 1000,
        required_lessons: 3,
        database_max_connections: 2,
        cors_allowed_origins: vec![],
    }
}

/// Router over a pool that never connects; only routes that answer before
/// touching the database are exercised here.
fn app() -> Router {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .connect_lazy(&config.database_url)
        .expect("lazy pool");
    routes::router(AppState::new(pool, config))
}

fn token() -> String {
    issue_token(
        SECRET,
        Uuid::new_v4(),
        Some("learner@example.edu"),
        None,
        chrono::Duration::hours(1),
    )
    .expect("token")
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, json)
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(app(), "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn emission_factors_are_public() {
    let (status, body) = send(app(), "GET", "/api/emission-factors", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["electricity"], 0.509);
    assert_eq!(body["transport"].as_array().unwrap().len(), 5);
    assert_eq!(body["food"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn preview_computes_worked_example() {
    let inputs = json!({
        "home": { "elec": 100, "gas": 10 },
        "transport": { "汽車": 50 },
        "food": { "牛肉": 2 }
    });
    let (status, body) = send(app(), "POST", "/api/calculator/preview", None, Some(inputs)).await;
    assert_eq!(status, StatusCode::OK);
    assert!((body["total_monthly_kg"].as_f64().unwrap() - 240.55).abs() < 1e-9);
    assert_eq!(body["display"]["annual_kg"], "2886.60");
    assert_eq!(body["display"]["food_kg"], "160.00");
}

#[tokio::test]
async fn preview_rejects_non_numeric_quantities() {
    let inputs = json!({ "home": { "elec": "lots" } });
    let (status, body) = send(app(), "POST", "/api/calculator/preview", None, Some(inputs)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn protected_routes_need_a_bearer_token() {
    for uri in [
        "/api/profile",
        "/api/navigation",
        "/api/learning/modules",
        "/api/calculator/results",
        "/api/post-quiz",
        "/api/admin/stats",
    ] {
        let (status, body) = send(app(), "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["error"], "missing_authorization", "{uri}");
    }
}

#[tokio::test]
async fn tampered_token_is_rejected() {
    let forged = issue_token(
        "some_other_secret",
        Uuid::new_v4(),
        None,
        Some("admin"),
        chrono::Duration::hours(1),
    )
    .unwrap();
    let (status, body) = send(app(), "GET", "/api/admin/users", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "invalid_token");
}

#[tokio::test]
async fn survey_without_personal_info_is_rejected_before_storage() {
    let payload = json!({
        "personal_info": { "grade": "大一", "college": "工程" },
        "knowledge_answers": { "q3": "B", "q4": "C", "q5": "B" }
    });
    let (status, body) = send(app(), "POST", "/api/survey", Some(&token()), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "請先完成所有個人資料的選擇！");
}

#[tokio::test]
async fn survey_with_short_college_quiz_is_rejected() {
    let payload = json!({
        "personal_info": { "grade": "大一", "college": "其他", "hasCourse": "no" },
        "knowledge_answers": { "q3": "B", "q4": "C", "q5": "B" },
        "college_answers": { "q-工程-1": "C", "q-管理-4": "B", "q-管理-5": "B" }
    });
    let (status, body) = send(app(), "POST", "/api/survey", Some(&token()), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "請完成您學群的三題進階知識題！");
}

#[tokio::test]
async fn unknown_page_is_not_found() {
    let (status, _) = send(app(), "GET", "/api/navigation/settings", Some(&token()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_profile_username_fails_validation() {
    let (status, _) = send(
        app(),
        "PUT",
        "/api/profile",
        Some(&token()),
        Some(json!({ "username": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unselected_personal_info_field_gets_the_survey_notice() {
    let payload = json!({
        "personal_info": { "grade": "", "college": "工程", "hasCourse": "yes" },
        "knowledge_answers": { "q3": "B", "q4": "C", "q5": "B" },
        "college_answers": { "q-工程-1": "C", "q-工程-2": "B", "q-工程-3": "B" }
    });
    let (status, body) = send(app(), "POST", "/api/survey", Some(&token()), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "請先完成所有個人資料的選擇！");
}

#[tokio::test]
async fn malformed_bodies_are_json_bad_requests() {
    let cases = [
        ("/api/survey", json!({ "personal_info": { "college": "資訊" } })),
        ("/api/post-quiz", json!({ "answers": 5 })),
        ("/api/learning/progress/toggle", json!({ "module_id": "carbon-basics" })),
    ];
    for (uri, payload) in cases {
        let (status, body) = send(app(), "POST", uri, Some(&token()), Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }

    let (status, body) = send(
        app(),
        "PUT",
        "/api/profile",
        Some(&token()),
        Some(json!({ "username": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
