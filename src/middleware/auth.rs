use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::Error;
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

fn unauthorized(code: &'static str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

fn bearer_token(headers: &HeaderMap) -> std::result::Result<&str, &'static str> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or("missing_authorization")?;
    let auth_str = auth_header.to_str().map_err(|_| "bad_authorization")?;
    auth_str.strip_prefix("Bearer ").ok_or("unsupported_scheme")
}

pub fn decode_claims(token: &str, secret: &str) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .ok()
        .map(|data| data.claims)
        .filter(|claims| Uuid::parse_str(&claims.sub).is_ok())
}

pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(req.headers()) {
        Ok(token) => token,
        Err(code) => return unauthorized(code),
    };

    match decode_claims(token, &state.config.jwt_secret) {
        Some(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        None => unauthorized("invalid_token"),
    }
}

/// Runs after [`require_bearer_auth`]; admin status comes from `user_roles`,
/// not from the token's role claim.
pub async fn require_admin(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let Some(user_id) = req
        .extensions()
        .get::<Claims>()
        .and_then(|c| Uuid::parse_str(&c.sub).ok())
    else {
        return unauthorized("missing_authorization");
    };

    match state.admin_service.is_admin(user_id).await {
        Ok(true) => next.run(req).await,
        Ok(false) => {
            tracing::warn!(%user_id, "non-admin tried to reach admin route");
            (StatusCode::FORBIDDEN, Json(json!({"error":"forbidden"}))).into_response()
        }
        Err(err) => err.into_response(),
    }
}

/// The authenticated caller, taken from verified claims.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl Session {
    pub fn default_username(&self) -> Option<&str> {
        self.email
            .as_deref()
            .and_then(crate::services::profile_service::username_from_email)
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<Claims>()
            .ok_or_else(|| Error::Unauthorized("missing_authorization".to_string()))?;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| Error::Unauthorized("invalid_token".to_string()))?;
        Ok(Session {
            user_id,
            email: claims.email.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::token::issue_token;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_scheme_is_required() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), Err("missing_authorization"));
        headers.insert("authorization", HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), Err("unsupported_scheme"));
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        assert_eq!(bearer_token(&headers), Ok("abc"));
    }

    #[test]
    fn issued_tokens_decode_with_the_same_secret_only() {
        let user_id = Uuid::new_v4();
        let token = issue_token(
            "secret",
            user_id,
            Some("a@b.c"),
            None,
            chrono::Duration::minutes(5),
        )
        .unwrap();
        let claims = decode_claims(&token, "secret").unwrap();
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email.as_deref(), Some("a@b.c"));
        assert!(decode_claims(&token, "other").is_none());
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let token = issue_token(
            "secret",
            Uuid::new_v4(),
            None,
            None,
            chrono::Duration::hours(-2),
        )
        .unwrap();
        assert!(decode_claims(&token, "secret").is_none());
    }
}
