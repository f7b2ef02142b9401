use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::auth::{AUTH_COOKIE_NAME, validate_token};
use crate::error::ApiError;
use crate::routes::AppState;

const AUTH_REQUIRED: &str = "Connecte-toi pour continuer.";

/// Auth extension containing user_id extracted from JWT
#[derive(Clone, Debug)]
pub struct Auth {
    pub user_id: String,
}

/// Authentication middleware that validates JWT from cookie
///
/// Extracts auth_token cookie, validates JWT, verifies the user still
/// exists, and inserts an Auth extension with user_id.
/// Responds 401 if:
/// - Token is missing
/// - Token is invalid or expired
/// - User does not exist anymore
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match jar.get(AUTH_COOKIE_NAME) {
        Some(cookie) => cookie.value(),
        None => {
            return ApiError::unauthorized(AUTH_REQUIRED).into_response();
        }
    };

    let user_id = match validate_token(token, &state.config.jwt.secret) {
        Ok(user_id) => user_id,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected invalid auth token");
            return ApiError::unauthorized(AUTH_REQUIRED).into_response();
        }
    };

    // A deleted account keeps its cookie until expiry; check the row.
    let user_exists = sqlx::query("SELECT id FROM users WHERE id = ?1")
        .bind(&user_id)
        .fetch_optional(&state.pool)
        .await;

    match user_exists {
        Ok(Some(_)) => {
            req.extensions_mut().insert(Auth { user_id });
            next.run(req).await
        }
        Ok(None) => {
            tracing::warn!(user_id = %user_id, "Auth token names an unknown user");
            ApiError::unauthorized(AUTH_REQUIRED).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to check user existence");
            ApiError::unauthorized(AUTH_REQUIRED).into_response()
        }
    }
}
