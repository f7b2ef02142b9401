//! Registration, login and logout handlers

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use semainier_shared::Error;
use semainier_user::{RegisterInput, UserRow, profile_pseudo};
use serde::Deserialize;
use serde_json::json;

use crate::auth::{AUTH_COOKIE_NAME, generate_token};
use crate::error::ApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// POST /api/auth/register
#[tracing::instrument(skip(state, jar, payload), fields(email = %payload.email))]
pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let input = RegisterInput {
        email: payload.email,
        password: payload.password,
        confirm: payload.confirm,
    };

    let user = semainier_user::register(&state.pool, input).await?;
    let pseudo = profile_pseudo(&state.pool, &user.id).await?;
    let jar = session_jar(jar, &state, &user)?;

    Ok((
        jar,
        (
            StatusCode::CREATED,
            Json(json!({
                "user": { "id": user.id, "email": user.email },
                "pseudo": pseudo,
            })),
        ),
    ))
}

/// POST /api/auth/login
#[tracing::instrument(skip(state, jar, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let user = semainier_user::login(&state.pool, &payload.email, &payload.password)
        .await
        .map_err(|e| match e {
            // Bad credentials come back as a validation error; the API
            // contract wants a 401 without leaking which field failed.
            Error::Validation(message) => ApiError::unauthorized(&message),
            other => ApiError::from(other),
        })?;
    let pseudo = profile_pseudo(&state.pool, &user.id).await?;
    let jar = session_jar(jar, &state, &user)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok((
        jar,
        Json(json!({
            "user": { "id": user.id, "email": user.email },
            "pseudo": pseudo,
        })),
    ))
}

/// POST /api/auth/logout - Clear session cookie
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    let jar = jar.remove(Cookie::from(AUTH_COOKIE_NAME));
    (jar, StatusCode::NO_CONTENT)
}

fn session_jar(jar: CookieJar, state: &AppState, user: &UserRow) -> Result<CookieJar, ApiError> {
    let lifetime_seconds = state.config.jwt.expiration_days as u64 * 24 * 60 * 60;
    let token = generate_token(user.id.clone(), &state.config.jwt.secret, lifetime_seconds)
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to generate token");
            ApiError::internal()
        })?;

    let cookie = Cookie::build((AUTH_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .build();

    Ok(jar.add(cookie))
}
