//! Profile handlers: account summary and pseudo updates

use axum::{Extension, Json, extract::State, response::IntoResponse};
use semainier_user::{profile_pseudo, user_by_id};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::Auth;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct PseudoPayload {
    #[serde(default)]
    pub pseudo: String,
}

/// GET /api/profile
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn show(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Result<impl IntoResponse, ApiError> {
    let user = user_by_id(&state.pool, &auth.user_id)
        .await?
        .ok_or_else(ApiError::internal)?;
    let pseudo = profile_pseudo(&state.pool, &user.id).await?;

    Ok(Json(json!({
        "user": { "id": user.id, "email": user.email },
        "pseudo": pseudo,
    })))
}

/// PUT /api/profile/pseudo
#[tracing::instrument(skip(state, auth, payload), fields(user_id = %auth.user_id))]
pub async fn update_pseudo(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(payload): Json<PseudoPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let pseudo = semainier_user::update_pseudo(&state.pool, &auth.user_id, &payload.pseudo)
        .await
        .map_err(|e| {
            ApiError::from(e).fallback("Impossible d'enregistrer le pseudo. Réessaie plus tard.")
        })?;

    Ok(Json(json!({
        "pseudo": pseudo,
        "message": "Pseudo mis à jour !",
    })))
}
