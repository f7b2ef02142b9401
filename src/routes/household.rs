//! Household handlers: overview, creation, invitations and joins

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::Auth;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePayload {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct InvitePayload {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinPayload {
    #[serde(default)]
    pub pseudo: String,
}

/// GET /api/household
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn show(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Result<impl IntoResponse, ApiError> {
    let overview = semainier_household::overview(&state.pool, &auth.user_id)
        .await
        .map_err(|e| ApiError::from(e).fallback("Impossible de charger le foyer."))?;

    let body = match overview {
        Some(overview) => json!({
            "household": overview.household,
            "members": overview.members,
        }),
        None => json!({ "household": null, "members": [] }),
    };

    Ok(Json(body))
}

/// POST /api/household
#[tracing::instrument(skip(state, auth, payload), fields(user_id = %auth.user_id))]
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(payload): Json<CreatePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let household = semainier_household::create(&state.pool, &auth.user_id, &payload.name)
        .await
        .map_err(|e| {
            ApiError::from(e).fallback("Impossible de créer le foyer. Réessaie plus tard.")
        })?;

    Ok((StatusCode::CREATED, Json(json!({ "household": household }))))
}

/// POST /api/household/members
#[tracing::instrument(skip(state, auth, payload), fields(user_id = %auth.user_id))]
pub async fn invite(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(payload): Json<InvitePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let member = semainier_household::invite(&state.pool, &auth.user_id, &payload.email)
        .await
        .map_err(|e| {
            ApiError::from(e)
                .fallback("Impossible d'ajouter ce membre. Vérifie l'email et réessaie.")
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "member": member,
            "message": "Membre ajouté au foyer !",
        })),
    ))
}

/// POST /api/household/join
#[tracing::instrument(skip(state, auth, payload), fields(user_id = %auth.user_id))]
pub async fn join(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(payload): Json<JoinPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let household = semainier_household::join(&state.pool, &auth.user_id, &payload.pseudo)
        .await
        .map_err(|e| {
            ApiError::from(e)
                .fallback("Impossible de rejoindre le foyer. Vérifie le pseudo communiqué.")
        })?;

    Ok(Json(json!({
        "household": household,
        "message": "Demande acceptée ! Tu partages maintenant ce foyer.",
    })))
}
