//! Recipe CRUD handlers

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use semainier_recipe::RecipeInput;
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::Auth;
use crate::routes::AppState;

/// GET /api/recipes
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
) -> Result<impl IntoResponse, ApiError> {
    let scope = state.resolver.resolve(&auth.user_id).await?;
    let recipes = semainier_recipe::list_recipes(&state.pool, &scope)
        .await
        .map_err(|e| ApiError::from(e).fallback("Impossible de charger tes recettes."))?;

    Ok(Json(json!({ "recipes": recipes })))
}

/// POST /api/recipes
#[tracing::instrument(skip(state, auth, input), fields(user_id = %auth.user_id))]
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(input): Json<RecipeInput>,
) -> Result<impl IntoResponse, ApiError> {
    let scope = state.resolver.resolve(&auth.user_id).await?;
    let recipe = semainier_recipe::create_recipe(&state.pool, &scope, &auth.user_id, input)
        .await
        .map_err(|e| {
            ApiError::from(e).fallback("Impossible d'enregistrer la recette. Réessaie plus tard.")
        })?;

    Ok((StatusCode::CREATED, Json(json!({ "recipe": recipe }))))
}

/// GET /api/recipes/{id}
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn show(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let scope = state.resolver.resolve(&auth.user_id).await?;
    let recipe = semainier_recipe::get_recipe(&state.pool, &scope, &auth.user_id, &id)
        .await
        .map_err(|e| ApiError::from(e).fallback("Impossible de charger cette recette."))?;

    Ok(Json(json!({ "recipe": recipe })))
}

/// PUT /api/recipes/{id}
#[tracing::instrument(skip(state, auth, input), fields(user_id = %auth.user_id))]
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
    Json(input): Json<RecipeInput>,
) -> Result<impl IntoResponse, ApiError> {
    let scope = state.resolver.resolve(&auth.user_id).await?;
    let recipe = semainier_recipe::update_recipe(&state.pool, &scope, &id, input)
        .await
        .map_err(|e| {
            ApiError::from(e).fallback("Impossible de mettre à jour la recette. Réessaie plus tard.")
        })?;

    Ok(Json(json!({ "recipe": recipe })))
}

/// DELETE /api/recipes/{id}
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let scope = state.resolver.resolve(&auth.user_id).await?;
    semainier_recipe::delete_recipe(&state.pool, &scope, &id)
        .await
        .map_err(|e| {
            ApiError::from(e).fallback("Impossible de supprimer la recette. Réessaie plus tard.")
        })?;

    Ok(StatusCode::NO_CONTENT)
}
