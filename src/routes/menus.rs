//! Weekly menu handlers built on the planner state machine

use axum::{
    Extension, Json,
    extract::{Query, State},
    response::IntoResponse,
};
use chrono::{NaiveDate, Utc};
use semainier_menu::{CopyOutcome, DayMenu, NOTHING_TO_COPY, Phase, WeekPlanner, template_week};
use serde::Deserialize;
use serde_json::json;

use crate::error::ApiError;
use crate::middleware::Auth;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SaveWeekPayload {
    pub date: Option<String>,
    #[serde(default)]
    pub days: Vec<DayMenu>,
}

#[derive(Debug, Deserialize)]
pub struct CopyPayload {
    pub date: Option<String>,
}

/// GET /api/menus/week?date=YYYY-MM-DD
#[tracing::instrument(skip(state, auth), fields(user_id = %auth.user_id))]
pub async fn week(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Query(query): Query<WeekQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let date = parse_date(query.date.as_deref())?;
    let mut planner = WeekPlanner::new(date);
    planner
        .load_week(&state.pool, &state.resolver, &auth.user_id)
        .await;

    if planner.phase() == Phase::LoadError {
        return Err(load_error(&planner));
    }

    Ok(Json(json!({
        "week": planner.week(),
        "source": planner.source(),
        "days": planner.days(),
    })))
}

/// PUT /api/menus/week
#[tracing::instrument(skip(state, auth, payload), fields(user_id = %auth.user_id))]
pub async fn save_week(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(payload): Json<SaveWeekPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let date = parse_date(payload.date.as_deref())?;
    let mut planner = WeekPlanner::new(date);
    planner.restore_days(payload.days);

    let saved = planner
        .save(&state.pool, &state.resolver, Some(&auth.user_id))
        .await?;

    Ok(Json(json!({
        "week": planner.week(),
        "days": planner.days(),
        "saved": { "id": saved.id, "created": saved.created },
    })))
}

/// POST /api/menus/week/copy-previous
///
/// Merges last week's saved days over the current local week and returns
/// the result without persisting it; the client saves explicitly.
#[tracing::instrument(skip(state, auth, payload), fields(user_id = %auth.user_id))]
pub async fn copy_previous(
    State(state): State<AppState>,
    Extension(auth): Extension<Auth>,
    Json(payload): Json<CopyPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let date = parse_date(payload.date.as_deref())?;
    let mut planner = WeekPlanner::new(date);
    planner
        .load_week(&state.pool, &state.resolver, &auth.user_id)
        .await;

    if planner.phase() == Phase::LoadError {
        return Err(load_error(&planner));
    }

    let outcome = planner
        .copy_previous_week(&state.pool, &state.resolver, &auth.user_id)
        .await?;

    let body = match outcome {
        CopyOutcome::Copied => json!({
            "copied": true,
            "week": planner.week(),
            "days": planner.days(),
        }),
        CopyOutcome::NothingToCopy => json!({
            "copied": false,
            "message": NOTHING_TO_COPY,
            "week": planner.week(),
            "days": planner.days(),
        }),
    };

    Ok(Json(body))
}

/// GET /api/menus/template
pub async fn template() -> impl IntoResponse {
    Json(json!({ "days": template_week() }))
}

fn parse_date(raw: Option<&str>) -> Result<NaiveDate, ApiError> {
    match raw {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| ApiError::validation("Renseigne une date valide.")),
        None => Ok(Utc::now().date_naive()),
    }
}

fn load_error(planner: &WeekPlanner) -> ApiError {
    match planner.last_error() {
        Some(message) => ApiError::from(semainier_shared::Error::Remote(message.to_string())),
        None => ApiError::internal(),
    }
}
