use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use semainier_household::ScopeResolver;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use crate::middleware::auth_middleware;

mod auth;
mod health;
mod household;
mod menus;
mod profile;
mod recipes;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub pool: SqlitePool,
    pub resolver: ScopeResolver,
}

pub fn router(app_state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/profile", get(profile::show))
        .route("/api/profile/pseudo", put(profile::update_pseudo))
        .route(
            "/api/household",
            get(household::show).post(household::create),
        )
        .route("/api/household/join", post(household::join))
        .route("/api/household/members", post(household::invite))
        .route("/api/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/api/recipes/{id}",
            get(recipes::show).put(recipes::update).delete(recipes::remove),
        )
        .route("/api/menus/week", get(menus::week).put(menus::save_week))
        .route("/api/menus/week/copy-previous", post(menus::copy_previous))
        .route("/api/menus/template", get(menus::template))
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ));

    Router::new()
        // Health check endpoints (no auth required)
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .merge(
            Router::new()
                .route("/api/auth/register", post(auth::register))
                .route("/api/auth/login", post(auth::login))
                .merge(protected)
                .with_state(app_state),
        )
        .layer(TraceLayer::new_for_http())
}
