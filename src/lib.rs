pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
pub mod routes;

pub use routes::AppState;

use semainier_household::ScopeResolver;

/// Create the app router
///
/// Builds the Axum router with all routes configured; also used by
/// integration tests without starting the full server.
pub fn create_app(pool: sqlx::SqlitePool, config: config::Config) -> axum::Router {
    let state = AppState {
        resolver: ScopeResolver::new(pool.clone()),
        config,
        pool,
    };

    routes::router(state)
}
