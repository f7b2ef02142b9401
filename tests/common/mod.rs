#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use http_body_util::BodyExt;
use semainier::config::{Config, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig};
use serde_json::Value;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use tower::ServiceExt;

pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        database: DatabaseConfig {
            url: ":memory:".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_string(),
            expiration_days: 7,
        },
        observability: ObservabilityConfig::default(),
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub async fn create_test_app(pool: SqlitePool) -> TestApp {
    let router = semainier::create_app(pool.clone(), test_config());
    TestApp { router, pool }
}

impl TestApp {
    /// Drives one request through the real router. `token` rides in the
    /// auth cookie, `body` as a JSON payload.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::COOKIE, format!("auth_token={token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        self.router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap()
    }

    /// Registers an account and returns the session token from its cookie.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self
            .send(
                "POST",
                "/api/auth/register",
                None,
                Some(serde_json::json!({
                    "email": email,
                    "password": password,
                    "confirm": password,
                })),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        auth_token(&response)
    }
}

/// Extracts the auth_token value from the Set-Cookie header.
pub fn auth_token(response: &Response<Body>) -> String {
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("missing set-cookie header")
        .to_str()
        .unwrap();

    cookie
        .split(';')
        .find_map(|part| part.trim().strip_prefix("auth_token="))
        .expect("missing auth_token cookie")
        .to_string()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
