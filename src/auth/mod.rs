//! Authentication module
//!
//! Provides JWT-based authentication with HTTP-only cookies

pub mod jwt;

pub use jwt::{Claims, generate_token, validate_token};

/// Cookie name for JWT token
pub const AUTH_COOKIE_NAME: &str = "auth_token";
