use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use semainier_shared::{conflict, invalid, is_unique_violation, new_id, now, Error, Result};
use serde::Deserialize;
use sqlx::SqlitePool;
use validator::Validate;

use crate::pseudo::ensure_default_pseudo;
use crate::validation;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub hashed_password: String,
    pub created_at: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(custom(function = crate::validation::email_format))]
    pub email: String,
    #[validate(custom(function = crate::validation::password_strength))]
    pub password: String,
    pub confirm: String,
}

/// Creates the account and its default profile pseudo, and returns the new
/// row. The account is active immediately; there is no confirmation step.
#[tracing::instrument(skip(pool, input))]
pub async fn register(pool: &SqlitePool, input: RegisterInput) -> Result<UserRow> {
    input
        .validate()
        .map_err(|e| Error::Validation(validation::first_message(&e)))?;
    validation::validate_confirm_password(&input.password, &input.confirm)
        .map_err(|msg| Error::Validation(msg.to_string()))?;

    let email = input.email.trim().to_lowercase();

    let salt = SaltString::generate(&mut OsRng);
    let hashed_password = Argon2::default()
        .hash_password(input.password.as_bytes(), &salt)?
        .to_string();

    let user = UserRow {
        id: new_id(),
        email,
        hashed_password,
        created_at: now(),
    };

    let inserted = sqlx::query(
        "INSERT INTO users (id, email, hashed_password, created_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(&user.id)
    .bind(&user.email)
    .bind(&user.hashed_password)
    .bind(user.created_at)
    .execute(pool)
    .await;

    if let Err(e) = inserted {
        if is_unique_violation(&e) {
            conflict!("Un compte existe déjà avec cet email.");
        }
        return Err(e.into());
    }

    ensure_default_pseudo(pool, &user.id, &user.email).await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(user)
}

/// Verifies credentials. Unknown email and wrong password are deliberately
/// indistinguishable to the caller.
#[tracing::instrument(skip(pool, email, password))]
pub async fn login(pool: &SqlitePool, email: &str, password: &str) -> Result<UserRow> {
    let email = email.trim().to_lowercase();

    let Some(user) = user_by_email(pool, &email).await? else {
        invalid!("Identifiants invalides.");
    };

    let parsed_hash = PasswordHash::new(&user.hashed_password)?;
    if Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        invalid!("Identifiants invalides.");
    }

    Ok(user)
}

pub async fn user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, hashed_password, created_at FROM users WHERE email = ?1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn user_by_id(pool: &SqlitePool, id: &str) -> Result<Option<UserRow>> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, hashed_password, created_at FROM users WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
