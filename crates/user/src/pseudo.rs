use rand::RngExt;
use semainier_shared::{conflict, invalid, is_unique_violation, not_found, now, Result};
use sqlx::{Row, SqlitePool};

use crate::account::user_by_id;

const ENSURE_ATTEMPTS: usize = 5;

/// Default pseudo proposed at registration: the email local part, lowercased
/// and stripped of anything non-alphanumeric. Short locals fall back to a
/// "chef" handle built from the user id.
pub fn default_pseudo(email: &str, user_id: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    let sanitized: String = local
        .trim()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase();

    if sanitized.chars().count() >= 3 {
        sanitized.chars().take(24).collect()
    } else {
        let prefix: String = user_id.chars().take(5).collect();
        format!("chef{}", prefix.to_lowercase())
    }
}

/// Upserts the profile with the generated pseudo, retrying with a numeric
/// suffix on pseudo collisions. After the attempt budget the base value is
/// returned unsaved rather than failing the enclosing registration.
pub async fn ensure_default_pseudo(
    pool: &SqlitePool,
    user_id: &str,
    email: &str,
) -> Result<String> {
    let base = default_pseudo(email, user_id);
    let mut candidate = base.clone();

    for _ in 0..ENSURE_ATTEMPTS {
        match upsert_profile(pool, user_id, &candidate, email).await {
            Ok(()) => return Ok(candidate),
            Err(e) if is_unique_violation(&e) => {
                candidate = format!("{base}{}", rand::rng().random_range(100..1000));
            }
            Err(e) => return Err(e.into()),
        }
    }

    tracing::warn!(user_id, "Pseudo attempts exhausted, keeping base");

    Ok(base)
}

/// Saves a user-chosen pseudo and returns the stored value.
#[tracing::instrument(skip(pool, pseudo))]
pub async fn update_pseudo(pool: &SqlitePool, user_id: &str, pseudo: &str) -> Result<String> {
    let trimmed = pseudo.trim();
    if trimmed.chars().count() < 3 {
        invalid!("Au moins 3 caractères.");
    }

    let Some(user) = user_by_id(pool, user_id).await? else {
        not_found!("Impossible d'enregistrer le pseudo. Réessaie plus tard.");
    };

    match upsert_profile(pool, user_id, trimmed, &user.email).await {
        Ok(()) => Ok(trimmed.to_string()),
        Err(e) if is_unique_violation(&e) => {
            conflict!("Ce pseudo est déjà pris.");
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn profile_pseudo(pool: &SqlitePool, user_id: &str) -> Result<Option<String>> {
    let row = sqlx::query("SELECT pseudo FROM profiles WHERE user_id = ?1")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.get("pseudo")))
}

async fn upsert_profile(
    pool: &SqlitePool,
    user_id: &str,
    pseudo: &str,
    email: &str,
) -> std::result::Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO profiles (user_id, pseudo, email, updated_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT (user_id) DO UPDATE SET
            pseudo = excluded.pseudo,
            email = excluded.email,
            updated_at = excluded.updated_at
        "#,
    )
    .bind(user_id)
    .bind(pseudo)
    .bind(email)
    .bind(now())
    .execute(pool)
    .await?;

    Ok(())
}
