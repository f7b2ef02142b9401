use semainier_shared::Result;
use serde::Serialize;
use sqlx::{Row, SqlitePool};

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct HouseholdRow {
    pub id: String,
    pub name: String,
    pub owner_id: String,
}

/// One household member with their display pseudo, when the profile has one.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct MemberRow {
    pub user_id: String,
    pub pseudo: Option<String>,
}

/// Household id of the user's membership, if any.
pub async fn membership_for_user(pool: &SqlitePool, user_id: &str) -> Result<Option<String>> {
    let row = sqlx::query(
        r#"
        SELECT household_id FROM household_members
        WHERE user_id = ?1
        ORDER BY created_at, household_id
        LIMIT 1
        "#,
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| row.get("household_id")))
}

pub async fn household_by_id(pool: &SqlitePool, id: &str) -> Result<Option<HouseholdRow>> {
    let row = sqlx::query_as::<_, HouseholdRow>(
        "SELECT id, name, owner_id FROM households WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn household_by_owner(pool: &SqlitePool, owner_id: &str) -> Result<Option<HouseholdRow>> {
    let row = sqlx::query_as::<_, HouseholdRow>(
        r#"
        SELECT id, name, owner_id FROM households
        WHERE owner_id = ?1
        ORDER BY created_at, id
        LIMIT 1
        "#,
    )
    .bind(owner_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn members_with_pseudos(pool: &SqlitePool, household_id: &str) -> Result<Vec<MemberRow>> {
    let rows = sqlx::query_as::<_, MemberRow>(
        r#"
        SELECT hm.user_id, p.pseudo
        FROM household_members hm
        LEFT JOIN profiles p ON p.user_id = hm.user_id
        WHERE hm.household_id = ?1
        ORDER BY hm.created_at, hm.user_id
        "#,
    )
    .bind(household_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn profile_user_by_email(pool: &SqlitePool, email: &str) -> Result<Option<String>> {
    let row = sqlx::query("SELECT user_id FROM profiles WHERE email = ?1")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.get("user_id")))
}

pub async fn profile_user_by_pseudo(pool: &SqlitePool, pseudo: &str) -> Result<Option<String>> {
    let row = sqlx::query("SELECT user_id FROM profiles WHERE pseudo = ?1")
        .bind(pseudo)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| row.get("user_id")))
}
