use semainier_shared::{conflict, invalid, is_unique_violation, new_id, not_found, now, Result};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::query::{
    household_by_id, household_by_owner, members_with_pseudos, membership_for_user,
    profile_user_by_email, profile_user_by_pseudo, HouseholdRow, MemberRow,
};

/// Household plus its member list, the payload behind the profile screen.
#[derive(Debug, Clone, Serialize)]
pub struct HouseholdOverview {
    pub household: HouseholdRow,
    pub members: Vec<MemberRow>,
}

/// The caller's household with members, or None when they plan alone.
pub async fn overview(pool: &SqlitePool, user_id: &str) -> Result<Option<HouseholdOverview>> {
    let Some(household_id) = membership_for_user(pool, user_id).await? else {
        return Ok(None);
    };

    let Some(household) = household_by_id(pool, &household_id).await? else {
        // Membership pointing at a missing household row.
        not_found!("Impossible de charger le foyer.");
    };

    let members = members_with_pseudos(pool, &household_id).await?;

    Ok(Some(HouseholdOverview { household, members }))
}

/// Creates a household owned by the caller and enrolls them as first member.
#[tracing::instrument(skip(pool, name))]
pub async fn create(pool: &SqlitePool, user_id: &str, name: &str) -> Result<HouseholdRow> {
    let name = name.trim();
    if name.is_empty() {
        invalid!("Renseigne un nom de foyer.");
    }

    if membership_for_user(pool, user_id).await?.is_some() {
        conflict!("Tu fais déjà partie d'un foyer. Quitte-le avant d'en créer un nouveau.");
    }

    let household = HouseholdRow {
        id: new_id(),
        name: name.to_string(),
        owner_id: user_id.to_string(),
    };
    let created_at = now();

    let mut tx = pool.begin().await?;

    sqlx::query("INSERT INTO households (id, name, owner_id, created_at) VALUES (?1, ?2, ?3, ?4)")
        .bind(&household.id)
        .bind(&household.name)
        .bind(&household.owner_id)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

    let enrolled = sqlx::query(
        "INSERT INTO household_members (household_id, user_id, created_at) VALUES (?1, ?2, ?3)",
    )
    .bind(&household.id)
    .bind(user_id)
    .bind(created_at)
    .execute(&mut *tx)
    .await;

    if let Err(e) = enrolled {
        if is_unique_violation(&e) {
            conflict!("Tu fais déjà partie d'un foyer. Quitte-le avant d'en créer un nouveau.");
        }
        return Err(e.into());
    }

    tx.commit().await?;

    tracing::info!(household_id = %household.id, "Household created");

    Ok(household)
}

/// Adds the user behind `email` to the caller's household. Owner only.
#[tracing::instrument(skip(pool, email))]
pub async fn invite(pool: &SqlitePool, user_id: &str, email: &str) -> Result<MemberRow> {
    let household = match membership_for_user(pool, user_id).await? {
        Some(household_id) => household_by_id(pool, &household_id).await?,
        None => None,
    };

    let Some(household) = household else {
        invalid!("Seul le créateur du foyer peut ajouter des membres.");
    };
    if household.owner_id != user_id {
        invalid!("Seul le créateur du foyer peut ajouter des membres.");
    }

    let normalized = email.trim().to_lowercase();

    let Some(target_user) = profile_user_by_email(pool, &normalized).await? else {
        not_found!("Aucun utilisateur avec cet email.");
    };

    if target_user == user_id {
        conflict!("Tu es déjà dans ce foyer.");
    }

    if membership_for_user(pool, &target_user).await?.is_some() {
        conflict!("Cet utilisateur appartient déjà à un foyer.");
    }

    let inserted = sqlx::query(
        "INSERT INTO household_members (household_id, user_id, created_at) VALUES (?1, ?2, ?3)",
    )
    .bind(&household.id)
    .bind(&target_user)
    .bind(now())
    .execute(pool)
    .await;

    if let Err(e) = inserted {
        if is_unique_violation(&e) {
            // Lost the race against a concurrent invite or join.
            conflict!("Ce membre est déjà ajouté.");
        }
        return Err(e.into());
    }

    tracing::info!(household_id = %household.id, member = %target_user, "Member invited");

    let pseudo = sqlx::query_as::<_, MemberRow>(
        "SELECT user_id, pseudo FROM profiles WHERE user_id = ?1",
    )
    .bind(&target_user)
    .fetch_optional(pool)
    .await?;

    Ok(pseudo.unwrap_or(MemberRow {
        user_id: target_user,
        pseudo: None,
    }))
}

/// Joins the household owned by the user whose profile pseudo matches.
#[tracing::instrument(skip(pool, owner_pseudo))]
pub async fn join(pool: &SqlitePool, user_id: &str, owner_pseudo: &str) -> Result<HouseholdRow> {
    if membership_for_user(pool, user_id).await?.is_some() {
        conflict!("Tu es déjà dans un foyer.");
    }

    let trimmed = owner_pseudo.trim();
    if trimmed.len() < 3 {
        invalid!("Renseigne le pseudo de l'admin du foyer.");
    }

    let Some(owner_user) = profile_user_by_pseudo(pool, trimmed).await? else {
        not_found!("Aucun foyer associé à ce pseudo.");
    };

    let Some(household) = household_by_owner(pool, &owner_user).await? else {
        not_found!("Cet utilisateur n'a pas de foyer actif.");
    };

    let inserted = sqlx::query(
        "INSERT INTO household_members (household_id, user_id, created_at) VALUES (?1, ?2, ?3)",
    )
    .bind(&household.id)
    .bind(user_id)
    .bind(now())
    .execute(pool)
    .await;

    if let Err(e) = inserted {
        if is_unique_violation(&e) {
            conflict!("Tu appartiens déjà à un foyer.");
        }
        return Err(e.into());
    }

    tracing::info!(household_id = %household.id, "Household joined");

    Ok(household)
}
