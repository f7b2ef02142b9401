use semainier_shared::{Result, Scope, ScopeColumn};
use sqlx::{FromRow, SqlitePool};

use crate::StoredDay;

#[derive(Debug, Clone, FromRow)]
pub struct MenuRow {
    pub id: String,
    pub user_id: String,
    pub household_id: Option<String>,
    pub year: i64,
    pub week_number: i64,
    pub month: String,
    pub days: String,
}

impl MenuRow {
    pub fn stored_days(&self) -> Result<Vec<StoredDay>> {
        Ok(serde_json::from_str(&self.days)?)
    }
}

/// Looks a week up under the caller's scope. When the household filter
/// finds nothing, a second lookup checks for a row the user saved before
/// joining, still stored without a household.
#[tracing::instrument(skip(pool, scope))]
pub async fn find_week(
    pool: &SqlitePool,
    scope: &Scope,
    user_id: &str,
    year: i32,
    week_number: u32,
) -> Result<Option<MenuRow>> {
    let primary = match scope.filter_column {
        ScopeColumn::HouseholdId => {
            sqlx::query_as::<_, MenuRow>(
                "SELECT id, user_id, household_id, year, week_number, month, days
                 FROM weekly_menus
                 WHERE household_id = ?1 AND year = ?2 AND week_number = ?3",
            )
            .bind(&scope.filter_value)
            .bind(year)
            .bind(week_number)
            .fetch_optional(pool)
            .await?
        }
        ScopeColumn::UserId => {
            personal_week(pool, &scope.filter_value, year, week_number).await?
        }
    };
    if primary.is_some() || !scope.is_household() {
        return Ok(primary);
    }
    personal_week(pool, user_id, year, week_number).await
}

async fn personal_week(
    pool: &SqlitePool,
    user_id: &str,
    year: i32,
    week_number: u32,
) -> Result<Option<MenuRow>> {
    let row = sqlx::query_as::<_, MenuRow>(
        "SELECT id, user_id, household_id, year, week_number, month, days
         FROM weekly_menus
         WHERE user_id = ?1 AND household_id IS NULL AND year = ?2 AND week_number = ?3",
    )
    .bind(user_id)
    .bind(year)
    .bind(week_number)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
