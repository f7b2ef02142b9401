use semainier_shared::{new_id, now, Result, Scope};
use sqlx::SqlitePool;

use crate::{find_week, DayMenu, WeekRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedWeek {
    pub id: String,
    pub created: bool,
}

/// Writes a week under the resolved scope: updates the row [`find_week`]
/// locates, inserts a fresh one otherwise. A row found through the
/// personal fallback keeps its original scope columns.
#[tracing::instrument(skip(pool, scope, days))]
pub async fn save_week(
    pool: &SqlitePool,
    scope: &Scope,
    user_id: &str,
    week: &WeekRef,
    days: &[DayMenu; 7],
) -> Result<SavedWeek> {
    let payload = serde_json::to_string(days)?;
    match find_week(pool, scope, user_id, week.year, week.week_number).await? {
        Some(row) => {
            sqlx::query(
                "UPDATE weekly_menus SET days = ?1, month = ?2, updated_at = ?3 WHERE id = ?4",
            )
            .bind(&payload)
            .bind(&week.month)
            .bind(now())
            .bind(&row.id)
            .execute(pool)
            .await?;
            tracing::debug!(menu_id = %row.id, "weekly menu updated");
            Ok(SavedWeek {
                id: row.id,
                created: false,
            })
        }
        None => {
            let id = new_id();
            sqlx::query(
                "INSERT INTO weekly_menus
                   (id, user_id, household_id, year, week_number, month, days, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            )
            .bind(&id)
            .bind(user_id)
            .bind(scope.household_id.as_deref())
            .bind(week.year)
            .bind(week.week_number)
            .bind(&week.month)
            .bind(&payload)
            .bind(now())
            .execute(pool)
            .await?;
            tracing::debug!(menu_id = %id, "weekly menu created");
            Ok(SavedWeek { id, created: true })
        }
    }
}
