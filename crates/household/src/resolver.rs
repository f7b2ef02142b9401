use semainier_shared::{Error, Result, Scope};
use sqlx::{Row, SqlitePool};

/// Decides whether a user's reads and writes target their household or
/// themselves. Constructed once and injected into every data-access call
/// site; never re-derived ad hoc.
#[derive(Clone)]
pub struct ScopeResolver {
    pool: SqlitePool,
}

impl ScopeResolver {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Looks up at most one membership row for the user. Found: filter on
    /// `household_id`. None: filter on `user_id`. A lookup failure is fatal
    /// to the enclosing operation; no retry here.
    ///
    /// A user holding several memberships would violate the unique index on
    /// `household_members.user_id`; should one slip in anyway, the ordering
    /// makes the pick deterministic instead of failing.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, user_id: &str) -> Result<Scope> {
        let row = sqlx::query(
            r#"
            SELECT household_id FROM household_members
            WHERE user_id = ?1
            ORDER BY created_at, household_id
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Scope)?;

        let scope = match row {
            Some(row) => Scope::household(row.get::<String, _>("household_id")),
            None => Scope::personal(user_id),
        };

        tracing::debug!(
            column = %scope.filter_column,
            value = %scope.filter_value,
            "Scope resolved"
        );

        Ok(scope)
    }
}
