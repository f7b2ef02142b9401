use semainier_shared::{invalid, new_id, not_found, now, Result, Scope};
use sqlx::SqlitePool;

use crate::{Ingredient, Recipe, RecipeInput, RecipeRow};

const SELECT_RECIPE: &str = "SELECT id, user_id, household_id, title, duration, description, \
     difficulty, servings, ingredients, created_at, updated_at FROM recipes";

/// Trims the payload, drops ingredient rows without a name, and demands
/// a title, a description and at least one remaining ingredient.
fn normalize(input: RecipeInput) -> Result<RecipeInput> {
    let title = input.title.trim().to_string();
    let description = input.description.trim().to_string();
    let ingredients: Vec<Ingredient> = input
        .ingredients
        .into_iter()
        .filter(|i| !i.name.trim().is_empty())
        .map(|mut i| {
            i.name = i.name.trim().to_string();
            i
        })
        .collect();

    if title.is_empty() || description.is_empty() || ingredients.is_empty() {
        invalid!("Complète le titre, la description et au moins un ingrédient.");
    }

    Ok(RecipeInput {
        title,
        duration: input.duration.trim().to_string(),
        description,
        difficulty: input.difficulty,
        servings: input.servings.max(1),
        ingredients,
    })
}

async fn recipe_by_id(pool: &SqlitePool, id: &str) -> Result<Option<RecipeRow>> {
    let sql = format!("{SELECT_RECIPE} WHERE id = ?1");
    let row = sqlx::query_as::<_, RecipeRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Recipes visible under the caller's scope, newest first.
#[tracing::instrument(skip(pool, scope))]
pub async fn list_recipes(pool: &SqlitePool, scope: &Scope) -> Result<Vec<Recipe>> {
    let sql = format!(
        "{SELECT_RECIPE} WHERE {} = ?1 ORDER BY created_at DESC, id DESC",
        scope.filter_column.as_ref()
    );
    let rows: Vec<RecipeRow> = sqlx::query_as(&sql)
        .bind(&scope.filter_value)
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(RecipeRow::into_recipe).collect()
}

/// One recipe, readable by its author and by members of the household
/// it was shared with.
#[tracing::instrument(skip(pool, scope))]
pub async fn get_recipe(
    pool: &SqlitePool,
    scope: &Scope,
    user_id: &str,
    id: &str,
) -> Result<Recipe> {
    let Some(row) = recipe_by_id(pool, id).await? else {
        not_found!("Recette introuvable.");
    };

    let mine = row.user_id == user_id;
    let shared = row.household_id.is_some() && row.household_id == scope.household_id;
    if !mine && !shared {
        not_found!("Recette introuvable.");
    }

    row.into_recipe()
}

#[tracing::instrument(skip(pool, scope, input))]
pub async fn create_recipe(
    pool: &SqlitePool,
    scope: &Scope,
    user_id: &str,
    input: RecipeInput,
) -> Result<Recipe> {
    let input = normalize(input)?;
    let ingredients = serde_json::to_string(&input.ingredients)?;
    let id = new_id();
    let created_at = now();

    sqlx::query(
        "INSERT INTO recipes
           (id, user_id, household_id, title, duration, description, difficulty, servings, ingredients, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
    )
    .bind(&id)
    .bind(user_id)
    .bind(scope.household_id.as_deref())
    .bind(&input.title)
    .bind(&input.duration)
    .bind(&input.description)
    .bind(input.difficulty.to_string())
    .bind(input.servings)
    .bind(&ingredients)
    .bind(created_at)
    .execute(pool)
    .await?;

    tracing::info!(recipe_id = %id, "Recipe created");

    Ok(Recipe {
        id,
        user_id: user_id.to_string(),
        household_id: scope.household_id.clone(),
        title: input.title,
        duration: input.duration,
        description: input.description,
        difficulty: input.difficulty,
        servings: input.servings as i64,
        ingredients: input.ingredients,
        created_at,
        updated_at: created_at,
    })
}

#[tracing::instrument(skip(pool, scope, input))]
pub async fn update_recipe(
    pool: &SqlitePool,
    scope: &Scope,
    id: &str,
    input: RecipeInput,
) -> Result<Recipe> {
    let input = normalize(input)?;
    let ingredients = serde_json::to_string(&input.ingredients)?;

    let sql = format!(
        "UPDATE recipes
         SET title = ?1, duration = ?2, description = ?3, difficulty = ?4, servings = ?5, ingredients = ?6, updated_at = ?7
         WHERE id = ?8 AND {} = ?9",
        scope.filter_column.as_ref()
    );
    let result = sqlx::query(&sql)
        .bind(&input.title)
        .bind(&input.duration)
        .bind(&input.description)
        .bind(input.difficulty.to_string())
        .bind(input.servings)
        .bind(&ingredients)
        .bind(now())
        .bind(id)
        .bind(&scope.filter_value)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        not_found!("Recette introuvable.");
    }

    let Some(row) = recipe_by_id(pool, id).await? else {
        not_found!("Recette introuvable.");
    };
    row.into_recipe()
}

#[tracing::instrument(skip(pool, scope))]
pub async fn delete_recipe(pool: &SqlitePool, scope: &Scope, id: &str) -> Result<()> {
    let sql = format!(
        "DELETE FROM recipes WHERE id = ?1 AND {} = ?2",
        scope.filter_column.as_ref()
    );
    let result = sqlx::query(&sql)
        .bind(id)
        .bind(&scope.filter_value)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        not_found!("Recette introuvable.");
    }

    tracing::info!(recipe_id = %id, "Recipe deleted");
    Ok(())
}
