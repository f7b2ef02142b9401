use semainier_recipe::{
    create_recipe, delete_recipe, get_recipe, list_recipes, update_recipe, Difficulty,
    Ingredient, IngredientUnit, RecipeInput,
};
use semainier_shared::{Error, Scope};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();

    sqlx::query(
        r#"
        CREATE TABLE recipes (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            household_id TEXT,
            title TEXT NOT NULL,
            duration TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL,
            difficulty TEXT NOT NULL,
            servings INTEGER NOT NULL,
            ingredients TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    pool
}

fn ingredient(name: &str, quantity: f64, unit: IngredientUnit) -> Ingredient {
    Ingredient {
        id: semainier_shared::new_id(),
        name: name.to_string(),
        quantity,
        unit,
    }
}

fn tartiflette() -> RecipeInput {
    RecipeInput {
        title: "Tartiflette".to_string(),
        duration: "1 h".to_string(),
        description: "Le classique savoyard.".to_string(),
        difficulty: Difficulty::Moyen,
        servings: 4,
        ingredients: vec![
            ingredient("Pommes de terre", 1.0, IngredientUnit::Gr),
            ingredient("Reblochon", 1.0, IngredientUnit::Piece),
        ],
    }
}

#[tokio::test]
async fn create_and_get_round_trips() {
    let pool = setup_pool().await;
    let scope = Scope::personal("carole");

    let created = create_recipe(&pool, &scope, "carole", tartiflette())
        .await
        .unwrap();
    assert_eq!(created.difficulty, Difficulty::Moyen);
    assert!(created.household_id.is_none());

    let loaded = get_recipe(&pool, &scope, "carole", &created.id).await.unwrap();
    assert_eq!(loaded.title, "Tartiflette");
    assert_eq!(loaded.duration, "1 h");
    assert_eq!(loaded.ingredients.len(), 2);
    assert_eq!(loaded.ingredients[1].unit, IngredientUnit::Piece);
}

#[tokio::test]
async fn create_without_complete_ingredient_is_rejected() {
    let pool = setup_pool().await;
    let scope = Scope::personal("carole");

    let mut input = tartiflette();
    input.ingredients = vec![ingredient("   ", 2.0, IngredientUnit::Ml)];

    let err = create_recipe(&pool, &scope, "carole", input).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(
        err.to_string(),
        "Complète le titre, la description et au moins un ingrédient."
    );
}

#[tokio::test]
async fn create_trims_fields_and_drops_blank_ingredient_rows() {
    let pool = setup_pool().await;
    let scope = Scope::personal("carole");

    let input = RecipeInput {
        title: "  Gratin  ".to_string(),
        duration: " 40 min ".to_string(),
        description: " Un gratin réconfortant. ".to_string(),
        difficulty: Difficulty::Facile,
        servings: 0,
        ingredients: vec![
            ingredient("Courgettes", 3.0, IngredientUnit::Piece),
            ingredient("", 1.0, IngredientUnit::Gr),
        ],
    };

    let created = create_recipe(&pool, &scope, "carole", input).await.unwrap();
    assert_eq!(created.title, "Gratin");
    assert_eq!(created.duration, "40 min");
    assert_eq!(created.description, "Un gratin réconfortant.");
    assert_eq!(created.servings, 1);
    assert_eq!(created.ingredients.len(), 1);
}

#[tokio::test]
async fn list_returns_newest_first() {
    let pool = setup_pool().await;
    for (id, title, created_at) in [
        ("r-old", "Soupe à l'oignon", 100),
        ("r-new", "Velouté de potimarron", 200),
    ] {
        sqlx::query(
            "INSERT INTO recipes (id, user_id, household_id, title, duration, description, difficulty, servings, ingredients, created_at, updated_at)
             VALUES (?1, 'carole', NULL, ?2, '25 min', 'Une soupe.', 'Facile', 2, '[]', ?3, ?3)",
        )
        .bind(id)
        .bind(title)
        .bind(created_at)
        .execute(&pool)
        .await
        .unwrap();
    }

    let recipes = list_recipes(&pool, &Scope::personal("carole")).await.unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].title, "Velouté de potimarron");
    assert_eq!(recipes[1].title, "Soupe à l'oignon");
}

#[tokio::test]
async fn household_scope_shares_recipes_between_members() {
    let pool = setup_pool().await;
    let scope = Scope::household("h-1");

    let created = create_recipe(&pool, &scope, "alice", tartiflette())
        .await
        .unwrap();
    assert_eq!(created.household_id.as_deref(), Some("h-1"));

    // another member of the same household
    let listed = list_recipes(&pool, &Scope::household("h-1")).await.unwrap();
    assert_eq!(listed.len(), 1);

    let loaded = get_recipe(&pool, &Scope::household("h-1"), "bruno", &created.id)
        .await
        .unwrap();
    assert_eq!(loaded.title, "Tartiflette");
}

#[tokio::test]
async fn get_outside_scope_reports_not_found() {
    let pool = setup_pool().await;
    let created = create_recipe(&pool, &Scope::household("h-1"), "alice", tartiflette())
        .await
        .unwrap();

    let err = get_recipe(&pool, &Scope::personal("mallory"), "mallory", &created.id)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(err.to_string(), "Recette introuvable.");
}

#[tokio::test]
async fn author_still_reads_own_household_recipe() {
    let pool = setup_pool().await;
    let created = create_recipe(&pool, &Scope::household("h-1"), "alice", tartiflette())
        .await
        .unwrap();

    // after leaving the household, the author keeps access
    let loaded = get_recipe(&pool, &Scope::personal("alice"), "alice", &created.id)
        .await
        .unwrap();
    assert_eq!(loaded.id, created.id);
}

#[tokio::test]
async fn update_rewrites_fields_under_scope() {
    let pool = setup_pool().await;
    let scope = Scope::personal("carole");
    let created = create_recipe(&pool, &scope, "carole", tartiflette())
        .await
        .unwrap();

    let mut changed = tartiflette();
    changed.title = "Tartiflette allégée".to_string();
    changed.difficulty = Difficulty::Expert;
    let updated = update_recipe(&pool, &scope, &created.id, changed).await.unwrap();

    assert_eq!(updated.title, "Tartiflette allégée");
    assert_eq!(updated.difficulty, Difficulty::Expert);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn update_outside_scope_reports_not_found() {
    let pool = setup_pool().await;
    let created = create_recipe(&pool, &Scope::personal("carole"), "carole", tartiflette())
        .await
        .unwrap();

    let err = update_recipe(&pool, &Scope::personal("mallory"), &created.id, tartiflette())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Recette introuvable.");
}

#[tokio::test]
async fn delete_removes_the_recipe() {
    let pool = setup_pool().await;
    let scope = Scope::personal("carole");
    let created = create_recipe(&pool, &scope, "carole", tartiflette())
        .await
        .unwrap();

    delete_recipe(&pool, &scope, &created.id).await.unwrap();

    let err = get_recipe(&pool, &scope, "carole", &created.id).await.unwrap_err();
    assert_eq!(err.to_string(), "Recette introuvable.");

    let err = delete_recipe(&pool, &scope, &created.id).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
