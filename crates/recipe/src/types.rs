use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use strum::{Display, EnumString};

use semainier_shared::Result;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum Difficulty {
    #[default]
    #[strum(serialize = "Facile")]
    #[serde(rename = "Facile")]
    Facile,
    #[strum(serialize = "Moyen")]
    #[serde(rename = "Moyen")]
    Moyen,
    #[strum(serialize = "Expert")]
    #[serde(rename = "Expert")]
    Expert,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum IngredientUnit {
    #[default]
    #[strum(serialize = "pièce")]
    #[serde(rename = "pièce")]
    Piece,
    #[strum(serialize = "ml")]
    #[serde(rename = "ml")]
    Ml,
    #[strum(serialize = "gr")]
    #[serde(rename = "gr")]
    Gr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(default = "semainier_shared::new_id")]
    pub id: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: IngredientUnit,
}

fn default_quantity() -> f64 {
    1.0
}

/// Client payload for create and update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

fn default_servings() -> u32 {
    1
}

#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: String,
    pub user_id: String,
    pub household_id: Option<String>,
    pub title: String,
    pub duration: String,
    pub description: String,
    pub difficulty: String,
    pub servings: i64,
    pub ingredients: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A recipe with its ingredient document parsed, as served to clients.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub household_id: Option<String>,
    pub title: String,
    pub duration: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub servings: i64,
    pub ingredients: Vec<Ingredient>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl RecipeRow {
    pub fn into_recipe(self) -> Result<Recipe> {
        let ingredients = serde_json::from_str(&self.ingredients)?;
        Ok(Recipe {
            difficulty: self.difficulty.parse().unwrap_or_default(),
            id: self.id,
            user_id: self.user_id,
            household_id: self.household_id,
            title: self.title,
            duration: self.duration,
            description: self.description,
            servings: self.servings,
            ingredients,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
