use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Ingredient, Tag};

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub time_minutes: i32,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List serialization: related tags and ingredients as id arrays.
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub title: String,
    pub time_minutes: i32,
    pub price: f64,
    pub tags: Vec<Uuid>,
    pub ingredients: Vec<Uuid>,
}

impl RecipeSummary {
    pub fn new(recipe: Recipe, tags: Vec<Uuid>, ingredients: Vec<Uuid>) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            tags,
            ingredients,
        }
    }
}

/// Detail serialization: related tags and ingredients nested in full.
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    pub id: Uuid,
    pub title: String,
    pub time_minutes: i32,
    pub price: f64,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecipeDetail {
    pub fn new(recipe: Recipe, tags: Vec<Tag>, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            tags,
            ingredients,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
        }
    }
}
