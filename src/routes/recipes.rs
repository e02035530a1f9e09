use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::{Recipe, RecipeDetail, RecipeSummary};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RecipeRequest {
    pub title: String,
    pub time_minutes: i32,
    pub price: f64,
    /// When present, replaces the recipe's tag set wholesale.
    pub tags: Option<Vec<Uuid>>,
    /// When present, replaces the recipe's ingredient set wholesale.
    pub ingredients: Option<Vec<Uuid>>,
}

impl RecipeRequest {
    fn validate(&self) -> Result<&str, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest("Title is required".to_string()));
        }
        if self.time_minutes < 0 {
            return Err(AppError::BadRequest(
                "time_minutes must not be negative".to_string(),
            ));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(AppError::BadRequest(
                "price must be a non-negative number".to_string(),
            ));
        }
        Ok(title)
    }
}

fn dedup(ids: &[Uuid]) -> Vec<Uuid> {
    let mut out: Vec<Uuid> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(*id);
        }
    }
    out
}

/// Verify every referenced tag and ingredient exists and belongs to the user.
async fn check_relations(
    conn: &mut sqlx::PgConnection,
    user_id: Uuid,
    tag_ids: Option<&[Uuid]>,
    ingredient_ids: Option<&[Uuid]>,
) -> Result<(), AppError> {
    if let Some(ids) = tag_ids {
        let owned = db::tags::count_owned(&mut *conn, user_id, ids).await?;
        if owned != ids.len() as i64 {
            return Err(AppError::BadRequest("Unknown tag id".to_string()));
        }
    }
    if let Some(ids) = ingredient_ids {
        let owned = db::ingredients::count_owned(&mut *conn, user_id, ids).await?;
        if owned != ids.len() as i64 {
            return Err(AppError::BadRequest("Unknown ingredient id".to_string()));
        }
    }
    Ok(())
}

async fn detail_for(state: &SharedState, recipe: Recipe) -> Result<RecipeDetail, AppError> {
    let tags = db::recipes::tags_for(&state.pool, recipe.id).await?;
    let ingredients = db::recipes::ingredients_for(&state.pool, recipe.id).await?;
    Ok(RecipeDetail::new(recipe, tags, ingredients))
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<RecipeSummary>>, AppError> {
    let recipes = db::recipes::list(&state.pool, auth.user_id).await?;
    let ids: Vec<Uuid> = recipes.iter().map(|r| r.id).collect();

    let mut tags_by_recipe: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (recipe_id, tag_id) in db::recipes::tag_links(&state.pool, &ids).await? {
        tags_by_recipe.entry(recipe_id).or_default().push(tag_id);
    }

    let mut ingredients_by_recipe: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
    for (recipe_id, ingredient_id) in db::recipes::ingredient_links(&state.pool, &ids).await? {
        ingredients_by_recipe
            .entry(recipe_id)
            .or_default()
            .push(ingredient_id);
    }

    let summaries = recipes
        .into_iter()
        .map(|recipe| {
            let tags = tags_by_recipe.remove(&recipe.id).unwrap_or_default();
            let ingredients = ingredients_by_recipe.remove(&recipe.id).unwrap_or_default();
            RecipeSummary::new(recipe, tags, ingredients)
        })
        .collect();

    Ok(Json(summaries))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<RecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetail>), AppError> {
    let title = req.validate()?.to_string();
    let tag_ids = req.tags.as_deref().map(dedup);
    let ingredient_ids = req.ingredients.as_deref().map(dedup);

    let mut tx = state.pool.begin().await?;

    check_relations(
        &mut tx,
        auth.user_id,
        tag_ids.as_deref(),
        ingredient_ids.as_deref(),
    )
    .await?;

    let recipe =
        db::recipes::create(&mut *tx, auth.user_id, &title, req.time_minutes, req.price).await?;

    if let Some(ids) = &tag_ids {
        db::recipes::set_tags(&mut tx, recipe.id, ids).await?;
    }
    if let Some(ids) = &ingredient_ids {
        db::recipes::set_ingredients(&mut tx, recipe.id, ids).await?;
    }

    tx.commit().await?;

    tracing::debug!(recipe_id = %recipe.id, "Recipe created");

    let detail = detail_for(&state, recipe).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeDetail>, AppError> {
    let recipe = db::recipes::find_by_id(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_string()))?;

    let detail = detail_for(&state, recipe).await?;
    Ok(Json(detail))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RecipeRequest>,
) -> Result<Json<RecipeDetail>, AppError> {
    let title = req.validate()?.to_string();
    let tag_ids = req.tags.as_deref().map(dedup);
    let ingredient_ids = req.ingredients.as_deref().map(dedup);

    let mut tx = state.pool.begin().await?;

    check_relations(
        &mut tx,
        auth.user_id,
        tag_ids.as_deref(),
        ingredient_ids.as_deref(),
    )
    .await?;

    let recipe = db::recipes::update(
        &mut *tx,
        id,
        auth.user_id,
        &title,
        req.time_minutes,
        req.price,
    )
    .await
    .map_err(|e| match e {
        sqlx::Error::RowNotFound => AppError::NotFound("Recipe not found".to_string()),
        _ => AppError::Database(e),
    })?;

    if let Some(ids) = &tag_ids {
        db::recipes::set_tags(&mut tx, recipe.id, ids).await?;
    }
    if let Some(ids) = &ingredient_ids {
        db::recipes::set_ingredients(&mut tx, recipe.id, ids).await?;
    }

    tx.commit().await?;

    let detail = detail_for(&state, recipe).await?;
    Ok(Json(detail))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::recipes::delete(&state.pool, id, auth.user_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Recipe not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
