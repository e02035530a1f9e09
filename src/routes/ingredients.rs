use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::Ingredient;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct IngredientRequest {
    pub name: String,
}

fn validate_name(name: &str) -> Result<&str, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    if name.len() > 255 {
        return Err(AppError::BadRequest(
            "Name must be at most 255 characters".to_string(),
        ));
    }
    Ok(name)
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    let ingredients = db::ingredients::list(&state.pool, auth.user_id).await?;
    Ok(Json(ingredients))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<IngredientRequest>,
) -> Result<(StatusCode, Json<Ingredient>), AppError> {
    let name = validate_name(&req.name)?;

    let ingredient = db::ingredients::create(&state.pool, auth.user_id, name)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("An ingredient with this name already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok((StatusCode::CREATED, Json(ingredient)))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<IngredientRequest>,
) -> Result<Json<Ingredient>, AppError> {
    let name = validate_name(&req.name)?;

    let ingredient = db::ingredients::rename(&state.pool, id, auth.user_id, name)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Ingredient not found".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("An ingredient with this name already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(Json(ingredient))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::ingredients::delete(&state.pool, id, auth.user_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Ingredient not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
