use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::Tag;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct TagRequest {
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
) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = db::tags::list(&state.pool, auth.user_id).await?;
    Ok(Json(tags))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<TagRequest>,
) -> Result<(StatusCode, Json<Tag>), AppError> {
    let name = validate_name(&req.name)?;

    let tag = db::tags::create(&state.pool, auth.user_id, name)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("A tag with this name already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok((StatusCode::CREATED, Json(tag)))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TagRequest>,
) -> Result<Json<Tag>, AppError> {
    let name = validate_name(&req.name)?;

    let tag = db::tags::rename(&state.pool, id, auth.user_id, name)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => AppError::NotFound("Tag not found".to_string()),
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("A tag with this name already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

    Ok(Json(tag))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::tags::delete(&state.pool, id, auth.user_id).await?;
    if deleted == 0 {
        return Err(AppError::NotFound("Tag not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
