use axum::extract::State;
use axum::Json;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::models::User;
use crate::state::SharedState;

pub async fn list_users(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<User>>, AppError> {
    auth.require_superuser()?;

    let users = db::users::list_all(&state.pool).await?;
    Ok(Json(users))
}
