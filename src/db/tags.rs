use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Tag;

pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE user_id = $1 ORDER BY name ASC")
        .bind(user_id)
        .fetch_all(pool)
        .await
}

pub async fn create(pool: &PgPool, user_id: Uuid, name: &str) -> Result<Tag, sqlx::Error> {
    sqlx::query_as::<_, Tag>("INSERT INTO tags (user_id, name) VALUES ($1, $2) RETURNING *")
        .bind(user_id)
        .bind(name)
        .fetch_one(pool)
        .await
}

pub async fn find_by_id(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn rename(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    name: &str,
) -> Result<Tag, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        "UPDATE tags SET name = $3 WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(name)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tags WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Count how many of the given ids exist and belong to the user.
pub async fn count_owned<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    ids: &[Uuid],
) -> Result<i64, sqlx::Error> {
    let row: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM tags WHERE user_id = $1 AND id = ANY($2)")
            .bind(user_id)
            .bind(ids)
            .fetch_one(executor)
            .await?;
    Ok(row.0)
}
