use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::models::{Ingredient, Recipe, Tag};

pub async fn list(pool: &PgPool, user_id: Uuid) -> Result<Vec<Recipe>, sqlx::Error> {
    sqlx::query_as::<_, Recipe>(
        "SELECT * FROM recipes WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    user_id: Uuid,
    title: &str,
    time_minutes: i32,
    price: f64,
) -> Result<Recipe, sqlx::Error> {
    sqlx::query_as::<_, Recipe>(
        "INSERT INTO recipes (user_id, title, time_minutes, price)
         VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(user_id)
    .bind(title)
    .bind(time_minutes)
    .bind(price)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<Recipe>, sqlx::Error> {
    sqlx::query_as::<_, Recipe>("SELECT * FROM recipes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn update<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    user_id: Uuid,
    title: &str,
    time_minutes: i32,
    price: f64,
) -> Result<Recipe, sqlx::Error> {
    sqlx::query_as::<_, Recipe>(
        "UPDATE recipes SET title = $3, time_minutes = $4, price = $5, updated_at = now()
         WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(time_minutes)
    .bind(price)
    .fetch_one(executor)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Replace the recipe's tag set wholesale.
pub async fn set_tags(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    tag_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = $1")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;

    if !tag_ids.is_empty() {
        sqlx::query(
            "INSERT INTO recipe_tags (recipe_id, tag_id) SELECT $1, unnest($2::uuid[])",
        )
        .bind(recipe_id)
        .bind(tag_ids)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Replace the recipe's ingredient set wholesale.
pub async fn set_ingredients(
    conn: &mut PgConnection,
    recipe_id: Uuid,
    ingredient_ids: &[Uuid],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = $1")
        .bind(recipe_id)
        .execute(&mut *conn)
        .await?;

    if !ingredient_ids.is_empty() {
        sqlx::query(
            "INSERT INTO recipe_ingredients (recipe_id, ingredient_id)
             SELECT $1, unnest($2::uuid[])",
        )
        .bind(recipe_id)
        .bind(ingredient_ids)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

pub async fn tags_for(pool: &PgPool, recipe_id: Uuid) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>(
        "SELECT t.* FROM tags t
         JOIN recipe_tags rt ON rt.tag_id = t.id
         WHERE rt.recipe_id = $1 ORDER BY t.name ASC",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
}

pub async fn ingredients_for(
    pool: &PgPool,
    recipe_id: Uuid,
) -> Result<Vec<Ingredient>, sqlx::Error> {
    sqlx::query_as::<_, Ingredient>(
        "SELECT i.* FROM ingredients i
         JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
         WHERE ri.recipe_id = $1 ORDER BY i.name ASC",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
}

/// (recipe_id, tag_id) pairs for a set of recipes, for list assembly.
pub async fn tag_links(
    pool: &PgPool,
    recipe_ids: &[Uuid],
) -> Result<Vec<(Uuid, Uuid)>, sqlx::Error> {
    sqlx::query_as::<_, (Uuid, Uuid)>(
        "SELECT recipe_id, tag_id FROM recipe_tags WHERE recipe_id = ANY($1)",
    )
    .bind(recipe_ids)
    .fetch_all(pool)
    .await
}

/// (recipe_id, ingredient_id) pairs for a set of recipes, for list assembly.
pub async fn ingredient_links(
    pool: &PgPool,
    recipe_ids: &[Uuid],
) -> Result<Vec<(Uuid, Uuid)>, sqlx::Error> {
    sqlx::query_as::<_, (Uuid, Uuid)>(
        "SELECT recipe_id, ingredient_id FROM recipe_ingredients WHERE recipe_id = ANY($1)",
    )
    .bind(recipe_ids)
    .fetch_all(pool)
    .await
}
