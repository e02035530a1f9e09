pub mod admin;
pub mod auth;
pub mod ingredients;
pub mod recipes;
pub mod tags;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/refresh", post(auth::refresh))
        .route("/api/v1/auth/logout", post(auth::logout))
        .route("/api/v1/auth/change-password", post(auth::change_password))
        .route("/api/v1/auth/me", get(auth::me))
        // Tags
        .route("/api/v1/tags", get(tags::list).post(tags::create))
        .route(
            "/api/v1/tags/{id}",
            axum::routing::put(tags::update).delete(tags::delete),
        )
        // Ingredients
        .route(
            "/api/v1/ingredients",
            get(ingredients::list).post(ingredients::create),
        )
        .route(
            "/api/v1/ingredients/{id}",
            axum::routing::put(ingredients::update).delete(ingredients::delete),
        )
        // Recipes
        .route("/api/v1/recipes", get(recipes::list).post(recipes::create))
        .route(
            "/api/v1/recipes/{id}",
            get(recipes::get)
                .put(recipes::update)
                .delete(recipes::delete),
        )
        // Admin
        .route("/api/v1/admin/users", get(admin::list_users))
}
