pub mod ingredients;
pub mod recipes;
pub mod refresh_tokens;
pub mod tags;
pub mod users;
