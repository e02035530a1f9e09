pub mod ingredient;
pub mod recipe;
pub mod refresh_token;
pub mod tag;
pub mod user;

pub use ingredient::Ingredient;
pub use recipe::{Recipe, RecipeDetail, RecipeSummary};
pub use refresh_token::RefreshToken;
pub use tag::Tag;
pub use user::User;
