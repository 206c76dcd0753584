pub mod recipe;

pub use recipe::{Instructions, Recipe, RecipeId, RecipeListing};
