mod recipe;

pub use recipe::{join_ingredients, split_ingredients, NewRecipe, Recipe, RecipePayload};
