mod recipe_client;

pub use recipe_client::RecipeClient;
