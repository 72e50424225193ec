use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};
use tokio_rusqlite::Connection;

use crate::error::Result;
use crate::models::{NewRecipe, Recipe};

use super::schema::SCHEMA;

const RECIPE_COLUMNS: &str = "id, title, description, ingredients, instructions";

pub struct Repository {
    conn: Connection,
}

impl Repository {
    pub async fn new(db_path: &str) -> Result<Self> {
        let conn = Connection::open(db_path).await?;

        conn.call(|conn| {
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    /// Run a trivial query and return the database's current time.
    pub async fn ping(&self) -> Result<String> {
        let now = self
            .conn
            .call(|conn| {
                let now: String =
                    conn.query_row("SELECT datetime('now')", [], |row| row.get(0))?;
                Ok(now)
            })
            .await?;
        Ok(now)
    }

    pub async fn create_recipe(&self, recipe: NewRecipe) -> Result<Recipe> {
        let ingredients = serde_json::to_string(&recipe.ingredients)?;
        let created = self
            .conn
            .call(move |conn| {
                let created = conn.query_row(
                    &format!(
                        "INSERT INTO recipes (title, description, ingredients, instructions)
                         VALUES (?1, ?2, ?3, ?4)
                         RETURNING {RECIPE_COLUMNS}"
                    ),
                    params![
                        recipe.title,
                        recipe.description,
                        ingredients,
                        recipe.instructions
                    ],
                    recipe_from_row,
                )?;
                Ok(created)
            })
            .await?;
        Ok(created)
    }

    pub async fn get_all_recipes(&self) -> Result<Vec<Recipe>> {
        let recipes = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY id ASC"
                ))?;
                let recipes = stmt
                    .query_map([], recipe_from_row)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(recipes)
            })
            .await?;
        Ok(recipes)
    }

    pub async fn get_recipe(&self, id: i64) -> Result<Option<Recipe>> {
        let recipe = self
            .conn
            .call(move |conn| {
                let recipe = conn
                    .query_row(
                        &format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?1"),
                        params![id],
                        recipe_from_row,
                    )
                    .optional()?;
                Ok(recipe)
            })
            .await?;
        Ok(recipe)
    }

    /// Replace every mutable field of a recipe. Returns `None` if the id is unknown.
    pub async fn update_recipe(&self, id: i64, recipe: NewRecipe) -> Result<Option<Recipe>> {
        let ingredients = serde_json::to_string(&recipe.ingredients)?;
        let updated = self
            .conn
            .call(move |conn| {
                let updated = conn
                    .query_row(
                        &format!(
                            "UPDATE recipes
                             SET title = ?1, description = ?2, ingredients = ?3, instructions = ?4
                             WHERE id = ?5
                             RETURNING {RECIPE_COLUMNS}"
                        ),
                        params![
                            recipe.title,
                            recipe.description,
                            ingredients,
                            recipe.instructions,
                            id
                        ],
                        recipe_from_row,
                    )
                    .optional()?;
                Ok(updated)
            })
            .await?;
        Ok(updated)
    }

    /// Returns `false` if no recipe had this id.
    pub async fn delete_recipe(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .call(move |conn| {
                let rows = conn.execute("DELETE FROM recipes WHERE id = ?1", params![id])?;
                Ok(rows > 0)
            })
            .await?;
        Ok(deleted)
    }
}

fn recipe_from_row(row: &Row) -> rusqlite::Result<Recipe> {
    let ingredients: String = row.get(3)?;
    let ingredients = serde_json::from_str(&ingredients)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Recipe {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        ingredients,
        instructions: row.get(4)?,
    })
}
