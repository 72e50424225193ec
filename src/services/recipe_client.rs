use std::time::Duration;

use reqwest::{Client, Response};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{Recipe, RecipePayload};
use crate::server::error::ErrorResponse;

/// HTTP client for the recipe API.
#[derive(Clone)]
pub struct RecipeClient {
    client: Client,
    base_url: Url,
}

impl RecipeClient {
    /// `api_url` is the collection URL, e.g. `http://localhost:3000/api/recipes`.
    pub fn new(api_url: &str) -> Result<Self> {
        let base_url = Url::parse(api_url)?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Config(format!("Not a base URL: {api_url}")));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .user_agent("recipe-book/1.0")
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn recipe_url(&self, id: i64) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(&id.to_string());
        }
        url
    }

    pub async fn list_recipes(&self) -> Result<Vec<Recipe>> {
        let response = self.client.get(self.base_url.clone()).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn get_recipe(&self, id: i64) -> Result<Recipe> {
        let response = self.client.get(self.recipe_url(id)).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn create_recipe(&self, recipe: &RecipePayload) -> Result<Recipe> {
        let response = self
            .client
            .post(self.base_url.clone())
            .json(recipe)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn update_recipe(&self, id: i64, recipe: &RecipePayload) -> Result<Recipe> {
        let response = self
            .client
            .put(self.recipe_url(id))
            .json(recipe)
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_recipe(&self, id: i64) -> Result<()> {
        let response = self.client.delete(self.recipe_url(id)).send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Turn a non-success response into [`AppError::Api`], keeping the server's
/// error message when the body carries one.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|e| e.error)
        .unwrap_or_else(|_| {
            if body.is_empty() {
                status.to_string()
            } else {
                body
            }
        });

    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}
