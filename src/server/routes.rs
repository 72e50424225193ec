use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    Json,
};

use crate::models::{Recipe, RecipePayload};

use super::{error::ApiError, state::State as AppState};

type SharedState = Arc<AppState>;

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Validation(format!("Invalid recipe id: {raw}")))
}

pub async fn create_recipe(
    State(state): State<SharedState>,
    payload: Result<Json<RecipePayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload?;
    let recipe = payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let created = state.repository.create_recipe(recipe).await?;
    tracing::info!("Created recipe {} ({})", created.id, created.title);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_recipes(
    State(state): State<SharedState>,
) -> Result<Json<Vec<Recipe>>, ApiError> {
    let recipes = state.repository.get_all_recipes().await?;
    Ok(Json(recipes))
}

pub async fn get_recipe(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Recipe>, ApiError> {
    let id = parse_id(&id)?;

    state
        .repository
        .get_recipe(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

pub async fn update_recipe(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<RecipePayload>, JsonRejection>,
) -> Result<Json<Recipe>, ApiError> {
    let id = parse_id(&id)?;
    let Json(payload) = payload?;
    let recipe = payload
        .validate()
        .map_err(|e| ApiError::Validation(e.to_string()))?;

    let updated = state
        .repository
        .update_recipe(id, recipe)
        .await?
        .ok_or(ApiError::NotFound(id))?;
    tracing::info!("Updated recipe {}", id);

    Ok(Json(updated))
}

pub async fn delete_recipe(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    if !state.repository.delete_recipe(id).await? {
        return Err(ApiError::NotFound(id));
    }
    tracing::info!("Deleted recipe {}", id);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn route_not_found(method: Method, uri: Uri) -> ApiError {
    ApiError::RouteNotFound(method, uri)
}

pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::MethodNotAllowed(method, uri)
}
