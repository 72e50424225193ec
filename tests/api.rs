mod common;

use recipe_book::db::Repository;
use recipe_book::models::Recipe;
use reqwest::{Client, Method, StatusCode};
use serde_json::{json, Value};

use common::{spawn_server, spawn_server_with};

async fn create(client: &Client, url: &str, body: Value) -> Recipe {
    let response = client.post(url).json(&body).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.unwrap()
}

async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn create_without_title_is_rejected_and_nothing_is_inserted() {
    let url = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(&url)
        .json(&json!({"description": "missing title", "ingredients": ["Salt"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!error_message(response).await.is_empty());

    let response = client.post(&url).json(&json!({"title": ""})).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let all: Vec<Recipe> = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert!(all.is_empty());
}

#[tokio::test]
async fn create_returns_full_record_with_generated_id() {
    let url = spawn_server().await;
    let client = Client::new();

    let created = create(
        &client,
        &url,
        json!({
            "title": "Pasta",
            "description": "Fresh pasta",
            "ingredients": ["Flour", "Eggs"],
            "instructions": "Knead\nRoll"
        }),
    )
    .await;

    assert!(created.id > 0);
    assert_eq!(created.title, "Pasta");
    assert_eq!(created.ingredients, vec!["Flour", "Eggs"]);
    assert_eq!(created.instructions.as_deref(), Some("Knead\nRoll"));

    let fetched: Recipe = client
        .get(format!("{url}/{}", created.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn list_returns_records_in_ascending_id_order() {
    let url = spawn_server().await;
    let client = Client::new();

    let first = create(&client, &url, json!({"title": "Soup"})).await;
    let second = create(&client, &url, json!({"title": "Bread", "ingredients": ["Flour"]})).await;

    let all: Vec<Recipe> = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(all, vec![first, second]);
    assert!(all[0].id < all[1].id);
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let url = spawn_server().await;
    let client = Client::new();

    let response = client.get(format!("{url}/999")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(error_message(response).await.contains("999"));

    let response = client
        .put(format!("{url}/999"))
        .json(&json!({"title": "Ghost"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_a_validation_error() {
    let url = spawn_server().await;
    let client = Client::new();

    let response = client.get(format!("{url}/abc")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(error_message(response).await.contains("abc"));
}

#[tokio::test]
async fn malformed_body_gets_json_error() {
    let url = spawn_server().await;
    let client = Client::new();

    let response = client
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(error_message(response).await.starts_with("Malformed payload"));
}

#[tokio::test]
async fn update_replaces_mutable_fields() {
    let url = spawn_server().await;
    let client = Client::new();

    let created = create(
        &client,
        &url,
        json!({"title": "Soup", "description": "Plain", "ingredients": ["Water"]}),
    )
    .await;

    let response = client
        .put(format!("{url}/{}", created.id))
        .json(&json!({"title": "Tomato soup", "ingredients": ["Tomatoes", "Salt"]}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Recipe = response.json().await.unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Tomato soup");
    assert_eq!(updated.description, None);
    assert_eq!(updated.ingredients, vec!["Tomatoes", "Salt"]);

    let response = client
        .put(format!("{url}/{}", created.id))
        .json(&json!({"title": "  "}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleted_recipe_is_gone_and_repeat_delete_is_not_found() {
    let url = spawn_server().await;
    let client = Client::new();

    let created = create(&client, &url, json!({"title": "Salad"})).await;
    let recipe_url = format!("{url}/{}", created.id);

    let response = client.delete(&recipe_url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = client.get(&recipe_url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client.delete(&recipe_url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let next = create(&client, &url, json!({"title": "Salad"})).await;
    assert!(next.id > created.id);
}

#[tokio::test]
async fn null_ingredients_are_stored_as_empty() {
    let url = spawn_server().await;
    let client = Client::new();

    let created = create(&client, &url, json!({"title": "Toast", "ingredients": null})).await;
    assert_eq!(created.title, "Toast");
    assert!(created.ingredients.is_empty());
}

#[tokio::test]
async fn unsupported_method_gets_json_error() {
    let url = spawn_server().await;
    let client = Client::new();
    let created = create(&client, &url, json!({"title": "Soup"})).await;

    let response = client
        .patch(format!("{url}/{}", created.id))
        .json(&json!({"title": "Stew"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(error_message(response).await.contains("PATCH"));
}

#[tokio::test]
async fn unknown_route_gets_json_error() {
    let url = spawn_server().await;
    let client = Client::new();

    let response = client.get(format!("{url}/1/extra")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(error_message(response).await.contains("/api/recipes/1/extra"));
}

#[tokio::test]
async fn storage_failure_is_a_generic_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recipes.db");
    let repository = Repository::new(path.to_str().unwrap()).await.unwrap();
    let url = spawn_server_with(repository).await;

    rusqlite::Connection::open(&path)
        .unwrap()
        .execute_batch("DROP TABLE recipes;")
        .unwrap();

    let response = Client::new().get(&url).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text().await.unwrap(),
        r#"{"error":"Internal server error."}"#
    );
}

#[tokio::test]
async fn cors_preflight_allows_browser_writes() {
    let url = spawn_server().await;

    let response = Client::new()
        .request(Method::OPTIONS, format!("{url}/1"))
        .header("Origin", "http://localhost:5173")
        .header("Access-Control-Request-Method", "PUT")
        .header("Access-Control-Request-Headers", "content-type")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let methods = headers["access-control-allow-methods"].to_str().unwrap();
    assert!(methods.contains("PUT"));
    assert!(methods.contains("DELETE"));
    let allowed = headers["access-control-allow-headers"].to_str().unwrap();
    assert!(allowed.to_ascii_lowercase().contains("content-type"));
}
