//! # Recipe API
//!
//! JSON CRUD over the `recipes` table, mounted under [`API_PREFIX`].
//!
//! | Method   | Path                 | Success | Errors        |
//! |----------|----------------------|---------|---------------|
//! | `POST`   | `/api/recipes`       | 201     | 400, 500      |
//! | `GET`    | `/api/recipes`       | 200     | 500           |
//! | `GET`    | `/api/recipes/{id}`  | 200     | 400, 404, 500 |
//! | `PUT`    | `/api/recipes/{id}`  | 200     | 400, 404, 500 |
//! | `DELETE` | `/api/recipes/{id}`  | 204     | 400, 404, 500 |
//!
//! Every error body is `{"error": "..."}`, unknown paths (404) and
//! unsupported methods (405) included.
use std::{sync::Arc, time::Duration};

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod error;
pub mod routes;
pub mod state;

use crate::config::Config;
use crate::db::Repository;
use crate::error::Result;
use routes::{
    create_recipe, delete_recipe, get_recipe, list_recipes, method_not_allowed, route_not_found,
    update_recipe,
};
pub use state::State;

pub const API_PREFIX: &str = "/api/recipes";

pub fn router(state: Arc<State>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(API_PREFIX, get(list_recipes).post(create_recipe))
        .route(
            &format!("{API_PREFIX}/{{id}}"),
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: &Config) -> Result<()> {
    info!("Opening database at {}", config.db_path);
    let repository = Repository::new(&config.db_path).await?;

    let now = repository.ping().await?;
    info!("Connected to database. Current time: {now}");

    let app = router(State::new(repository));

    let address = config.bind_address();
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Backend API running on http://{address}");
    info!("API endpoints: {API_PREFIX}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
