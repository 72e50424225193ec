use recipe_book::db::Repository;
use recipe_book::server::{self, State, API_PREFIX};
use tokio::net::TcpListener;

/// Start the API on an ephemeral port backed by an in-memory database and
/// return the collection URL.
pub async fn spawn_server() -> String {
    let repository = Repository::new(":memory:").await.unwrap();
    spawn_server_with(repository).await
}

/// Start the API over an already opened repository.
pub async fn spawn_server_with(repository: Repository) -> String {
    let app = server::router(State::new(repository));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{address}{API_PREFIX}")
}

/// A URL nothing is listening on.
#[allow(dead_code)]
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{address}{API_PREFIX}")
}
