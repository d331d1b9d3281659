pub mod health;
pub mod items;
pub mod points;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /items                    item catalog (GET)
///
/// /points                   list (GET, ?city=&uf=&items=), register (POST)
/// /points/{id}              point with its items (GET)
/// /points/{id}/image        image upload (POST, multipart)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Collectible item catalog.
        .nest("/items", items::router())
        // Collection point registration and retrieval.
        .nest("/points", points::router())
}
