//! Route definitions for the item catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Item catalog routes mounted at `/items`.
///
/// ```text
/// GET    /                  -> list_items
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(items::list_items))
}
