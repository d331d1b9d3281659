//! Route definitions for collection points.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::points;
use crate::state::AppState;

/// Collection point routes mounted at `/points`.
///
/// ```text
/// GET    /                  -> list_points
/// POST   /                  -> create_point
/// GET    /{id}              -> show_point
/// POST   /{id}/image        -> upload_point_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(points::list_points).post(points::create_point))
        .route("/{id}", get(points::show_point))
        .route("/{id}/image", post(points::upload_point_image))
}
