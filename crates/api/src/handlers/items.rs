//! Handlers for the collectible item catalog.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use ecoleta_core::types::DbId;
use ecoleta_db::models::item::Item;
use ecoleta_db::repositories::ItemRepo;
use serde::Serialize;

use crate::config::ServerConfig;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// An item as exposed on the wire: the stored image file name is
/// replaced by its public URL.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: DbId,
    pub title: String,
    pub image_url: String,
}

impl ItemResponse {
    pub fn from_item(item: Item, config: &ServerConfig) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image_url: config.asset_url(&item.image),
        }
    }
}

/// GET /api/v1/items
///
/// List the seeded item catalog in natural table order.
pub async fn list_items(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let items = ItemRepo::list_all(&state.pool).await?;

    let data: Vec<ItemResponse> = items
        .into_iter()
        .map(|item| ItemResponse::from_item(item, &state.config))
        .collect();

    Ok(Json(DataResponse { data }))
}
