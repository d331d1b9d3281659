//! Collection point models and DTOs.

use ecoleta_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::item::Item;

/// A row from the `points` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Point {
    pub id: DbId,
    /// Image file name relative to the public asset base URL.
    pub image: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
}

/// DTO for registering a new collection point (`POST /points`).
///
/// The point row and its item associations are inserted together; the
/// item set must not be empty.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePoint {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "whatsapp must not be empty"))]
    pub whatsapp: String,
    #[validate(length(equal = 2, message = "uf must be a two-letter state code"))]
    pub uf: String,
    #[validate(length(min = 1, message = "city must not be empty"))]
    pub city: String,
    #[validate(range(min = -90.0, max = 90.0, message = "latitude out of range"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "longitude out of range"))]
    pub longitude: f64,
    #[validate(length(min = 1, message = "at least one item is required"))]
    pub items: Vec<DbId>,
}

/// A point together with the items it accepts (`GET /points/{id}`).
#[derive(Debug, Clone, Serialize)]
pub struct PointWithItems {
    pub point: Point,
    pub items: Vec<Item>,
}

/// Optional filters for the point listing (`GET /points`).
#[derive(Debug, Default, Deserialize)]
pub struct PointListParams {
    pub city: Option<String>,
    pub uf: Option<String>,
    /// Comma-separated item ids; points accepting ANY of them match.
    pub items: Option<String>,
}

impl PointListParams {
    /// Parse the comma-separated `items` filter into ids.
    ///
    /// Blank segments are skipped; a non-numeric segment makes the whole
    /// filter invalid so the caller can reject the request.
    pub fn item_ids(&self) -> Result<Option<Vec<DbId>>, std::num::ParseIntError> {
        let Some(raw) = &self.items else {
            return Ok(None);
        };
        let ids = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<DbId>, _>>()?;
        Ok(if ids.is_empty() { None } else { Some(ids) })
    }
}
