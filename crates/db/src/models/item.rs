//! Item catalog models.

use ecoleta_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `items` table. Seeded by migration, read-only at runtime.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Item {
    pub id: DbId,
    /// Image file name relative to the public asset base URL.
    pub image: String,
    pub title: String,
}
