//! Repository for the `items` reference table.

use sqlx::PgPool;

use crate::models::item::Item;

/// Column list for `items` queries.
const ITEM_COLUMNS: &str = "id, image, title";

/// Read access to the seeded item catalog.
pub struct ItemRepo;

impl ItemRepo {
    /// List all items in natural table order.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Item>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY id");
        sqlx::query_as::<_, Item>(&query).fetch_all(pool).await
    }

    /// Find an item by its ID.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<Item>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = $1");
        sqlx::query_as::<_, Item>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
