//! Repository for the `points` table and its `point_items` associations.
//!
//! A point and its item associations are created together in one
//! transaction; `point_items` rows are never written independently.

use ecoleta_core::types::DbId;
use sqlx::PgPool;

use crate::models::item::Item;
use crate::models::point::{CreatePoint, Point};

/// Column list for `points` queries.
const POINT_COLUMNS: &str = "id, image, name, email, whatsapp, latitude, longitude, city, uf";

/// Image reference assigned at registration, replaced by a later upload.
pub const DEFAULT_POINT_IMAGE: &str = "point-placeholder.svg";

/// CRUD operations for collection points.
pub struct PointRepo;

impl PointRepo {
    /// Insert a point plus one `point_items` row per submitted item id.
    ///
    /// Runs in a single transaction so a failed association insert (e.g.
    /// an unknown item id hitting the FK) rolls back the point row too.
    pub async fn create(pool: &PgPool, input: &CreatePoint) -> Result<Point, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO points (image, name, email, whatsapp, latitude, longitude, city, uf) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {POINT_COLUMNS}"
        );
        let point = sqlx::query_as::<_, Point>(&insert_query)
            .bind(DEFAULT_POINT_IMAGE)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.whatsapp)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.city)
            .bind(&input.uf)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO point_items (point_id, item_id) \
             SELECT $1, unnest($2::bigint[])",
        )
        .bind(point.id)
        .bind(&input.items)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(point)
    }

    /// Find a point by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Point>, sqlx::Error> {
        let query = format!("SELECT {POINT_COLUMNS} FROM points WHERE id = $1");
        sqlx::query_as::<_, Point>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the items associated with a point, in catalog order.
    pub async fn items_for_point(pool: &PgPool, point_id: DbId) -> Result<Vec<Item>, sqlx::Error> {
        sqlx::query_as::<_, Item>(
            "SELECT i.id, i.image, i.title \
             FROM point_items pi \
             JOIN items i ON i.id = pi.item_id \
             WHERE pi.point_id = $1 \
             ORDER BY i.id",
        )
        .bind(point_id)
        .fetch_all(pool)
        .await
    }

    /// List points, optionally filtered by city, UF, and accepted items.
    ///
    /// The item filter matches points accepting ANY of the given ids.
    /// `NULL` filters are no-ops, so one query covers every combination.
    pub async fn list(
        pool: &PgPool,
        city: Option<&str>,
        uf: Option<&str>,
        item_ids: Option<&[DbId]>,
    ) -> Result<Vec<Point>, sqlx::Error> {
        let query = format!(
            "SELECT DISTINCT p.id, p.image, p.name, p.email, p.whatsapp, \
                    p.latitude, p.longitude, p.city, p.uf \
             FROM points p \
             JOIN point_items pi ON pi.point_id = p.id \
             WHERE ($1::text IS NULL OR p.city = $1) \
               AND ($2::text IS NULL OR p.uf = $2) \
               AND ($3::bigint[] IS NULL OR pi.item_id = ANY($3)) \
             ORDER BY p.id"
        );
        sqlx::query_as::<_, Point>(&query)
            .bind(city)
            .bind(uf)
            .bind(item_ids)
            .fetch_all(pool)
            .await
    }

    /// Replace a point's image reference after an upload.
    ///
    /// Returns `None` if no point with the given ID exists.
    pub async fn update_image(
        pool: &PgPool,
        id: DbId,
        image: &str,
    ) -> Result<Option<Point>, sqlx::Error> {
        let query = format!(
            "UPDATE points SET image = $2 WHERE id = $1 RETURNING {POINT_COLUMNS}"
        );
        sqlx::query_as::<_, Point>(&query)
            .bind(id)
            .bind(image)
            .fetch_optional(pool)
            .await
    }
}
