//! Handlers for collection point registration and retrieval.
//!
//! Registration inserts the point row and its item associations in one
//! transaction (see `PointRepo::create`), so a midway failure never
//! leaves an orphaned point.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ecoleta_core::error::CoreError;
use ecoleta_core::types::DbId;
use ecoleta_db::models::point::{CreatePoint, Point, PointListParams};
use ecoleta_db::repositories::PointRepo;
use serde::Serialize;
use validator::Validate;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};
use crate::handlers::items::ItemResponse;
use crate::response::DataResponse;
use crate::state::AppState;

/// A point as exposed on the wire: the stored image file name is
/// replaced by its public URL.
#[derive(Debug, Serialize)]
pub struct PointResponse {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    pub image_url: String,
}

impl PointResponse {
    fn from_point(point: Point, config: &ServerConfig) -> Self {
        Self {
            id: point.id,
            name: point.name,
            email: point.email,
            whatsapp: point.whatsapp,
            latitude: point.latitude,
            longitude: point.longitude,
            city: point.city,
            uf: point.uf,
            image_url: config.asset_url(&point.image),
        }
    }
}

/// A point with its associated items (`GET /points/{id}`).
#[derive(Debug, Serialize)]
pub struct PointDetailResponse {
    pub point: PointResponse,
    pub items: Vec<ItemResponse>,
}

/// POST /api/v1/points
///
/// Register a collection point with its accepted items. The payload must
/// name at least one item; unknown item ids are rejected without leaving
/// a point row behind.
pub async fn create_point(
    State(state): State<AppState>,
    Json(input): Json<CreatePoint>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let point = PointRepo::create(&state.pool, &input).await?;

    tracing::info!(
        point_id = point.id,
        city = %point.city,
        uf = %point.uf,
        items = input.items.len(),
        "Collection point registered",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PointResponse::from_point(point, &state.config),
        }),
    ))
}

/// GET /api/v1/points
///
/// List collection points, optionally filtered by `city`, `uf`, and
/// `items` (comma-separated item ids; points accepting any of them).
pub async fn list_points(
    State(state): State<AppState>,
    Query(params): Query<PointListParams>,
) -> AppResult<impl IntoResponse> {
    let item_ids = params
        .item_ids()
        .map_err(|_| AppError::BadRequest("items must be a comma-separated list of ids".into()))?;

    let points = PointRepo::list(
        &state.pool,
        params.city.as_deref(),
        params.uf.as_deref(),
        item_ids.as_deref(),
    )
    .await?;

    let data: Vec<PointResponse> = points
        .into_iter()
        .map(|point| PointResponse::from_point(point, &state.config))
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/points/{id}
///
/// Fetch one point with its associated items.
pub async fn show_point(
    State(state): State<AppState>,
    Path(point_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let point = PointRepo::find_by_id(&state.pool, point_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Point",
            id: point_id,
        }))?;

    let items = PointRepo::items_for_point(&state.pool, point_id).await?;

    Ok(Json(DataResponse {
        data: PointDetailResponse {
            point: PointResponse::from_point(point, &state.config),
            items: items
                .into_iter()
                .map(|item| ItemResponse::from_item(item, &state.config))
                .collect(),
        },
    }))
}

/// POST /api/v1/points/{id}/image
///
/// Attach an image to a registered point (multipart field `image`). The
/// file is stored under the upload directory and the point's image
/// reference is replaced.
pub async fn upload_point_image(
    State(state): State<AppState>,
    Path(point_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    // Reject unknown points before touching the filesystem.
    PointRepo::find_by_id(&state.pool, point_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Point",
            id: point_id,
        }))?;

    let mut stored: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let extension = field
            .file_name()
            .and_then(|f| f.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()))
            .unwrap_or_else(|| "png".to_string());

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let stamp = chrono::Utc::now().timestamp_millis();
        let file_name = format!("point-{point_id}-{stamp}.{extension}");

        tokio::fs::create_dir_all(&state.config.upload_dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;
        let dest = std::path::Path::new(&state.config.upload_dir).join(&file_name);
        tokio::fs::write(&dest, &data)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        stored = Some(file_name);
        break;
    }

    let file_name = stored
        .ok_or_else(|| AppError::BadRequest("Multipart field 'image' is required".to_string()))?;

    let point = PointRepo::update_image(&state.pool, point_id, &file_name)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Point",
            id: point_id,
        }))?;

    tracing::info!(point_id, file = %file_name, "Point image uploaded");

    Ok(Json(DataResponse {
        data: PointResponse::from_point(point, &state.config),
    }))
}
