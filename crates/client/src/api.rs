//! REST client for the registration API.

use ecoleta_core::registration::{CatalogItem, PointSubmission};
use ecoleta_core::types::DbId;
use serde::Deserialize;

/// The `{"data": ...}` envelope every API response uses.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// A point as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct PointRecord {
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

/// A point with the items it accepts (`GET /points/{id}`).
#[derive(Debug, Clone, Deserialize)]
pub struct PointDetail {
    pub point: PointRecord,
    pub items: Vec<CatalogItem>,
}

/// Errors from the registration API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("Registration API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the registration API.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create an API client.
    ///
    /// * `base_url` - API root, e.g. `http://localhost:3333/api/v1`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Fetch the item catalog (`GET /items`).
    pub async fn list_items(&self) -> Result<Vec<CatalogItem>, ApiError> {
        let response = self
            .client
            .get(format!("{}/items", self.base_url))
            .send()
            .await?;

        let envelope: Envelope<Vec<CatalogItem>> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    /// Register a collection point (`POST /points`).
    pub async fn create_point(&self, submission: &PointSubmission) -> Result<PointRecord, ApiError> {
        let response = self
            .client
            .post(format!("{}/points", self.base_url))
            .json(submission)
            .send()
            .await?;

        let envelope: Envelope<PointRecord> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    /// Fetch one point with its items (`GET /points/{id}`).
    pub async fn get_point(&self, id: DbId) -> Result<PointDetail, ApiError> {
        let response = self
            .client
            .get(format!("{}/points/{}", self.base_url, id))
            .send()
            .await?;

        let envelope: Envelope<PointDetail> = Self::parse_response(response).await?;
        Ok(envelope.data)
    }

    // ---- private helpers ----

    /// Parse a successful JSON response body into the expected type, or
    /// return an [`ApiError::ApiError`] with the status and body text.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_detail_parses_enveloped_response() {
        let raw = r#"{
            "data": {
                "point": {
                    "id": 1,
                    "name": "Eco Ponto A",
                    "email": "a@eco.org",
                    "whatsapp": "4899999999",
                    "latitude": -27.59,
                    "longitude": -48.54,
                    "city": "Florianópolis",
                    "uf": "SC",
                    "image_url": "http://localhost:3333/uploads/point-placeholder.svg"
                },
                "items": [
                    {"id": 1, "title": "Lâmpadas",
                     "image_url": "http://localhost:3333/uploads/lampadas.svg"}
                ]
            }
        }"#;
        let envelope: Envelope<PointDetail> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.data.point.uf, "SC");
        assert_eq!(envelope.data.items.len(), 1);
        assert_eq!(envelope.data.items[0].title, "Lâmpadas");
    }

    #[test]
    fn catalog_parses_enveloped_list() {
        let raw = r#"{"data": [
            {"id": 6, "title": "Óleo de Cozinha",
             "image_url": "http://localhost:3333/uploads/oleo.svg"}
        ]}"#;
        let envelope: Envelope<Vec<CatalogItem>> = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.data[0].id, 6);
    }
}
