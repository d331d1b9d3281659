//! Client for the external geography lookup service (IBGE localidades).
//!
//! Wraps the two calls the registration flow needs: the state (UF) list
//! and the city list for a selected state. The service is public and
//! unauthenticated; errors are surfaced to the caller, never retried
//! here.

use serde::Deserialize;

/// Default base URL of the IBGE localidades API.
pub const DEFAULT_GEO_API_URL: &str = "https://servicodados.ibge.gov.br/api/v1/localidades";

/// One state entry of the IBGE payload. Only the two-letter code is used.
#[derive(Debug, Deserialize)]
pub struct UfPayload {
    pub sigla: String,
}

/// One city entry of the IBGE payload.
#[derive(Debug, Deserialize)]
pub struct CityPayload {
    pub nome: String,
}

/// Errors from the geography lookup layer.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Geography service error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// HTTP client for the geography lookup service.
pub struct GeoClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeoClient {
    /// Create a client against the default IBGE endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_GEO_API_URL.to_string())
    }

    /// Create a client against a custom base URL (tests, mirrors).
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// List all two-letter state codes.
    ///
    /// Sends `GET /estados` and extracts the `sigla` field of each entry.
    pub async fn list_ufs(&self) -> Result<Vec<String>, GeoError> {
        let response = self
            .client
            .get(format!("{}/estados", self.base_url))
            .send()
            .await?;

        let states: Vec<UfPayload> = Self::parse_response(response).await?;
        Ok(states.into_iter().map(|s| s.sigla).collect())
    }

    /// List the city names of one state.
    ///
    /// Sends `GET /estados/{uf}/municipios` and extracts the `nome`
    /// field of each entry.
    pub async fn list_cities(&self, uf: &str) -> Result<Vec<String>, GeoError> {
        let response = self
            .client
            .get(format!("{}/estados/{}/municipios", self.base_url, uf))
            .send()
            .await?;

        let cities: Vec<CityPayload> = Self::parse_response(response).await?;
        Ok(cities.into_iter().map(|c| c.nome).collect())
    }

    // ---- private helpers ----

    /// Parse a successful JSON response body into the expected type, or
    /// return a [`GeoError::ApiError`] with the status and body text.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GeoError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GeoError::ApiError {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }
}

impl Default for GeoClient {
    fn default() -> Self {
        Self::new()
    }
}
