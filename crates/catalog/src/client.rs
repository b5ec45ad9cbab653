//! REST client for the breed catalog `/v1/breeds` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use spycats_core::breed::BreedCatalog;
use spycats_core::error::CoreError;

/// One entry of the catalog's breed listing. Only the name is used.
#[derive(Debug, Deserialize)]
pub struct BreedEntry {
    pub name: String,
}

/// Errors from the breed catalog HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The catalog returned a non-2xx status code.
    #[error("Breed catalog error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<CatalogError> for CoreError {
    fn from(err: CatalogError) -> Self {
        CoreError::Internal(format!("Breed catalog unavailable: {err}"))
    }
}

/// HTTP client for the breed catalog.
pub struct BreedCatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl BreedCatalogClient {
    /// Create a client for the catalog at `base_url`, e.g.
    /// `https://api.thecatapi.com`. Every request is bounded by `timeout`.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Fetch the full breed listing.
    pub async fn list_breeds(&self) -> Result<Vec<BreedEntry>, CatalogError> {
        let response = self
            .client
            .get(format!("{}/v1/breeds", self.base_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json::<Vec<BreedEntry>>().await?)
    }
}

#[async_trait]
impl BreedCatalog for BreedCatalogClient {
    async fn breed_names(&self) -> Result<Vec<String>, CoreError> {
        let breeds = self.list_breeds().await.map_err(|err| {
            tracing::warn!(error = %err, "Breed catalog lookup failed");
            CoreError::from(err)
        })?;
        tracing::debug!(count = breeds.len(), "Fetched breed catalog");
        Ok(breeds.into_iter().map(|b| b.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use spycats_core::breed::check_breed;

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn breeds() -> Json<serde_json::Value> {
        Json(serde_json::json!([
            {"id": "siam", "name": "Siamese", "origin": "Thailand"},
            {"id": "mcoo", "name": "Maine Coon", "origin": "United States"}
        ]))
    }

    fn client(base_url: &str) -> BreedCatalogClient {
        BreedCatalogClient::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn lists_breed_names() {
        let base = serve(Router::new().route("/v1/breeds", get(breeds))).await;
        let names = client(&base).breed_names().await.unwrap();
        assert_eq!(names, vec!["Siamese".to_string(), "Maine Coon".to_string()]);
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let base = serve(Router::new().route("/v1/breeds", get(breeds))).await;
        let catalog = client(&format!("{base}/"));
        assert!(check_breed(&catalog, "maine coon").await.unwrap());
        assert!(!check_breed(&catalog, "UnknownBreed").await.unwrap());
    }

    #[tokio::test]
    async fn non_success_status_is_an_api_error() {
        let router = Router::new().route(
            "/v1/breeds",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "down for maintenance") }),
        );
        let base = serve(router).await;
        match client(&base).list_breeds().await {
            Err(CatalogError::ApiError { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "down for maintenance");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failures_surface_as_internal_core_errors() {
        let router = Router::new().route(
            "/v1/breeds",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = serve(router).await;
        let result = client(&base).breed_names().await;
        assert!(matches!(result, Err(CoreError::Internal(_))));
    }
}
