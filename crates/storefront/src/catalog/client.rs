//! HTTP client for the public catalog API.

use std::sync::Arc;

use tracing::instrument;
use url::Url;

use super::{CatalogError, CatalogSource, Product};
use crate::config::CatalogConfig;

/// Maximum number of body characters kept in error logs.
const BODY_PREVIEW_CHARS: usize = 500;

/// Reads the product list from a JSON endpoint such as
/// `https://fakestoreapi.com/products`.
#[derive(Clone)]
pub struct HttpCatalogSource {
    inner: Arc<HttpCatalogSourceInner>,
}

struct HttpCatalogSourceInner {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpCatalogSource {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("credshop/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(HttpCatalogSourceInner {
                client,
                endpoint: config.url.clone(),
            }),
        })
    }

    /// The endpoint this client reads from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }
}

impl CatalogSource for HttpCatalogSource {
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    async fn fetch_products(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %preview(&response_text),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %preview(&response_text),
                "Failed to parse catalog response"
            );
            CatalogError::Parse(e)
        })
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
