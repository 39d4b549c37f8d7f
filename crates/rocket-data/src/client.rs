//! Catalog lookups over HTTP.

use async_trait::async_trait;
use reqwest::StatusCode;
use rocket_commerce::{Product, ProductId, StockRecord};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::dependency::DependencyTag;
use crate::timeout::TimeoutConfig;

/// Error type for fetch operations.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Not found: {url}")]
    NotFound { url: String },

    #[error("Empty response from {url}")]
    Empty { url: String },

    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Request error: {0}")]
    Request(String),
}

impl FetchError {
    fn from_reqwest(e: reqwest::Error, url: &str) -> Self {
        if e.is_timeout() {
            Self::Timeout(url.to_string())
        } else if e.is_connect() {
            Self::Connection(e.to_string())
        } else if e.is_decode() {
            Self::Deserialization(e.to_string())
        } else {
            Self::Request(e.to_string())
        }
    }
}

/// Read access to product master data and stock levels.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Fetch product master data.
    async fn product(&self, id: ProductId) -> Result<Product, FetchError>;

    /// Fetch the current stock record.
    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError>;
}

/// `Catalog` backed by the storefront REST API.
///
/// Serves `GET {base}/products/{id}` and `GET {base}/stock/{id}`.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
    timeouts: TimeoutConfig,
}

impl HttpCatalog {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: impl Into<String>, timeouts: TimeoutConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(connect) = timeouts.connect {
            builder = builder.connect_timeout(connect);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeouts,
        })
    }

    /// API root.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        tag: DependencyTag,
        id: ProductId,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}/{}", self.base_url, tag.resource(), id);
        debug!(%tag, %url, "catalog request");

        let resp = self
            .client
            .get(&url)
            .timeout(self.timeouts.total_for(tag))
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(e, &url))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound { url });
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url,
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::from_reqwest(e, &url))?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::Empty { url });
        }

        serde_json::from_slice::<Option<T>>(&body)
            .map_err(|e| FetchError::Deserialization(e.to_string()))?
            .ok_or(FetchError::Empty { url })
    }
}

#[async_trait]
impl Catalog for HttpCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, FetchError> {
        self.fetch(DependencyTag::Catalog, id).await
    }

    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError> {
        self.fetch(DependencyTag::Inventory, id).await
    }
}
