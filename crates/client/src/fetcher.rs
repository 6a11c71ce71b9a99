//! Catalog fetching.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use storefront_core::DomainError;
use storefront_products::{Catalog, Product};

use crate::config::ClientConfig;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("catalog API error ({0}): {1}")]
    Status(u16, String),
    #[error("malformed catalog payload: {0}")]
    Decode(String),
    #[error("catalog rejected: {0}")]
    Invalid(#[from] DomainError),
    #[error("http client setup failed: {0}")]
    Client(String),
}

/// Anything that can produce the full catalog in one read.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<Catalog, FetchError>;

    /// Where the catalog comes from, for logs.
    fn origin(&self) -> &str;
}

/// Catalog source backed by a JSON HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: String,
}

impl HttpCatalogSource {
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.fetch_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self::with_client(client, config.catalog_url.clone()))
    }

    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Catalog, FetchError> {
        tracing::debug!(url = %self.url, "fetching catalog");

        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(
                status.as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        let products = resp.json::<Vec<Product>>().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Decode(e.to_string())
            } else {
                FetchError::Network(e.to_string())
            }
        })?;

        let catalog = Catalog::new(products)?;
        tracing::info!(url = %self.url, products = catalog.len(), "catalog fetched");
        Ok(catalog)
    }

    fn origin(&self) -> &str {
        &self.url
    }
}

/// Fixed in-memory source (tests, demos). Counts how often it was read.
#[derive(Debug)]
pub struct StaticCatalogSource {
    outcome: Result<Vec<Product>, FetchError>,
    fetches: AtomicUsize,
}

impl StaticCatalogSource {
    pub fn products(products: Vec<Product>) -> Self {
        Self {
            outcome: Ok(products),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: FetchError) -> Self {
        Self {
            outcome: Err(error),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogSource for StaticCatalogSource {
    async fn fetch(&self) -> Result<Catalog, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let products = self.outcome.clone()?;
        Ok(Catalog::new(products)?)
    }

    fn origin(&self) -> &str {
        "static"
    }
}
