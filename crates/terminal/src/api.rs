//! HTTP bindings for the backend's catalog and sales endpoints.

use async_trait::async_trait;
use reqwest::Response;

use tsmpos_products::{NewProduct, Product};
use tsmpos_sales::SaleRequest;

use crate::config::PosConfig;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Operator-facing message. Transport failures all read the same;
    /// anything the server answered uses `rejected`.
    pub fn user_message(&self, rejected: &str) -> String {
        match self {
            ApiError::Network(_) => "Network error".to_string(),
            ApiError::Api(..) | ApiError::Parse(_) => rejected.to_string(),
        }
    }
}

/// Product listing and creation.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError>;
}

/// Recording of completed sales. The backend decrements stock.
#[async_trait]
pub trait SalesService: Send + Sync {
    async fn submit_sale(&self, sale: &SaleRequest) -> Result<(), ApiError>;
}

/// `reqwest` implementation of both services against one base URL.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    api_base: String,
}

impl HttpApi {
    pub fn new(config: &PosConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn ensure_success(resp: Response) -> Result<Response, ApiError> {
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            return Err(ApiError::Api(status, resp.text().await.unwrap_or_default()));
        }
        Ok(resp)
    }
}

#[async_trait]
impl CatalogService for HttpApi {
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let resp = self
            .client
            .get(self.url("/products"))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = Self::ensure_success(resp).await?;

        let products: Vec<Product> = resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))?;
        tracing::debug!(count = products.len(), "fetched products");
        Ok(products)
    }

    async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let resp = self
            .client
            .post(self.url("/products"))
            .json(product)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = Self::ensure_success(resp).await?;

        resp.json().await.map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait]
impl SalesService for HttpApi {
    async fn submit_sale(&self, sale: &SaleRequest) -> Result<(), ApiError> {
        let resp = self
            .client
            .post(self.url("/sales"))
            .json(sale)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Self::ensure_success(resp).await?;
        Ok(())
    }
}
