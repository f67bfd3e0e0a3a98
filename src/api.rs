//! API Client Module
//!
//! Handles HTTP communication with the PricePulse backend.

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use tracing::{info, debug};

use crate::models::{
    CreatedProduct, NewProduct, Product, ProductHistory, ProductId, RegisterRequest,
    TokenResponse, User,
};
use crate::session::SessionStore;

/// API client for the PricePulse backend
///
/// Every request carries `Authorization: Bearer <token>` while the shared
/// session holds a token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    session: SessionStore,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str, timeout: Duration, session: SessionStore) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchange credentials for an access token
    pub async fn request_token(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let url = self.url("/token");
        debug!("Requesting token at: {}", url);

        let response = self.authorize(self.client.post(&url))
            .form(&[("username", email), ("password", password)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let token = parse(check(response).await?).await?;
        info!("Access token issued");
        Ok(token)
    }

    /// Fetch the profile of the token holder
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let response = self.get("/users/me").await?;
        parse(response).await
    }

    /// Create an account; returns the created-user payload as sent by the server
    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<serde_json::Value, ApiError> {
        let url = self.url("/register");
        info!("Registering account: {}", request.username);

        let response = self.authorize(self.client.post(&url))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        parse(check(response).await?).await
    }

    /// List tracked products
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.get("/products/").await?;
        parse(response).await
    }

    /// Stop tracking a product
    pub async fn delete_product(&self, id: ProductId) -> Result<(), ApiError> {
        let url = self.url(&format!("/products/{}", id));

        let response = self.authorize(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check(response).await?;
        info!("Deleted product: {}", id);
        Ok(())
    }

    /// Start tracking a product URL
    pub async fn create_product(&self, product: &NewProduct) -> Result<CreatedProduct, ApiError> {
        let url = self.url("/products/");
        info!("Submitting product: {}", product.url);

        let response = self.authorize(self.client.post(&url))
            .json(product)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let created: CreatedProduct = parse(check(response).await?).await?;
        info!("Product created: {}", created.product_id);
        Ok(created)
    }

    /// Fetch one product together with its price series
    pub async fn product_history(&self, id: ProductId) -> Result<ProductHistory, ApiError> {
        let response = self.get(&format!("/products/{}", id)).await?;
        parse(response).await
    }

    async fn get(&self, path: &str) -> Result<Response, ApiError> {
        let url = self.url(path);
        debug!("GET {}", url);

        let response = self.authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        check(response).await
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn user_agent() -> String {
    let host = whoami::fallible::hostname()
        .unwrap_or_else(|_| "unknown-host".to_string());
    format!("pricepulse/{} ({})", env!("CARGO_PKG_VERSION"), host)
}

/// Turn a non-2xx response into `ApiError::Server`, using the body's `detail`
async fn check(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = match response.json::<ErrorResponse>().await {
        Ok(ErrorResponse { detail: serde_json::Value::String(detail) }) => detail,
        Ok(ErrorResponse { detail: serde_json::Value::Null }) | Err(_) => format!("Status: {}", status),
        Ok(ErrorResponse { detail }) => detail.to_string(),
    };

    debug!("Request failed with {}: {}", status, message);
    Err(ApiError::Server { status: status.as_u16(), message })
}

async fn parse<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, ApiError> {
    response.json::<T>().await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

#[derive(Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: serde_json::Value,
}

/// API errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Server-provided reason, when the server gave one
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}
