//! Data Models
//!
//! Wire types exchanged with the PricePulse API.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-assigned product identifier
pub type ProductId = i64;

/// Authenticated user profile, as returned by `/users/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub is_active: bool,
}

/// A tracked product as listed on the dashboard
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: String,
    pub url: String,
    pub current_price: f64,
    pub target_price: Option<f64>,
    pub last_updated: String,
}

impl Product {
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.last_updated)
    }
}

/// Product summary returned with its price history
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductDetail {
    #[serde(default)]
    pub name: String,
    pub current_price: f64,
    pub target_price: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One timestamped price observation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricePoint {
    pub timestamp: String,
    pub price: f64,
}

impl PricePoint {
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }
}

/// Response of `GET /products/{id}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductHistory {
    pub product: ProductDetail,
    #[serde(default)]
    pub price_history: Vec<PricePoint>,
}

/// Body of `POST /products/`; absent options are sent as `null`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub url: String,
    pub target_price: Option<f64>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatedProduct {
    pub product_id: ProductId,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Parse an RFC 3339 timestamp, or a naive ISO 8601 one taken as UTC
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    raw.parse::<NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc())
}
