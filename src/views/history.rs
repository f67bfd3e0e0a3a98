//! Price History View

use tracing::error;

use super::chart::{render_chart, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use super::{format_price, Banner};
use crate::api::ApiClient;
use crate::models::{ProductHistory, ProductId};

#[derive(Debug, Clone)]
pub struct HistoryView {
    product_id: ProductId,
    data: Option<ProductHistory>,
    banner: Option<Banner>,
}

impl HistoryView {
    pub async fn load(api: &ApiClient, product_id: ProductId) -> Self {
        match api.product_history(product_id).await {
            Ok(data) => Self { product_id, data: Some(data), banner: None },
            Err(e) => {
                error!("Error fetching product {}: {}", product_id, e);
                Self {
                    product_id,
                    data: None,
                    banner: Some(Banner::error("Failed to fetch product data")),
                }
            }
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn data(&self) -> Option<&ProductHistory> {
        self.data.as_ref()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn render(&self) -> String {
        let data = match (&self.banner, &self.data) {
            (Some(banner), _) => return format!("{}\n", banner),
            (None, Some(data)) => data,
            (None, None) => return String::new(),
        };

        let product = &data.product;
        let mut out = format!("{}\n", product.name);
        out.push_str(&format!("Current Price: {}\n", format_price(product.current_price)));
        if let Some(target) = product.target_price {
            out.push_str(&format!("Target Price: {}\n", format_price(target)));
        }
        if let Some(image) = &product.image_url {
            out.push_str(&format!("Image: {}\n", image));
        }
        out.push('\n');
        out.push_str(&render_chart(&data.price_history, DEFAULT_WIDTH, DEFAULT_HEIGHT));
        out
    }
}
