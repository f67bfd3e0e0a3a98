//! Tracker View
//!
//! Form for submitting a new product URL to track.

use tracing::{error, info};

use super::Banner;
use crate::api::ApiClient;
use crate::models::NewProduct;
use crate::routes::Route;

/// Raw form input, as typed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerForm {
    pub url: String,
    pub target_price: String,
    pub email: String,
}

impl TrackerForm {
    /// Validate the input; blank optional fields become `None`
    pub fn to_request(&self) -> Result<NewProduct, String> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err("Please enter a product URL".to_string());
        }

        let target_price = match self.target_price.trim() {
            "" => None,
            raw => match raw.parse::<f64>() {
                Ok(price) if price.is_finite() && price > 0.0 => Some(price),
                _ => return Err("Target price must be a positive number".to_string()),
            },
        };

        let email = match self.email.trim() {
            "" => None,
            email => Some(email.to_string()),
        };

        Ok(NewProduct { url: url.to_string(), target_price, email })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrackerView {
    form: TrackerForm,
    banner: Option<Banner>,
    next: Option<Route>,
}

impl TrackerView {
    pub fn with_form(form: TrackerForm) -> Self {
        Self { form, ..Self::default() }
    }

    /// Submit the form; on success the form resets and the next route is the new product's history
    pub async fn submit(&mut self, api: &ApiClient) {
        self.banner = None;
        self.next = None;

        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(message) => {
                self.banner = Some(Banner::Error(message));
                return;
            }
        };

        match api.create_product(&request).await {
            Ok(created) => {
                info!("Tracking product {}", created.product_id);
                self.form = TrackerForm::default();
                self.banner = Some(Banner::success("Product added successfully!"));
                self.next = Some(Route::History(created.product_id));
            }
            Err(e) => {
                error!("Error adding product: {}", e);
                self.banner = Some(Banner::error(
                    "Failed to add product. Please check the URL and try again.",
                ));
            }
        }
    }

    pub fn form(&self) -> &TrackerForm {
        &self.form
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Where to go after a successful submission
    pub fn next_route(&self) -> Option<Route> {
        self.next
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Track a Product\n\n");
        out.push_str("  Product URL       (required)  e.g. https://www.amazon.in/dp/...\n");
        out.push_str("  Target Price (₹)  (optional)  get notified when price drops below this\n");
        out.push_str("  Email             (optional)  for price drop notifications\n\n");
        out.push_str("  pricepulse track <URL> [--target-price <PRICE>] [--email <EMAIL>]\n");

        if let Some(banner) = &self.banner {
            out.push_str(&format!("\n{}\n", banner));
        }
        out
    }
}
