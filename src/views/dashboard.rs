//! Dashboard View
//!
//! Lists the user's tracked products and lets them stop tracking one.

use tracing::error;

use super::{format_price, Banner};
use crate::api::ApiClient;
use crate::models::{Product, ProductId};

#[derive(Debug, Clone, Default)]
pub struct DashboardView {
    products: Vec<Product>,
    banner: Option<Banner>,
}

impl DashboardView {
    /// Fetch the product list
    pub async fn load(api: &ApiClient) -> Self {
        match api.list_products().await {
            Ok(products) => Self { products, banner: None },
            Err(e) => {
                error!("Error fetching products: {}", e);
                Self {
                    products: Vec::new(),
                    banner: Some(Banner::error("Failed to fetch products")),
                }
            }
        }
    }

    /// Stop tracking `id`; only that product leaves the list, and only on success
    pub async fn delete(&mut self, api: &ApiClient, id: ProductId) {
        match api.delete_product(id).await {
            Ok(()) => {
                self.products.retain(|p| p.id != id);
            }
            Err(e) => {
                error!("Error deleting product: {}", e);
                self.banner = Some(Banner::error("Failed to delete product"));
            }
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn render(&self) -> String {
        let mut out = String::from("My Tracked Products\n\n");

        if let Some(banner) = &self.banner {
            out.push_str(&format!("{}\n\n", banner));
        }

        if self.products.is_empty() {
            out.push_str("No products tracked yet\n");
            out.push_str("Start tracking your first product to see price history and get alerts:\n");
            out.push_str("  pricepulse track <URL>\n");
            return out;
        }

        out.push_str(&format!(
            "{:<6} {:<32} {:>12} {:>12}  {}\n",
            "ID", "Name", "Current", "Target", "Last Updated"
        ));
        out.push_str(&format!("{}\n", "-".repeat(84)));

        for product in &self.products {
            let target = product
                .target_price
                .map(format_price)
                .unwrap_or_else(|| "-".to_string());
            let updated = product
                .last_updated_at()
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| product.last_updated.clone());

            out.push_str(&format!(
                "{:<6} {:<32} {:>12} {:>12}  {}\n",
                product.id,
                truncate(display_name(product), 32),
                format_price(product.current_price),
                target,
                updated
            ));
        }

        out.push_str("\nView price history with: pricepulse history <ID>\n");
        out
    }
}

fn display_name(product: &Product) -> &str {
    if product.name.is_empty() {
        &product.url
    } else {
        &product.name
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max - 1).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{fixture_products, Fault, MockBackend, TOKEN};

    #[tokio::test]
    async fn test_load_lists_products() {
        let backend = MockBackend::start().await;
        let (state, _dir) = backend.app_state();
        state.session.set_token(TOKEN.to_string());

        let view = DashboardView::load(&state.api).await;

        assert_eq!(view.products(), fixture_products().as_slice());
        assert!(view.banner().is_none());
        let rendered = view.render();
        assert!(rendered.contains("Electric Kettle"));
        assert!(rendered.contains("₹1299.00"));
        assert!(rendered.contains("2024-03-01 10:30"));
    }

    #[tokio::test]
    async fn test_load_failure_sets_banner() {
        let backend = MockBackend::start().await;
        backend.fail(Fault::ListProducts);
        let (state, _dir) = backend.app_state();
        state.session.set_token(TOKEN.to_string());

        let view = DashboardView::load(&state.api).await;

        assert!(view.products().is_empty());
        assert_eq!(view.banner(), Some(&Banner::error("Failed to fetch products")));
        assert!(view.render().contains("[error] Failed to fetch products"));
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_that_id() {
        let backend = MockBackend::start().await;
        let (state, _dir) = backend.app_state();
        state.session.set_token(TOKEN.to_string());

        let mut view = DashboardView::load(&state.api).await;
        view.delete(&state.api, 2).await;

        let ids: Vec<ProductId> = view.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(backend.product_ids(), vec![1, 3]);
        assert!(view.banner().is_none());
        assert_eq!(backend.last_call().unwrap().path, "/products/2");
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_list() {
        let backend = MockBackend::start().await;
        let (state, _dir) = backend.app_state();
        state.session.set_token(TOKEN.to_string());

        let mut view = DashboardView::load(&state.api).await;
        backend.fail(Fault::DeleteProduct);
        view.delete(&state.api, 2).await;

        assert_eq!(view.products().len(), 3);
        assert_eq!(view.banner(), Some(&Banner::error("Failed to delete product")));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_keeps_list() {
        let backend = MockBackend::start().await;
        let (state, _dir) = backend.app_state();
        state.session.set_token(TOKEN.to_string());

        let mut view = DashboardView::load(&state.api).await;
        view.delete(&state.api, 99).await;

        assert_eq!(view.products().len(), 3);
        assert!(view.banner().unwrap().is_error());
    }

    #[test]
    fn test_empty_state() {
        let view = DashboardView::default();
        let rendered = view.render();
        assert!(rendered.contains("No products tracked yet"));
    }

    #[test]
    fn test_missing_target_rendered_as_dash() {
        let mut products = fixture_products();
        products.truncate(2);
        let view = DashboardView { products, banner: None };

        let line = view
            .render()
            .lines()
            .find(|l| l.contains("Noise Cancelling"))
            .unwrap()
            .to_string();
        assert!(line.contains(" - "));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 5), "abcd…");
    }
}
