//! Home View

const FEATURES: [(&str, &str); 3] = [
    (
        "Price Tracking",
        "Automatically track product prices from Amazon and other e-commerce platforms.",
    ),
    (
        "Price Alerts",
        "Get notified when prices drop below your target price.",
    ),
    (
        "Price Comparison",
        "Compare prices across different platforms to find the best deals.",
    ),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct HomeView;

impl HomeView {
    pub fn render(&self) -> String {
        let mut out = String::from("Welcome to PricePulse\n");
        out.push_str("Track prices, get alerts, and find the best deals across e-commerce platforms\n\n");

        for (title, description) in FEATURES {
            out.push_str(&format!("  {}\n    {}\n", title, description));
        }

        out.push_str("\nStart tracking: pricepulse track <URL>\n");
        out
    }
}
