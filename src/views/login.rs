//! Login and Register Views

use super::Banner;
use crate::auth::AuthGateway;
use crate::routes::Route;

#[derive(Debug, Clone, Default)]
pub struct LoginView {
    banner: Option<Banner>,
    next: Option<Route>,
}

impl LoginView {
    pub async fn submit(auth: &AuthGateway, email: &str, password: &str) -> Self {
        match auth.login(email, password).await {
            Ok(_) => Self { banner: None, next: Some(Route::Dashboard) },
            Err(_) => Self {
                banner: Some(Banner::error("Failed to log in. Please check your credentials.")),
                next: None,
            },
        }
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn next_route(&self) -> Option<Route> {
        self.next
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Welcome Back\nSign in to track your product prices\n\n");
        out.push_str("  pricepulse login --email <EMAIL> --password <PASSWORD>\n");
        if let Some(banner) = &self.banner {
            out.push_str(&format!("\n{}\n", banner));
        }
        out.push_str("\nDon't have an account? pricepulse register\n");
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterView {
    banner: Option<Banner>,
    next: Option<Route>,
}

impl RegisterView {
    pub async fn submit(auth: &AuthGateway, email: &str, username: &str, password: &str) -> Self {
        match auth.register(email, username, password).await {
            Ok(_) => Self { banner: None, next: Some(Route::Dashboard) },
            Err(_) => Self {
                banner: Some(Banner::error("Failed to create an account. Please try again.")),
                next: None,
            },
        }
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn next_route(&self) -> Option<Route> {
        self.next
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Create Account\nStart tracking prices in minutes\n\n");
        out.push_str("  pricepulse register --email <EMAIL> --username <NAME> --password <PASSWORD>\n");
        if let Some(banner) = &self.banner {
            out.push_str(&format!("\n{}\n", banner));
        }
        out.push_str("\nAlready have an account? pricepulse login\n");
        out
    }
}
