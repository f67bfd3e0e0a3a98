//! View Layer
//!
//! Each view fetches its own data when it is opened and renders to plain text.
//! Failures become a banner on the view; nothing is retried.

pub mod chart;
pub mod dashboard;
pub mod history;
pub mod home;
pub mod login;
pub mod navbar;
pub mod tracker;

use std::fmt;

pub use dashboard::DashboardView;
pub use history::HistoryView;
pub use home::HomeView;
pub use login::{LoginView, RegisterView};
pub use navbar::render_navbar;
pub use tracker::{TrackerForm, TrackerView};

/// Flat message shown at the top of a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Error(String),
    Success(String),
}

impl Banner {
    pub fn error(message: impl Into<String>) -> Self {
        Banner::Error(message.into())
    }

    pub fn success(message: impl Into<String>) -> Self {
        Banner::Success(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Banner::Error(_))
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Banner::Error(m) => write!(f, "[error] {}", m),
            Banner::Success(m) => write!(f, "[ok] {}", m),
        }
    }
}

pub(crate) fn format_price(price: f64) -> String {
    format!("₹{:.2}", price)
}
