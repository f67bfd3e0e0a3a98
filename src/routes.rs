//! Routes Module
//!
//! Route table and the guard that keeps anonymous users out of protected views.

use std::fmt;
use std::str::FromStr;

use crate::models::ProductId;
use crate::session::AuthState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Track,
    History(ProductId),
}

impl Route {
    pub const PUBLIC: [Route; 3] = [Route::Home, Route::Login, Route::Register];

    /// Whether the route is only shown to authenticated users
    pub fn requires_auth(&self) -> bool {
        matches!(self, Route::Dashboard | Route::Track | Route::History(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::Dashboard => write!(f, "/dashboard"),
            Route::Track => write!(f, "/track"),
            Route::History(id) => write!(f, "/history/{}", id),
        }
    }
}

impl FromStr for Route {
    type Err = RouteError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            p => p,
        };

        match normalized {
            "/" => Ok(Route::Home),
            "/login" => Ok(Route::Login),
            "/register" => Ok(Route::Register),
            "/dashboard" => Ok(Route::Dashboard),
            "/track" => Ok(Route::Track),
            p => p
                .strip_prefix("/history/")
                .and_then(|id| id.parse::<ProductId>().ok())
                .map(Route::History)
                .ok_or_else(|| RouteError::NotFound(trimmed.to_string())),
        }
    }
}

/// Outcome of guarding a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// Render protected routes only when a token is held, otherwise send to login
pub fn guard(route: Route, auth: AuthState) -> Navigation {
    match (route.requires_auth(), auth) {
        (true, AuthState::Anonymous) => Navigation::Redirect(Route::Login),
        _ => Navigation::Render(route),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("No page at {0}")]
    NotFound(String),
}
