//! Commands Module
//!
//! One handler per CLI action. Each returns the text to print; failures of
//! remote calls are already folded into the rendered views.

use tracing::{info, debug};

use crate::app::{self, Screen};
use crate::routes::{guard, Navigation, Route, RouteError};
use crate::views::{LoginView, RegisterView, TrackerForm, TrackerView, DashboardView, render_navbar};
use crate::models::ProductId;
use crate::AppState;

/// Open a page by path
pub async fn open(state: &AppState, path: &str) -> Result<String, RouteError> {
    Ok(app::open_path(state, path).await?.render())
}

/// Log in, then show the dashboard
pub async fn login(state: &AppState, email: &str, password: &str) -> String {
    let view = LoginView::submit(&state.auth, email, password).await;
    follow(state, view.next_route(), || view.render()).await
}

/// Register, then show the dashboard
pub async fn register(state: &AppState, email: &str, username: &str, password: &str) -> String {
    let view = RegisterView::submit(&state.auth, email, username, password).await;
    follow(state, view.next_route(), || view.render()).await
}

pub async fn logout(state: &AppState) -> String {
    state.auth.logout();
    let mut out = String::from("Logged out.\n\n");
    out.push_str(&app::open(state, Route::Home).await.render());
    out
}

/// Describe the current session, fetching the profile for a restored token
pub async fn whoami(state: &AppState) -> String {
    if !state.session.is_authenticated() {
        return "Not logged in.\n".to_string();
    }

    if state.session.get().user().is_none() {
        debug!("Fetching profile for restored session");
        if let Err(e) = state.auth.refresh_user().await {
            return format!("{}[error] {}\n", render_navbar(&state.session.get()), e);
        }
    }

    let session = state.session.get();
    match session.user() {
        Some(user) => format!(
            "{}Logged in as {} <{}>{}\n",
            render_navbar(&session),
            user.username,
            user.email,
            if user.is_active { "" } else { " (inactive)" }
        ),
        None => "Not logged in.\n".to_string(),
    }
}

pub async fn dashboard(state: &AppState) -> String {
    app::open(state, Route::Dashboard).await.render()
}

pub async fn history(state: &AppState, id: ProductId) -> String {
    app::open(state, Route::History(id)).await.render()
}

/// Stop tracking `id` and show the updated dashboard
pub async fn delete_product(state: &AppState, id: ProductId) -> String {
    if let Some(redirect) = require_auth(state, Route::Dashboard).await {
        return redirect.render();
    }

    let mut view = DashboardView::load(&state.api).await;
    if view.banner().is_none() {
        view.delete(&state.api, id).await;
    }
    format!("{}\n{}", render_navbar(&state.session.get()), view.render())
}

/// Submit a product to track, then show its history
pub async fn track(state: &AppState, form: TrackerForm) -> String {
    if let Some(redirect) = require_auth(state, Route::Track).await {
        return redirect.render();
    }

    let mut view = TrackerView::with_form(form);
    view.submit(&state.api).await;

    match view.next_route() {
        Some(next) => {
            info!("Showing {}", next);
            let banner = view.banner().map(|b| format!("{}\n\n", b)).unwrap_or_default();
            format!("{}{}", banner, app::open(state, next).await.render())
        }
        None => format!("{}\n{}", render_navbar(&state.session.get()), view.render()),
    }
}

/// The login screen when `route` is not available to the current session
async fn require_auth(state: &AppState, route: Route) -> Option<Screen> {
    match guard(route, state.session.auth_state()) {
        Navigation::Render(_) => None,
        Navigation::Redirect(_) => Some(app::open(state, route).await),
    }
}

async fn follow(state: &AppState, next: Option<Route>, fallback: impl FnOnce() -> String) -> String {
    match next {
        Some(route) => app::open(state, route).await.render(),
        None => format!("{}\n{}", render_navbar(&state.session.get()), fallback()),
    }
}
