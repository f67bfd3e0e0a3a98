//! App Module
//!
//! Composition root: opens a route, applies the guard, loads the page.

use tracing::{debug, warn};

use crate::routes::{guard, Navigation, Route, RouteError};
use crate::views::{
    render_navbar, DashboardView, HistoryView, HomeView, LoginView, RegisterView, TrackerView,
};
use crate::AppState;

/// A loaded view
#[derive(Debug, Clone)]
pub enum Page {
    Home(HomeView),
    Login(LoginView),
    Register(RegisterView),
    Dashboard(DashboardView),
    Tracker(TrackerView),
    History(HistoryView),
}

impl Page {
    pub fn render(&self) -> String {
        match self {
            Page::Home(view) => view.render(),
            Page::Login(view) => view.render(),
            Page::Register(view) => view.render(),
            Page::Dashboard(view) => view.render(),
            Page::Tracker(view) => view.render(),
            Page::History(view) => view.render(),
        }
    }
}

/// What ends up on screen after navigation
#[derive(Debug, Clone)]
pub struct Screen {
    /// Route actually shown
    pub route: Route,
    /// Set when the guard sent the user elsewhere
    pub redirected_from: Option<Route>,
    pub page: Page,
    navbar: String,
}

impl Screen {
    pub fn render(&self) -> String {
        let mut out = self.navbar.clone();
        out.push('\n');
        if let Some(from) = self.redirected_from {
            out.push_str(&format!("Please log in to view {}\n\n", from));
        }
        out.push_str(&self.page.render());
        out
    }
}

/// Navigate to `route`, loading whatever the guard lets through
pub async fn open(state: &AppState, route: Route) -> Screen {
    let (shown, redirected_from) = match guard(route, state.session.auth_state()) {
        Navigation::Render(route) => (route, None),
        Navigation::Redirect(target) => {
            warn!("Redirecting {} to {}", route, target);
            (target, Some(route))
        }
    };

    debug!("Opening {}", shown);
    let page = load(state, shown).await;

    Screen {
        route: shown,
        redirected_from,
        page,
        navbar: render_navbar(&state.session.get()),
    }
}

/// Parse `path` and navigate to it
pub async fn open_path(state: &AppState, path: &str) -> Result<Screen, RouteError> {
    let route = path.parse::<Route>()?;
    Ok(open(state, route).await)
}

async fn load(state: &AppState, route: Route) -> Page {
    match route {
        Route::Home => Page::Home(HomeView),
        Route::Login => Page::Login(LoginView::default()),
        Route::Register => Page::Register(RegisterView::default()),
        Route::Dashboard => Page::Dashboard(DashboardView::load(&state.api).await),
        Route::Track => Page::Tracker(TrackerView::default()),
        Route::History(id) => Page::History(HistoryView::load(&state.api, id).await),
    }
}
