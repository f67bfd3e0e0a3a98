//! Navbar Component

use crate::session::Session;

/// Top bar: links depend on whether a token is held
pub fn render_navbar(session: &Session) -> String {
    match session {
        Session::Anonymous => "PricePulse | login  register\n".to_string(),
        Session::Authenticated { user, .. } => {
            let who = user
                .as_ref()
                .map(|u| format!(" ({})", u.username))
                .unwrap_or_default();
            format!("PricePulse | dashboard  track  logout{}\n", who)
        }
    }
}
