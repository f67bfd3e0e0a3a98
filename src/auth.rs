//! Authentication Module
//!
//! Login, registration and logout against the remote API. The gateway is the
//! only component that writes a token into the session.

use tracing::{info, warn, error};

use crate::api::{ApiClient, ApiError};
use crate::models::{RegisterRequest, User};
use crate::session::SessionStore;

/// Wraps the authentication endpoints and keeps the session in step with them
#[derive(Debug, Clone)]
pub struct AuthGateway {
    api: ApiClient,
    session: SessionStore,
}

impl AuthGateway {
    pub fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Obtain a token, then load the profile that goes with it
    ///
    /// On any failure the session is left anonymous.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        info!("Logging in");

        let token = match self.api.request_token(email, password).await {
            Ok(response) => response.access_token,
            Err(e) => {
                error!("Login error: {}", e);
                return Err(AuthError::login(&e));
            }
        };

        self.session.set_token(token);

        match self.api.current_user().await {
            Ok(user) => {
                self.session.set_user(user.clone());
                Ok(user)
            }
            Err(e) => {
                error!("Profile fetch after login failed: {}", e);
                self.session.clear();
                Err(AuthError::login(&e))
            }
        }
    }

    /// Create an account and log straight into it
    pub async fn register(&self, email: &str, username: &str, password: &str) -> Result<User, AuthError> {
        let request = RegisterRequest { email, username, password };

        if let Err(e) = self.api.register(&request).await {
            error!("Registration error: {}", e);
            return Err(AuthError::registration(&e));
        }

        info!("Account created, logging in");
        self.login(email, password).await
    }

    /// Load the profile for a token restored from storage
    pub async fn refresh_user(&self) -> Result<User, AuthError> {
        if !self.session.is_authenticated() {
            return Err(AuthError::NotLoggedIn);
        }

        let user = self.api.current_user().await.map_err(|e| {
            warn!("Could not load profile: {}", e);
            AuthError::Profile(e.to_string())
        })?;
        self.session.set_user(user.clone());
        Ok(user)
    }

    pub fn logout(&self) {
        info!("Logging out");
        self.session.clear();
    }
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Login(String),

    #[error("{0}")]
    Registration(String),

    #[error("Failed to load profile: {0}")]
    Profile(String),

    #[error("Not logged in")]
    NotLoggedIn,
}

impl AuthError {
    fn login(e: &ApiError) -> Self {
        AuthError::Login(e.detail().unwrap_or("Login failed").to_string())
    }

    fn registration(e: &ApiError) -> Self {
        AuthError::Registration(e.detail().unwrap_or("Registration failed").to_string())
    }
}
