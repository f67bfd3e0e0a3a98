//! Session Module
//!
//! Holds the bearer token and user profile for the running client and keeps
//! the token persisted across restarts.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn, error, debug};

use crate::models::User;
use crate::storage::{DurableStorage, StorageError, TOKEN_KEY};

/// Current authentication state of the client
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated {
        token: String,
        /// Filled in once `/users/me` has been fetched
        user: Option<User>,
    },
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::Authenticated { token, .. } => Some(token.as_str()),
            Session::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => user.as_ref(),
            Session::Anonymous => None,
        }
    }

    pub fn auth_state(&self) -> AuthState {
        match self {
            Session::Authenticated { .. } => AuthState::Authenticated,
            Session::Anonymous => AuthState::Anonymous,
        }
    }
}

/// What the route guard looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Anonymous,
    Authenticated,
}

/// Shared handle to the session, cloned into the API client, gateway and views
#[derive(Debug, Clone)]
pub struct SessionStore {
    session: Arc<Mutex<Session>>,
    storage: Arc<DurableStorage>,
}

impl SessionStore {
    /// Create an anonymous store backed by `storage`
    pub fn new(storage: DurableStorage) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session::Anonymous)),
            storage: Arc::new(storage),
        }
    }

    /// Create a store, rehydrating the token persisted by a previous run
    pub fn restore(storage: DurableStorage) -> Self {
        let store = Self::new(storage);

        match store.storage.load::<String>(TOKEN_KEY) {
            Ok(token) if !token.is_empty() => {
                info!("Restored stored session");
                store.update(|session| *session = Session::Authenticated { token, user: None });
            }
            Ok(_) | Err(StorageError::NotFound(_)) => {
                debug!("No stored session found");
            }
            Err(e) => {
                warn!("Ignoring unreadable stored session: {}", e);
            }
        }

        store
    }

    /// Snapshot of the current session
    pub fn get(&self) -> Session {
        self.lock().clone()
    }

    pub fn auth_state(&self) -> AuthState {
        self.lock().auth_state()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_state() == AuthState::Authenticated
    }

    /// Token to send as `Authorization: Bearer <token>`, if any
    pub fn bearer(&self) -> Option<String> {
        self.lock().token().map(str::to_string)
    }

    /// Store a new token, dropping any previously known profile
    pub fn set_token(&self, token: String) {
        if let Err(e) = self.storage.save(TOKEN_KEY, &token) {
            error!("Failed to save session: {}", e);
        }
        self.update(|session| *session = Session::Authenticated { token, user: None });
    }

    /// Attach the profile to the held token; refused when anonymous
    pub fn set_user(&self, user: User) -> bool {
        self.update(|session| match session {
            Session::Authenticated { user: slot, .. } => {
                info!("Session set for user: {}", user.id);
                *slot = Some(user);
                true
            }
            Session::Anonymous => {
                warn!("Refusing to set user without a token");
                false
            }
        })
    }

    /// Forget token and profile, in memory and on disk
    pub fn clear(&self) {
        self.update(|session| *session = Session::Anonymous);
        if let Err(e) = self.storage.delete(TOKEN_KEY) {
            error!("Failed to delete stored session: {}", e);
        }
        info!("Session cleared");
    }

    // Every mutation goes through here.
    fn update<R>(&self, f: impl FnOnce(&mut Session) -> R) -> R {
        f(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
