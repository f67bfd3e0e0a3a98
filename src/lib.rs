//! PricePulse Client Library
//!
//! Core modules for the PricePulse terminal client.

pub mod api;
pub mod app;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod models;
pub mod routes;
pub mod session;
pub mod storage;
pub mod views;

#[cfg(test)]
mod test_support;

use std::time::Duration;

use api::{ApiClient, ApiError};
use auth::AuthGateway;
use config::Config;
use session::SessionStore;
use storage::DurableStorage;

/// Application state shared across commands
#[derive(Debug, Clone)]
pub struct AppState {
    pub session: SessionStore,
    pub api: ApiClient,
    pub auth: AuthGateway,
}

impl AppState {
    /// Wire the session, API client and gateway together, restoring any stored token
    pub fn build(api_base_url: &str, timeout: Duration, storage: DurableStorage) -> Result<Self, ApiError> {
        let session = SessionStore::restore(storage);
        let api = ApiClient::new(api_base_url, timeout, session.clone())?;
        let auth = AuthGateway::new(api.clone(), session.clone());

        Ok(Self { session, api, auth })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::build(
            &config.api.base_url,
            config.api.request_timeout(),
            DurableStorage::new(&config.storage.data_dir),
        )
    }
}
