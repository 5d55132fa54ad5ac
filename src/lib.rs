// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! App-Session: authentication session lifecycle for the mobile app.
//!
//! This crate acquires identities from Google and Apple sign-in, reconciles
//! them with a backend session, persists the signed-in user locally, and
//! exposes that user to the rest of the application.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod strings;

use config::Config;
use db::{FileKvStore, KeyValueStore};
use services::{
    Analytics, AppleAdapter, AppleSignInSdk, ApiClient, GoogleAdapter, GoogleSignInSdk,
    SessionBackend, SessionReconciler, SupabaseClient,
};
use state::SessionStore;
use std::sync::Arc;

/// Shared authentication context, built once at startup.
///
/// Construction restores the persisted session, so every read served
/// afterwards reflects the last write from a previous run.
pub struct AuthContext {
    pub config: Config,
    pub store: Arc<SessionStore>,
    pub reconciler: Arc<SessionReconciler>,
    pub api: Arc<ApiClient>,
    pub analytics: Arc<dyn Analytics>,
}

impl AuthContext {
    /// Build the context from configuration and the platform SDK bindings.
    pub async fn init(
        config: Config,
        google_sdk: Arc<dyn GoogleSignInSdk>,
        apple_sdk: Arc<dyn AppleSignInSdk>,
        analytics: Arc<dyn Analytics>,
    ) -> error::Result<Self> {
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileKvStore::open(&config.state_dir).await?);
        let backend: Arc<dyn SessionBackend> =
            Arc::new(SupabaseClient::restore(&config, kv.clone()).await?);

        let store =
            Arc::new(SessionStore::restore(kv, analytics.clone(), backend.clone()).await?);
        let api = Arc::new(ApiClient::new(&config.api_base_url, backend.clone()));

        let reconciler = Arc::new(SessionReconciler::new(
            GoogleAdapter::new(google_sdk, config.google_sign_in_config()),
            AppleAdapter::new(apple_sdk),
            backend,
            api.clone(),
            store.clone(),
        ));

        tracing::info!(
            authenticated = store.is_authenticated(),
            "Auth context initialized"
        );

        Ok(Self {
            config,
            store,
            reconciler,
            api,
            analytics,
        })
    }
}
