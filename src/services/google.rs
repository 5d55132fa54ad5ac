// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Google sign-in adapter.
//!
//! Wraps the platform Google Sign-In SDK and turns its result into a
//! [`GoogleIdentity`]. No session state is touched here.

use crate::error::{AuthError, Result};
use crate::models::{GoogleIdentity, ProviderProfile};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Configuration handed to the SDK before the first sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleSignInConfig {
    pub scopes: Vec<String>,
    pub web_client_id: String,
    pub ios_client_id: String,
}

/// Payload returned by an interactive Google sign-in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoogleSignInPayload {
    pub id_token: Option<String>,
    pub server_auth_code: Option<String>,
    pub user: Option<ProviderProfile>,
}

/// Platform Google Sign-In SDK.
#[async_trait]
pub trait GoogleSignInSdk: Send + Sync {
    /// Apply client ids and scopes.
    async fn configure(&self, config: &GoogleSignInConfig) -> anyhow::Result<()>;

    /// Fail if Google Play services (or the platform equivalent) are missing.
    async fn check_availability(&self) -> anyhow::Result<()>;

    /// Show the interactive sign-in UI. `None` means no user info came back.
    async fn interactive_sign_in(&self) -> anyhow::Result<Option<GoogleSignInPayload>>;
}

/// Acquires a Google identity assertion.
pub struct GoogleAdapter {
    sdk: Arc<dyn GoogleSignInSdk>,
    config: GoogleSignInConfig,
    configured: OnceCell<()>,
}

impl GoogleAdapter {
    pub fn new(sdk: Arc<dyn GoogleSignInSdk>, config: GoogleSignInConfig) -> Self {
        Self {
            sdk,
            config,
            configured: OnceCell::new(),
        }
    }

    /// Run the interactive flow and require an ID token in the result.
    pub async fn acquire(&self) -> Result<GoogleIdentity> {
        self.configured
            .get_or_try_init(|| async { self.sdk.configure(&self.config).await })
            .await
            .map_err(|e| AuthError::IdentityUnavailable(format!("configure failed: {e}")))?;

        self.sdk
            .check_availability()
            .await
            .map_err(|e| AuthError::IdentityUnavailable(format!("services unavailable: {e}")))?;

        let payload = self
            .sdk
            .interactive_sign_in()
            .await
            .map_err(|e| AuthError::IdentityUnavailable(format!("sign-in failed: {e}")))?
            .ok_or_else(|| {
                tracing::info!("Google sign-in returned no user info");
                AuthError::IdentityUnavailable("no user info returned".to_string())
            })?;

        let id_token = payload
            .id_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError::IdentityUnavailable("no ID token present".to_string()))?;

        let server_auth_code = payload.server_auth_code.filter(|code| !code.is_empty());

        tracing::debug!(
            has_server_auth_code = server_auth_code.is_some(),
            "Google identity acquired"
        );

        Ok(GoogleIdentity {
            id_token,
            server_auth_code,
            profile: payload.user,
        })
    }
}
