// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session backend client (Supabase GoTrue).
//!
//! Handles:
//! - Exchanging provider ID tokens for a backend session
//! - Keeping the current session in memory and in local storage
//! - Signing out (revoking the session on the backend)

use crate::config::Config;
use crate::db::{keys, KeyValueStore};
use crate::error::{AuthError, Result};
use crate::models::{BackendSession, Provider, SessionUser};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Session-store backend.
#[async_trait]
pub trait SessionBackend: Send + Sync {
    /// Trade a provider token for a backend session.
    async fn exchange_identity_token(&self, provider: Provider, token: &str)
        -> Result<BackendSession>;

    /// The current backend session, if signed in.
    async fn current_session(&self) -> Result<Option<BackendSession>>;

    /// Invalidate the current backend session.
    async fn sign_out(&self) -> Result<()>;
}

/// GoTrue REST client.
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    kv: Arc<dyn KeyValueStore>,
    session: RwLock<Option<BackendSession>>,
}

impl SupabaseClient {
    /// Create a client and restore any session persisted by a previous run.
    pub async fn restore(config: &Config, kv: Arc<dyn KeyValueStore>) -> Result<Self> {
        let session = match kv.get(keys::BACKEND_SESSION).await? {
            Some(bytes) => match serde_json::from_slice::<BackendSession>(&bytes) {
                Ok(session) => Some(session),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable persisted backend session");
                    None
                }
            },
            None => None,
        };

        if let Some(session) = &session {
            if session.is_expired_at(chrono::Utc::now()) {
                tracing::warn!(user_id = %session.user.id, "Restored backend session has expired");
            }
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            anon_key: config.supabase_anon_key.clone(),
            kv,
            session: RwLock::new(session),
        })
    }

    async fn persist(&self, session: Option<&BackendSession>) -> Result<()> {
        match session {
            Some(session) => {
                let bytes = serde_json::to_vec(session)?;
                self.kv.set(keys::BACKEND_SESSION, &bytes).await?;
            }
            None => self.kv.remove(keys::BACKEND_SESSION).await?,
        }
        Ok(())
    }

    /// Extract an error description from a GoTrue error body.
    fn error_message(status: reqwest::StatusCode, body: &str) -> String {
        #[derive(Deserialize)]
        struct ErrorBody {
            error_description: Option<String>,
            msg: Option<String>,
            message: Option<String>,
        }

        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error_description.or(b.msg).or(b.message))
            .unwrap_or_else(|| body.to_string());

        format!("HTTP {status}: {detail}")
    }
}

/// Token grant response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_at: Option<i64>,
    #[serde(default)]
    user: Option<SessionUser>,
}

#[async_trait]
impl SessionBackend for SupabaseClient {
    async fn exchange_identity_token(
        &self,
        provider: Provider,
        token: &str,
    ) -> Result<BackendSession> {
        let url = format!("{}/auth/v1/token?grant_type=id_token", self.base_url);

        let body = serde_json::json!({
            "provider": provider.as_str(),
            "id_token": token,
        });

        let response = self
            .http
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthError::SessionExchangeFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%provider, %status, "Session backend rejected identity token");
            return Err(AuthError::SessionExchangeFailed(Self::error_message(
                status, &body,
            )));
        }

        let grant: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::SessionExchangeFailed(format!("JSON parse error: {e}")))?;

        let user = grant
            .user
            .ok_or_else(|| AuthError::SessionExchangeFailed("no user returned".to_string()))?;

        let session = BackendSession {
            access_token: grant.access_token,
            refresh_token: grant.refresh_token,
            expires_at: grant.expires_at,
            user,
        };

        self.persist(Some(&session)).await?;
        *self.session.write().await = Some(session.clone());

        tracing::info!(%provider, user_id = %session.user.id, "Backend session established");
        Ok(session)
    }

    async fn current_session(&self) -> Result<Option<BackendSession>> {
        Ok(self.session.read().await.clone())
    }

    async fn sign_out(&self) -> Result<()> {
        let mut slot = self.session.write().await;
        let Some(session) = slot.clone() else {
            return Ok(());
        };

        // Local tokens go first; a failed revoke must not resurrect them
        self.persist(None).await?;
        *slot = None;
        drop(slot);

        let response = self
            .http
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await
            .map_err(|e| AuthError::Http(format!("Logout request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Http(Self::error_message(status, &body)));
        }

        tracing::info!(user_id = %session.user.id, "Backend session revoked");
        Ok(())
    }
}
