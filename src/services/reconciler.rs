// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session reconciler: provider identity → backend session → stored user.
//!
//! Steps within one attempt run strictly in order (exchange, optional
//! backend registration, commit). The session store is never written
//! before the exchange succeeds, and a failure at any step leaves it
//! untouched.

use crate::error::{AuthError, Result, SignInOutcome};
use crate::models::{BackendSession, CandidateIdentity, Provider, ProviderOutcome, User};
use crate::services::api::AppBackend;
use crate::services::apple::AppleAdapter;
use crate::services::google::GoogleAdapter;
use crate::services::supabase::SessionBackend;
use crate::state::SessionStore;
use crate::strings::split_name;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;

/// Converts candidate identities into a committed user.
pub struct SessionReconciler {
    google: GoogleAdapter,
    apple: AppleAdapter,
    backend: Arc<dyn SessionBackend>,
    app_backend: Arc<dyn AppBackend>,
    store: Arc<SessionStore>,
    /// Providers with a sign-in attempt currently running.
    in_flight: DashMap<Provider, ()>,
}

/// Releases the in-flight marker when the attempt ends.
struct InFlightGuard<'a> {
    in_flight: &'a DashMap<Provider, ()>,
    provider: Provider,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.remove(&self.provider);
    }
}

impl SessionReconciler {
    pub fn new(
        google: GoogleAdapter,
        apple: AppleAdapter,
        backend: Arc<dyn SessionBackend>,
        app_backend: Arc<dyn AppBackend>,
        store: Arc<SessionStore>,
    ) -> Self {
        Self {
            google,
            apple,
            backend,
            app_backend,
            store,
            in_flight: DashMap::new(),
        }
    }

    /// Whether a sign-in attempt for `provider` is currently running.
    pub fn is_in_flight(&self, provider: Provider) -> bool {
        self.in_flight.contains_key(&provider)
    }

    /// Sign in with Google.
    ///
    /// When the provider returns a server auth code it is registered with
    /// the application backend before the user is committed. If that
    /// registration or the commit fails the freshly exchanged session is
    /// signed out and nothing is committed.
    pub async fn sign_in_with_google(&self) -> Result<SignInOutcome> {
        let _guard = self.begin(Provider::Google)?;

        let identity = self.google.acquire().await?;
        let server_auth_code = identity.server_auth_code.clone();
        let session = self.exchange(&CandidateIdentity::Google(identity)).await?;

        if let Some(code) = server_auth_code.as_deref() {
            if let Err(e) = self.app_backend.register_google_auth_code(code).await {
                tracing::warn!(error = %e, "Backend registration failed, rolling back session");
                self.roll_back().await;
                return Err(e);
            }
        }

        let full_name = session.user.user_metadata.full_name.as_deref().unwrap_or("");
        let (first_name, last_name) = split_name(full_name);

        let user = User {
            id: session.user.id.clone(),
            email: Some(session.user.email.clone().unwrap_or_default()),
            first_name: Some(first_name),
            last_name: Some(last_name),
            avatar_url: Some(session.user.user_metadata.avatar_url.clone().unwrap_or_default()),
        };

        self.commit(Provider::Google, user).await
    }

    /// Sign in with Apple.
    ///
    /// Dismissing Apple's sheet yields [`SignInOutcome::Cancelled`].
    pub async fn sign_in_with_apple(&self) -> Result<SignInOutcome> {
        let _guard = self.begin(Provider::Apple)?;

        let identity = match self.apple.acquire().await? {
            ProviderOutcome::Acquired(identity) => identity,
            ProviderOutcome::Cancelled => return Ok(SignInOutcome::Cancelled),
        };

        let session = self.exchange(&CandidateIdentity::Apple(identity)).await?;

        // Apple names are not decomposed; only backend fields are used
        let user = User {
            id: session.user.id.clone(),
            email: Some(session.user.email.clone().unwrap_or_default()),
            first_name: None,
            last_name: None,
            avatar_url: Some(session.user.user_metadata.avatar_url.clone().unwrap_or_default()),
        };

        self.commit(Provider::Apple, user).await
    }

    fn begin(&self, provider: Provider) -> Result<InFlightGuard<'_>> {
        match self.in_flight.entry(provider) {
            Entry::Occupied(_) => {
                tracing::warn!(%provider, "Rejecting concurrent sign-in attempt");
                Err(AuthError::SignInInProgress(provider))
            }
            Entry::Vacant(slot) => {
                slot.insert(());
                Ok(InFlightGuard {
                    in_flight: &self.in_flight,
                    provider,
                })
            }
        }
    }

    async fn exchange(&self, identity: &CandidateIdentity) -> Result<BackendSession> {
        let provider = identity.provider();

        self.backend
            .exchange_identity_token(provider, identity.token())
            .await
            .map_err(|e| match e {
                AuthError::SessionExchangeFailed(_) => e,
                other => AuthError::SessionExchangeFailed(other.to_string()),
            })
    }

    /// Commit `user`, signing the exchanged session out again on failure.
    async fn commit(&self, provider: Provider, user: User) -> Result<SignInOutcome> {
        if let Err(e) = self.store.sign_in(user.clone()).await {
            tracing::warn!(%provider, error = %e, kind = e.kind(), "Commit failed, rolling back session");
            self.roll_back().await;
            return Err(e);
        }
        tracing::info!(%provider, user_id = %user.id, "Sign-in complete");
        Ok(SignInOutcome::Success(user))
    }

    async fn roll_back(&self) {
        if let Err(e) = self.backend.sign_out().await {
            tracing::warn!(error = %e, "Failed to roll back backend session");
        }
    }
}
