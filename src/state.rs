// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store: the single source of truth for "who is logged in".
//!
//! Holds zero or one [`User`]. Every write is mirrored to the key-value
//! layer under `authState` and restored by [`SessionStore::restore`] before
//! any read is served.

use crate::db::{keys, KeyValueStore};
use crate::error::{AuthError, Result};
use crate::models::User;
use crate::services::{Analytics, SessionBackend};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use validator::Validate;

/// Document persisted under the `authState` key.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedAuthState {
    #[serde(default)]
    user: Option<User>,
}

/// Subscription to session changes.
///
/// Dropping the value unsubscribes.
pub struct UserWatch {
    rx: watch::Receiver<Option<User>>,
}

impl UserWatch {
    /// Current value, marking it as seen.
    pub fn current(&mut self) -> Option<User> {
        self.rx.borrow_and_update().clone()
    }

    /// Whether the user changed since the last [`current`](Self::current)
    /// or [`changed`](Self::changed) call.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Wait for the next change and return the new value.
    ///
    /// Returns `None` once the store has been dropped.
    pub async fn changed(&mut self) -> Option<Option<User>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

/// Process-wide holder of the signed-in user.
pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    analytics: Arc<dyn Analytics>,
    backend: Arc<dyn SessionBackend>,
    user_tx: watch::Sender<Option<User>>,
    /// Serializes writes so the persisted value matches the published one.
    write_lock: Mutex<()>,
}

impl SessionStore {
    /// Construct the store, restoring the last committed user.
    ///
    /// Unreadable persisted data is discarded and treated as signed out.
    pub async fn restore(
        kv: Arc<dyn KeyValueStore>,
        analytics: Arc<dyn Analytics>,
        backend: Arc<dyn SessionBackend>,
    ) -> Result<Self> {
        let persisted = match kv.get(keys::AUTH_STATE).await? {
            Some(bytes) => serde_json::from_slice::<PersistedAuthState>(&bytes)
                .unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "Discarding unreadable persisted auth state");
                    PersistedAuthState::default()
                }),
            None => PersistedAuthState::default(),
        };

        tracing::info!(
            user_id = persisted.user.as_ref().map(|u| u.id.as_str()).unwrap_or("<none>"),
            "Auth state restored"
        );

        let (user_tx, _) = watch::channel(persisted.user);

        Ok(Self {
            kv,
            analytics,
            backend,
            user_tx,
            write_lock: Mutex::new(()),
        })
    }

    // ─── Reads ───────────────────────────────────────────────────

    /// Reactive read: the current user plus a subscription to later changes.
    pub fn get_current_user(&self) -> (Option<User>, UserWatch) {
        let mut watch = self.subscribe();
        let current = watch.current();
        (current, watch)
    }

    /// Subscribe to session changes without reading.
    pub fn subscribe(&self) -> UserWatch {
        UserWatch {
            rx: self.user_tx.subscribe(),
        }
    }

    /// Snapshot read: the current user, without subscribing.
    pub fn peek_current_user(&self) -> Option<User> {
        self.user_tx.borrow().clone()
    }

    /// Snapshot of the current user's avatar URL.
    pub fn avatar_url(&self) -> Option<String> {
        self.user_tx
            .borrow()
            .as_ref()
            .and_then(|user| user.avatar_url.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_tx.borrow().is_some()
    }

    // ─── Writes ──────────────────────────────────────────────────

    /// Commit `user` as the signed-in user and identify it to analytics.
    pub async fn sign_in(&self, user: User) -> Result<()> {
        user.validate()
            .map_err(|e| AuthError::InvalidUser(e.to_string()))?;

        let _guard = self.write_lock.lock().await;
        self.persist(Some(&user)).await?;

        self.analytics.identify(
            &user.id,
            user.email.as_deref().unwrap_or_default(),
            user.first_name.as_deref().unwrap_or_default(),
            user.last_name.as_deref().unwrap_or_default(),
        );

        tracing::info!(user_id = %user.id, "User signed in");
        self.user_tx.send_replace(Some(user));
        Ok(())
    }

    /// Clear the signed-in user and invalidate the backend session.
    ///
    /// Backend invalidation is best effort: the local user is cleared even
    /// when it fails.
    pub async fn sign_out(&self) -> Result<()> {
        {
            let _guard = self.write_lock.lock().await;
            self.persist(None).await?;
            let previous = self.user_tx.send_replace(None);

            tracing::info!(
                user_id = previous.as_ref().map(|u| u.id.as_str()).unwrap_or("<none>"),
                "User signed out"
            );
        }

        if let Err(e) = self.backend.sign_out().await {
            tracing::warn!(error = %e, "Failed to invalidate backend session");
        }

        Ok(())
    }

    async fn persist(&self, user: Option<&User>) -> Result<()> {
        let state = PersistedAuthState {
            user: user.cloned(),
        };
        let bytes = serde_json::to_vec(&state)?;
        self.kv.set(keys::AUTH_STATE, &bytes).await?;
        Ok(())
    }
}
