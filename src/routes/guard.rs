// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Route guard for the authenticated part of the app.

use super::SIGN_IN_ROUTE;
use crate::state::{SessionStore, UserWatch};

/// What the navigator should do with a guarded route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the guarded subtree.
    Allow,
    /// Redirect to the given route.
    Redirect(&'static str),
}

/// Guards the authenticated subtree, re-evaluating whenever the session
/// changes.
pub struct RouteGuard {
    watch: UserWatch,
}

impl RouteGuard {
    /// Mount the guard, subscribing to session changes.
    pub fn mount(store: &SessionStore) -> Self {
        Self {
            watch: store.subscribe(),
        }
    }

    /// Decide for the current navigation.
    pub fn decide(&mut self) -> RouteDecision {
        Self::decision_for(self.watch.current().is_some())
    }

    /// Wait until the session changes, then decide again.
    ///
    /// Returns `None` once the store is gone.
    pub async fn next_decision(&mut self) -> Option<RouteDecision> {
        let user = self.watch.changed().await?;
        Some(Self::decision_for(user.is_some()))
    }

    fn decision_for(authenticated: bool) -> RouteDecision {
        if authenticated {
            RouteDecision::Allow
        } else {
            tracing::debug!(to = SIGN_IN_ROUTE, "No user, redirecting");
            RouteDecision::Redirect(SIGN_IN_ROUTE)
        }
    }
}
