// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Screen view tracking and analytics identification.

use crate::services::analytics::{screen_name_for_path, Analytics};
use crate::state::SessionStore;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Reports screen transitions for one mounted layout.
pub struct ScreenTracker {
    analytics: Arc<dyn Analytics>,
    /// Present for layouts that only track signed-in users.
    store: Option<Arc<SessionStore>>,
    identified: bool,
    last_screen: Option<(String, Map<String, Value>)>,
}

impl ScreenTracker {
    /// Tracker for the authenticated app layout.
    pub fn for_app(store: Arc<SessionStore>, analytics: Arc<dyn Analytics>) -> Self {
        Self {
            analytics,
            store: Some(store),
            identified: false,
            last_screen: None,
        }
    }

    /// Tracker for the auth layout, which tracks without a user.
    pub fn for_auth(analytics: Arc<dyn Analytics>) -> Self {
        Self {
            analytics,
            store: None,
            identified: false,
            last_screen: None,
        }
    }

    /// Identify the signed-in user. Runs at most once per mount.
    pub fn on_mount(&mut self) {
        if self.identified {
            return;
        }

        let Some(user) = self.store.as_ref().and_then(|s| s.peek_current_user()) else {
            return;
        };

        self.analytics.identify(
            &user.id,
            user.email.as_deref().unwrap_or_default(),
            user.first_name.as_deref().unwrap_or_default(),
            user.last_name.as_deref().unwrap_or_default(),
        );
        self.identified = true;
    }

    /// Record a screen transition. Repeats of the same path and params are
    /// ignored.
    pub fn on_screen(&mut self, path: &str, params: &Map<String, Value>) {
        if let Some(store) = &self.store {
            if !store.is_authenticated() {
                return;
            }
        }

        if self
            .last_screen
            .as_ref()
            .is_some_and(|(last_path, last_params)| last_path == path && last_params == params)
        {
            return;
        }

        self.analytics
            .track_screen_view(&screen_name_for_path(path), params);
        self.last_screen = Some((path.to_string(), params.clone()));
    }
}
