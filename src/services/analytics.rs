// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Analytics collaborator and screen naming.

use serde_json::{Map, Value};

/// Authentication events reported to analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyticsEvent {
    GoogleSignUp,
    GoogleSignIn,
    AppleSignUp,
    AppleSignIn,
}

impl AnalyticsEvent {
    pub fn name(&self) -> &'static str {
        match self {
            AnalyticsEvent::GoogleSignUp => "google_sign_up",
            AnalyticsEvent::GoogleSignIn => "google_sign_in",
            AnalyticsEvent::AppleSignUp => "apple_sign_up",
            AnalyticsEvent::AppleSignIn => "apple_sign_in",
        }
    }
}

/// Analytics sink. Calls hand events off to the transport and never fail.
pub trait Analytics: Send + Sync {
    /// Associate subsequent events with a user.
    fn identify(&self, user_id: &str, email: &str, first_name: &str, last_name: &str);

    /// Record a screen view.
    fn track_screen_view(&self, screen_name: &str, properties: &Map<String, Value>);

    /// Record an authentication event.
    fn track_event(&self, event: AnalyticsEvent);
}

/// Analytics sink that writes events to the tracing log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn identify(&self, user_id: &str, email: &str, first_name: &str, last_name: &str) {
        tracing::info!(
            target: "analytics",
            user_id,
            email,
            first_name,
            last_name,
            "identify"
        );
    }

    fn track_screen_view(&self, screen_name: &str, properties: &Map<String, Value>) {
        tracing::info!(
            target: "analytics",
            screen = screen_name,
            properties = %serde_json::Value::Object(properties.clone()),
            "screen_view"
        );
    }

    fn track_event(&self, event: AnalyticsEvent) {
        tracing::info!(target: "analytics", event = event.name(), "event");
    }
}

/// Convert a router path into the screen name reported to analytics.
///
/// A trailing slash is dropped (except for the root path) and known paths
/// get a readable name.
pub fn screen_name_for_path(path: &str) -> String {
    let cleaned = match path.strip_suffix('/') {
        Some(stripped) if path.len() > 1 => stripped,
        _ => path,
    };

    match cleaned {
        "/auth" => "Auth Home".to_string(),
        other => other.to_string(),
    }
}
