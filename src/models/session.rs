// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session backend models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// External identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Apple,
}

impl Provider {
    /// Provider tag understood by the session backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Apple => "apple",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session issued by the session backend after a token exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token expiry (Unix timestamp)
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

impl BackendSession {
    /// Access token expiry as a UTC timestamp, if the backend reported one.
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        self.expires_at
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
    }

    /// Whether the access token has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at_utc().is_some_and(|expiry| expiry <= now)
    }
}

/// User as reported by the session backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Provider-derived profile metadata attached to a backend user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}
