// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Candidate identities returned by the identity provider adapters.
//!
//! These are transient and never persisted; the reconciler normalizes them
//! into a [`User`](super::User).

use super::Provider;

/// Profile fields reported directly by an identity provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderProfile {
    pub email: Option<String>,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub photo: Option<String>,
}

/// Google sign-in result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleIdentity {
    pub id_token: String,
    /// One-time code the application backend exchanges for offline access
    pub server_auth_code: Option<String>,
    pub profile: Option<ProviderProfile>,
}

/// Apple sign-in result.
///
/// Apple only supplies name and email on the first authorization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppleIdentity {
    pub identity_token: String,
    pub profile: Option<ProviderProfile>,
}

/// Provider-specific token bundle prior to normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateIdentity {
    Google(GoogleIdentity),
    Apple(AppleIdentity),
}

impl CandidateIdentity {
    pub fn provider(&self) -> Provider {
        match self {
            CandidateIdentity::Google(_) => Provider::Google,
            CandidateIdentity::Apple(_) => Provider::Apple,
        }
    }

    /// Token presented to the session backend.
    pub fn token(&self) -> &str {
        match self {
            CandidateIdentity::Google(google) => &google.id_token,
            CandidateIdentity::Apple(apple) => &apple.identity_token,
        }
    }
}

/// Result of an interactive provider flow that can be dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOutcome<T> {
    Acquired(T),
    Cancelled,
}
