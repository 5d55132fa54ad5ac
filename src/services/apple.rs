// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Apple sign-in adapter.

use crate::error::{AuthError, Result};
use crate::models::{AppleIdentity, ProviderOutcome, ProviderProfile};
use async_trait::async_trait;
use std::sync::Arc;

/// Scopes requested from Apple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppleScope {
    FullName,
    Email,
}

/// Credential returned by an interactive Apple sign-in.
///
/// `email` and `full_name` are only present on the first authorization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppleCredential {
    pub identity_token: Option<String>,
    pub email: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

/// Apple sign-in SDK failure.
#[derive(Debug, thiserror::Error)]
pub enum AppleSignInError {
    /// The user dismissed the sign-in sheet.
    #[error("sign-in request cancelled")]
    Cancelled,

    #[error("Apple sign-in failed: {0}")]
    Provider(String),
}

/// Platform Sign in with Apple SDK.
#[async_trait]
pub trait AppleSignInSdk: Send + Sync {
    async fn interactive_sign_in(
        &self,
        scopes: &[AppleScope],
    ) -> std::result::Result<AppleCredential, AppleSignInError>;
}

/// Acquires an Apple identity assertion.
pub struct AppleAdapter {
    sdk: Arc<dyn AppleSignInSdk>,
}

impl AppleAdapter {
    const SCOPES: [AppleScope; 2] = [AppleScope::FullName, AppleScope::Email];

    pub fn new(sdk: Arc<dyn AppleSignInSdk>) -> Self {
        Self { sdk }
    }

    /// Run the interactive flow. Dismissal is reported as
    /// [`ProviderOutcome::Cancelled`], not as an error.
    pub async fn acquire(&self) -> Result<ProviderOutcome<AppleIdentity>> {
        let credential = match self.sdk.interactive_sign_in(&Self::SCOPES).await {
            Ok(credential) => credential,
            Err(AppleSignInError::Cancelled) => {
                tracing::info!("Apple sign-in cancelled by user");
                return Ok(ProviderOutcome::Cancelled);
            }
            Err(AppleSignInError::Provider(msg)) => {
                return Err(AuthError::IdentityUnavailable(msg));
            }
        };

        let identity_token = credential
            .identity_token
            .clone()
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AuthError::IdentityUnavailable("no identity token".to_string()))?;

        Ok(ProviderOutcome::Acquired(AppleIdentity {
            identity_token,
            profile: profile_from_credential(credential),
        }))
    }
}

fn profile_from_credential(credential: AppleCredential) -> Option<ProviderProfile> {
    if credential.email.is_none()
        && credential.given_name.is_none()
        && credential.family_name.is_none()
    {
        return None;
    }

    let name = [credential.given_name.as_deref(), credential.family_name.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");

    Some(ProviderProfile {
        email: credential.email,
        name: (!name.is_empty()).then_some(name),
        given_name: credential.given_name,
        family_name: credential.family_name,
        photo: None,
    })
}
