// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in error types and outcomes.

use crate::db::KvError;
use crate::models::{Provider, User};

/// Authentication error type.
///
/// Every variant aborts the current sign-in attempt and leaves the session
/// store untouched. Users only ever see one generic message; the variants
/// exist for logging.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Identity provider unavailable: {0}")]
    IdentityUnavailable(String),

    #[error("Session exchange failed: {0}")]
    SessionExchangeFailed(String),

    #[error("Backend registration failed: {0}")]
    BackendRegistrationFailed(String),

    #[error("Sign-in already in progress for {0}")]
    SignInInProgress(Provider),

    #[error("No session available")]
    NoSession,

    #[error("Invalid user record: {0}")]
    InvalidUser(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("HTTP error: {0}")]
    Http(String),
}

impl AuthError {
    /// Notification body shown for any failed sign-in.
    pub const GENERIC_SIGN_IN_FAILURE: &'static str =
        "Something went wrong and we couldn't sign you in. Please try again.";

    /// Short machine-readable kind, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::IdentityUnavailable(_) => "identity_unavailable",
            AuthError::SessionExchangeFailed(_) => "session_exchange_failed",
            AuthError::BackendRegistrationFailed(_) => "backend_registration_failed",
            AuthError::SignInInProgress(_) => "sign_in_in_progress",
            AuthError::NoSession => "no_session",
            AuthError::InvalidUser(_) => "invalid_user",
            AuthError::Storage(_) => "storage_error",
            AuthError::Http(_) => "http_error",
        }
    }
}

impl From<KvError> for AuthError {
    fn from(err: KvError) -> Self {
        AuthError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Storage(format!("serialization failed: {err}"))
    }
}

/// Result of a sign-in attempt that did not fail.
///
/// User cancellation is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignInOutcome {
    /// The user was committed to the session store.
    Success(User),
    /// The user dismissed the provider's sign-in UI.
    Cancelled,
}

/// Result type alias for auth operations
pub type Result<T> = std::result::Result<T, AuthError>;
