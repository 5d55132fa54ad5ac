// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use app_session::db::KvError;
use app_session::error::AuthError;
use app_session::models::Provider;

#[test]
fn test_error_kinds_are_distinct() {
    let errors = [
        AuthError::IdentityUnavailable("x".to_string()),
        AuthError::SessionExchangeFailed("x".to_string()),
        AuthError::BackendRegistrationFailed("x".to_string()),
        AuthError::SignInInProgress(Provider::Google),
        AuthError::NoSession,
    ];

    let mut kinds: Vec<_> = errors.iter().map(AuthError::kind).collect();
    kinds.sort_unstable();
    kinds.dedup();
    assert_eq!(kinds.len(), errors.len());
}

#[test]
fn test_in_progress_message_names_provider() {
    let err = AuthError::SignInInProgress(Provider::Apple);
    assert_eq!(err.to_string(), "Sign-in already in progress for apple");
}

#[test]
fn test_storage_errors_convert() {
    let err: AuthError = KvError::InvalidKey("../x".to_string()).into();
    assert!(matches!(err, AuthError::Storage(_)));
    assert_eq!(err.kind(), "storage_error");
}
