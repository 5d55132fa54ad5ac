// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in screen controller.
//!
//! Maps sign-in outcomes to presentation: success navigates home,
//! cancellation does nothing, and any failure shows one generic error
//! notification.

use super::HOME_ROUTE;
use crate::error::{AuthError, Result, SignInOutcome};
use crate::models::Provider;
use crate::services::analytics::{Analytics, AnalyticsEvent};
use crate::services::SessionReconciler;
use std::sync::Arc;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationVariant {
    Success,
    Error,
    Warning,
    Info,
}

/// In-app notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
}

impl Notification {
    fn sign_in_failed() -> Self {
        Self {
            title: "Error".to_string(),
            description: AuthError::GENERIC_SIGN_IN_FAILURE.to_string(),
            variant: NotificationVariant::Error,
        }
    }
}

/// Presents in-app notifications.
pub trait Notifier: Send + Sync {
    fn show(&self, notification: Notification);
}

/// Replaces the current route.
pub trait Navigator: Send + Sync {
    fn replace(&self, route: &str);
}

/// Whether the screen is presented as sign-up or sign-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignInMode {
    #[default]
    SignUp,
    SignIn,
}

impl SignInMode {
    pub fn toggled(self) -> Self {
        match self {
            SignInMode::SignUp => SignInMode::SignIn,
            SignInMode::SignIn => SignInMode::SignUp,
        }
    }

    fn event_for(self, provider: Provider) -> AnalyticsEvent {
        match (provider, self) {
            (Provider::Google, SignInMode::SignUp) => AnalyticsEvent::GoogleSignUp,
            (Provider::Google, SignInMode::SignIn) => AnalyticsEvent::GoogleSignIn,
            (Provider::Apple, SignInMode::SignUp) => AnalyticsEvent::AppleSignUp,
            (Provider::Apple, SignInMode::SignIn) => AnalyticsEvent::AppleSignIn,
        }
    }
}

/// Controller behind the sign-in screen's provider buttons.
pub struct SignInScreen {
    reconciler: Arc<SessionReconciler>,
    analytics: Arc<dyn Analytics>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    mode: SignInMode,
}

impl SignInScreen {
    pub fn new(
        reconciler: Arc<SessionReconciler>,
        analytics: Arc<dyn Analytics>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            reconciler,
            analytics,
            notifier,
            navigator,
            mode: SignInMode::default(),
        }
    }

    pub fn mode(&self) -> SignInMode {
        self.mode
    }

    /// Switch between sign-up and sign-in presentation.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// "Continue with Google" pressed.
    pub async fn on_google_pressed(&self) -> Option<SignInOutcome> {
        let result = self.reconciler.sign_in_with_google().await;
        self.present(Provider::Google, result)
    }

    /// Apple button pressed.
    pub async fn on_apple_pressed(&self) -> Option<SignInOutcome> {
        let result = self.reconciler.sign_in_with_apple().await;
        self.present(Provider::Apple, result)
    }

    fn present(
        &self,
        provider: Provider,
        result: Result<SignInOutcome>,
    ) -> Option<SignInOutcome> {
        match result {
            Ok(outcome @ SignInOutcome::Success(_)) => {
                self.analytics.track_event(self.mode.event_for(provider));
                self.navigator.replace(HOME_ROUTE);
                Some(outcome)
            }
            Ok(SignInOutcome::Cancelled) => Some(SignInOutcome::Cancelled),
            Err(e) => {
                tracing::error!(%provider, kind = e.kind(), error = %e, "Sign-in failed");
                self.notifier.show(Notification::sign_in_failed());
                None
            }
        }
    }
}
