// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session consumers: route guarding, screen tracking and the sign-in
//! screen controller.

pub mod guard;
pub mod profile;
pub mod screen;
pub mod signin;

pub use guard::{RouteDecision, RouteGuard};
pub use profile::ProfileSummary;
pub use screen::ScreenTracker;
pub use signin::{Navigator, Notification, NotificationVariant, Notifier, SignInMode, SignInScreen};

/// Entry point for unauthenticated users.
pub const SIGN_IN_ROUTE: &str = "/auth/signin";

/// Landing route after a successful sign-in.
pub const HOME_ROUTE: &str = "/";
