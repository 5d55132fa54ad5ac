// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - sign-in and session logic.

pub mod analytics;
pub mod api;
pub mod apple;
pub mod google;
pub mod reconciler;
pub mod supabase;

pub use analytics::{Analytics, AnalyticsEvent, TracingAnalytics};
pub use api::{ApiClient, AppBackend};
pub use apple::{AppleAdapter, AppleCredential, AppleScope, AppleSignInError, AppleSignInSdk};
pub use google::{GoogleAdapter, GoogleSignInConfig, GoogleSignInPayload, GoogleSignInSdk};
pub use reconciler::SessionReconciler;
pub use supabase::{SessionBackend, SupabaseClient};
