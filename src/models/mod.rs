// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod identity;
pub mod session;
pub mod user;

pub use identity::{AppleIdentity, CandidateIdentity, GoogleIdentity, ProviderOutcome, ProviderProfile};
pub use session::{BackendSession, Provider, SessionUser, UserMetadata};
pub use user::User;
