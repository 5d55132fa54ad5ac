// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile display data read from the session store.

use crate::state::SessionStore;
use crate::strings::truncate_for_display;

/// Longest display name shown before truncation.
const MAX_DISPLAY_NAME_CHARS: usize = 24;

/// Snapshot of what profile and avatar views show.
///
/// Built from a snapshot read so views do not re-render on every session
/// change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub display_name: String,
    pub avatar_url: Option<String>,
}

impl ProfileSummary {
    /// Summary for the signed-in user, or `None` when signed out.
    pub fn from_store(store: &SessionStore) -> Option<Self> {
        let user = store.peek_current_user()?;

        Some(Self {
            display_name: truncate_for_display(&user.display_name(), MAX_DISPLAY_NAME_CHARS),
            avatar_url: store.avatar_url().filter(|url| !url.is_empty()),
        })
    }
}
