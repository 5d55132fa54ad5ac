// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for name handling and display text.

/// Split a full name into `(first_name, last_name)`.
///
/// The first whitespace-separated part is the first name; every remaining
/// part, joined by single spaces, is the last name.
pub fn split_name(full_name: &str) -> (String, String) {
    let mut parts = full_name.split_whitespace();

    let Some(first) = parts.next() else {
        return (String::new(), String::new());
    };

    let last = parts.collect::<Vec<_>>().join(" ");
    (first.to_string(), last)
}

/// Truncate `text` to at most `max_chars` characters, appending `...` when
/// anything was cut.
pub fn truncate_for_display(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
    }
}
