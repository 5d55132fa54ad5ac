// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! App-Session status tool.
//!
//! Restores the locally persisted session and reports who is signed in.
//! Pass `--sign-out` to clear the session and revoke it on the backend.

use app_session::{
    config::Config,
    db::{FileKvStore, KeyValueStore},
    routes::ProfileSummary,
    services::{SessionBackend, SupabaseClient, TracingAnalytics},
    state::SessionStore,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    let config = Config::from_env()?;
    let sign_out = std::env::args().skip(1).any(|arg| arg == "--sign-out");

    let kv: Arc<dyn KeyValueStore> = Arc::new(FileKvStore::open(&config.state_dir).await?);
    tracing::info!(dir = %config.state_dir.display(), "Loading persisted session");

    let backend: Arc<dyn SessionBackend> =
        Arc::new(SupabaseClient::restore(&config, kv.clone()).await?);
    let store = SessionStore::restore(kv, Arc::new(TracingAnalytics), backend).await?;

    match ProfileSummary::from_store(&store) {
        Some(profile) => tracing::info!(
            display_name = %profile.display_name,
            has_avatar = profile.avatar_url.is_some(),
            "Signed in"
        ),
        None => tracing::info!("Not signed in"),
    }

    if sign_out {
        store.sign_out().await?;
        tracing::info!("Session cleared");
    }

    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("app_session=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();

    Ok(())
}
