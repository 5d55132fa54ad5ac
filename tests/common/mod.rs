// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fakes for the external collaborators and a harness wiring them up.

use app_session::config::Config;
use app_session::db::{KeyValueStore, KvError, MemoryKvStore};
use app_session::error::{AuthError, Result};
use app_session::models::{BackendSession, Provider, SessionUser, UserMetadata};
use app_session::routes::{Navigator, Notification, Notifier};
use app_session::services::{
    Analytics, AnalyticsEvent, AppBackend, AppleAdapter, AppleCredential, AppleScope,
    AppleSignInError, AppleSignInSdk, GoogleAdapter, GoogleSignInConfig, GoogleSignInPayload,
    GoogleSignInSdk, SessionBackend, SessionReconciler,
};
use app_session::state::SessionStore;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ─── Identity providers ──────────────────────────────────────────

/// Google SDK returning a scripted payload.
#[derive(Default)]
pub struct FakeGoogleSdk {
    pub payload: Mutex<Option<GoogleSignInPayload>>,
    pub unavailable: AtomicBool,
    pub configure_calls: AtomicUsize,
    pub sign_in_calls: AtomicUsize,
    /// When set, sign-in waits for a notification before returning.
    pub gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeGoogleSdk {
    pub fn returning(payload: GoogleSignInPayload) -> Self {
        Self {
            payload: Mutex::new(Some(payload)),
            ..Default::default()
        }
    }
}

#[async_trait]
impl GoogleSignInSdk for FakeGoogleSdk {
    async fn configure(&self, _config: &GoogleSignInConfig) -> anyhow::Result<()> {
        self.configure_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn check_availability(&self) -> anyhow::Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            anyhow::bail!("play services not available");
        }
        Ok(())
    }

    async fn interactive_sign_in(&self) -> anyhow::Result<Option<GoogleSignInPayload>> {
        self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self.payload.lock().unwrap().clone())
    }
}

/// Scripted behavior for the Apple SDK.
#[derive(Clone)]
pub enum AppleBehavior {
    Token(String),
    MissingToken,
    Cancel,
    Fail(String),
}

pub struct FakeAppleSdk {
    pub behavior: Mutex<AppleBehavior>,
    pub requested_scopes: Mutex<Vec<AppleScope>>,
}

impl FakeAppleSdk {
    pub fn new(behavior: AppleBehavior) -> Self {
        Self {
            behavior: Mutex::new(behavior),
            requested_scopes: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AppleSignInSdk for FakeAppleSdk {
    async fn interactive_sign_in(
        &self,
        scopes: &[AppleScope],
    ) -> std::result::Result<AppleCredential, AppleSignInError> {
        *self.requested_scopes.lock().unwrap() = scopes.to_vec();
        match self.behavior.lock().unwrap().clone() {
            AppleBehavior::Token(token) => Ok(AppleCredential {
                identity_token: Some(token),
                ..Default::default()
            }),
            AppleBehavior::MissingToken => Ok(AppleCredential::default()),
            AppleBehavior::Cancel => Err(AppleSignInError::Cancelled),
            AppleBehavior::Fail(msg) => Err(AppleSignInError::Provider(msg)),
        }
    }
}

// ─── Backends ────────────────────────────────────────────────────

/// Session backend keyed by provider.
#[derive(Default)]
pub struct FakeSessionBackend {
    /// User returned per provider; missing entry means "no user".
    pub users: Mutex<HashMap<Provider, SessionUser>>,
    pub reject: AtomicBool,
    pub fail_sign_out: AtomicBool,
    pub exchanged: Mutex<Vec<(Provider, String)>>,
    pub session: Mutex<Option<BackendSession>>,
    pub sign_out_calls: AtomicUsize,
}

impl FakeSessionBackend {
    pub fn with_user(provider: Provider, user: SessionUser) -> Self {
        let backend = Self::default();
        backend.users.lock().unwrap().insert(provider, user);
        backend
    }
}

#[async_trait]
impl SessionBackend for FakeSessionBackend {
    async fn exchange_identity_token(
        &self,
        provider: Provider,
        token: &str,
    ) -> Result<BackendSession> {
        self.exchanged
            .lock()
            .unwrap()
            .push((provider, token.to_string()));

        if self.reject.load(Ordering::SeqCst) {
            return Err(AuthError::Http("HTTP 400: invalid token".to_string()));
        }

        let user = self
            .users
            .lock()
            .unwrap()
            .get(&provider)
            .cloned()
            .ok_or_else(|| AuthError::SessionExchangeFailed("no user returned".to_string()))?;

        let session = BackendSession {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: None,
            user,
        };
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    async fn current_session(&self) -> Result<Option<BackendSession>> {
        Ok(self.session.lock().unwrap().clone())
    }

    async fn sign_out(&self) -> Result<()> {
        self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
        self.session.lock().unwrap().take();
        if self.fail_sign_out.load(Ordering::SeqCst) {
            return Err(AuthError::Http("logout failed".to_string()));
        }
        Ok(())
    }
}

/// Application backend recording registered auth codes.
#[derive(Default)]
pub struct FakeAppBackend {
    pub codes: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

#[async_trait]
impl AppBackend for FakeAppBackend {
    async fn register_google_auth_code(&self, code: &str) -> Result<()> {
        self.codes.lock().unwrap().push(code.to_string());
        if self.fail.load(Ordering::SeqCst) {
            return Err(AuthError::BackendRegistrationFailed(
                "HTTP 500 Internal Server Error".to_string(),
            ));
        }
        Ok(())
    }
}

// ─── Storage ─────────────────────────────────────────────────────

/// In-memory store whose writes can be switched to fail.
#[allow(dead_code)]
#[derive(Default)]
pub struct FlakyKvStore {
    pub inner: MemoryKvStore,
    pub fail_writes: AtomicBool,
}

#[allow(dead_code)]
impl FlakyKvStore {
    fn check_writable(&self) -> std::result::Result<(), KvError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(KvError::Io(std::io::Error::other("disk full")));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FlakyKvStore {
    async fn get(&self, key: &str) -> std::result::Result<Option<Vec<u8>>, KvError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> std::result::Result<(), KvError> {
        self.check_writable()?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> std::result::Result<(), KvError> {
        self.check_writable()?;
        self.inner.remove(key).await
    }
}

// ─── Presentation ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingAnalytics {
    pub identified: Mutex<Vec<(String, String, String, String)>>,
    pub screens: Mutex<Vec<String>>,
    pub events: Mutex<Vec<AnalyticsEvent>>,
}

impl Analytics for RecordingAnalytics {
    fn identify(&self, user_id: &str, email: &str, first_name: &str, last_name: &str) {
        self.identified.lock().unwrap().push((
            user_id.to_string(),
            email.to_string(),
            first_name.to_string(),
            last_name.to_string(),
        ));
    }

    fn track_screen_view(&self, screen_name: &str, _properties: &Map<String, Value>) {
        self.screens.lock().unwrap().push(screen_name.to_string());
    }

    fn track_event(&self, event: AnalyticsEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub shown: Mutex<Vec<Notification>>,
}

impl Notifier for RecordingNotifier {
    fn show(&self, notification: Notification) {
        self.shown.lock().unwrap().push(notification);
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    pub routes: Mutex<Vec<String>>,
}

impl Navigator for RecordingNavigator {
    fn replace(&self, route: &str) {
        self.routes.lock().unwrap().push(route.to_string());
    }
}

// ─── Harness ─────────────────────────────────────────────────────

/// Backend user with the given name metadata.
#[allow(dead_code)]
pub fn session_user(id: &str, email: &str, full_name: Option<&str>) -> SessionUser {
    SessionUser {
        id: id.to_string(),
        email: Some(email.to_string()),
        user_metadata: UserMetadata {
            full_name: full_name.map(str::to_string),
            avatar_url: Some(format!("https://cdn.example.com/{id}.png")),
        },
    }
}

/// Google payload with an ID token and optional server auth code.
#[allow(dead_code)]
pub fn google_payload(server_auth_code: Option<&str>) -> GoogleSignInPayload {
    GoogleSignInPayload {
        id_token: Some("google-id-token".to_string()),
        server_auth_code: server_auth_code.map(str::to_string),
        user: None,
    }
}

/// Fully wired reconciler and store over fakes.
#[allow(dead_code)]
pub struct Harness {
    pub google: Arc<FakeGoogleSdk>,
    pub apple: Arc<FakeAppleSdk>,
    pub backend: Arc<FakeSessionBackend>,
    pub app_backend: Arc<FakeAppBackend>,
    pub analytics: Arc<RecordingAnalytics>,
    pub kv: Arc<dyn KeyValueStore>,
    pub store: Arc<SessionStore>,
    pub reconciler: Arc<SessionReconciler>,
}

#[allow(dead_code)]
impl Harness {
    pub async fn new(google: FakeGoogleSdk, apple: FakeAppleSdk, backend: FakeSessionBackend) -> Self {
        Self::with_kv(google, apple, backend, Arc::new(MemoryKvStore::new())).await
    }

    pub async fn with_kv(
        google: FakeGoogleSdk,
        apple: FakeAppleSdk,
        backend: FakeSessionBackend,
        kv: Arc<dyn KeyValueStore>,
    ) -> Self {
        let google = Arc::new(google);
        let apple = Arc::new(apple);
        let backend = Arc::new(backend);
        let app_backend = Arc::new(FakeAppBackend::default());
        let analytics = Arc::new(RecordingAnalytics::default());

        let store = Arc::new(
            SessionStore::restore(kv.clone(), analytics.clone(), backend.clone())
                .await
                .expect("store should restore"),
        );

        let reconciler = Arc::new(SessionReconciler::new(
            GoogleAdapter::new(google.clone(), Config::test_default().google_sign_in_config()),
            AppleAdapter::new(apple.clone()),
            backend.clone(),
            app_backend.clone(),
            store.clone(),
        ));

        Self {
            google,
            apple,
            backend,
            app_backend,
            analytics,
            kv,
            store,
            reconciler,
        }
    }
}
