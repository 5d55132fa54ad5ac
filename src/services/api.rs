// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application backend REST client.
//!
//! Every request carries the current backend session's tokens in the
//! `x-refreshToken` and `x-accessToken` headers. Only HTTP 200 counts as
//! success.

use crate::error::{AuthError, Result};
use crate::services::supabase::SessionBackend;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

const REFRESH_TOKEN_HEADER: &str = "x-refreshToken";
const ACCESS_TOKEN_HEADER: &str = "x-accessToken";

/// Calls the application backend makes as part of sign-in.
#[async_trait]
pub trait AppBackend: Send + Sync {
    /// Hand a Google server auth code to the application backend.
    async fn register_google_auth_code(&self, code: &str) -> Result<()>;
}

/// Tokens attached to every backend request.
struct AuthTokens {
    refresh_token: String,
    access_token: String,
}

/// Thin REST client for the application backend.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    sessions: Arc<dyn SessionBackend>,
}

impl ApiClient {
    pub fn new(base_url: &str, sessions: Arc<dyn SessionBackend>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            sessions,
        }
    }

    /// GET `path` and parse the JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None::<&()>).await?;
        Self::parse_json(response).await
    }

    /// POST a JSON body to `path` and parse the JSON response.
    pub async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(Method::POST, path, Some(body)).await?;
        Self::parse_json(response).await
    }

    /// PUT a JSON body to `path` and parse the JSON response.
    pub async fn put<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(Method::PUT, path, Some(body)).await?;
        Self::parse_json(response).await
    }

    /// DELETE `path` with a JSON body and parse the JSON response.
    pub async fn delete<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let response = self.send(Method::DELETE, path, Some(body)).await?;
        Self::parse_json(response).await
    }

    /// Send a request and return the raw response, e.g. for streaming bodies.
    pub async fn send<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response> {
        let tokens = self.auth_tokens().await?;
        let url = format!("{}{}", self.base_url, path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(REFRESH_TOKEN_HEADER, tokens.refresh_token)
            .header(ACCESS_TOKEN_HEADER, tokens.access_token);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AuthError::Http(format!("{method} {path} failed: {e}")))?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%method, path, %status, "Backend request failed");
            return Err(AuthError::Http(format!("HTTP {status}: {body}")));
        }

        Ok(response)
    }

    async fn auth_tokens(&self) -> Result<AuthTokens> {
        let session = self
            .sessions
            .current_session()
            .await?
            .ok_or(AuthError::NoSession)?;

        Ok(AuthTokens {
            refresh_token: session.refresh_token,
            access_token: session.access_token,
        })
    }

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        response
            .json()
            .await
            .map_err(|e| AuthError::Http(format!("JSON parse error: {e}")))
    }
}

#[async_trait]
impl AppBackend for ApiClient {
    async fn register_google_auth_code(&self, code: &str) -> Result<()> {
        let body = serde_json::json!({ "code": code });

        self.send(Method::POST, "/auth/signinWithGoogle", Some(&body))
            .await
            .map_err(|e| AuthError::BackendRegistrationFailed(e.to_string()))?;

        tracing::info!("Google auth code registered with backend");
        Ok(())
    }
}
