//! Auth. Everything identity-related is delegated to the managed auth
//! service. This module only forwards credentials, carries the session token
//! around, and asks the service who the token belongs to.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

pub mod client;
pub mod gate;
pub mod handlers;
#[cfg(test)]
pub mod memory;

pub use client::GoTrueClient;

/// Cookie the session token is stored under for page requests.
pub const SESSION_COOKIE: &str = "sb-access-token";

#[derive(Debug, Error)]
pub enum AuthClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("auth service rejected request (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("session is missing, expired or revoked")]
    InvalidSession,

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

/// The identity the auth service vouches for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
    pub user: AuthUser,
}

/// Sign-up yields a session only when the service auto-confirms e-mail.
#[derive(Debug, Clone, Serialize)]
pub struct SignUpOutcome {
    pub user: AuthUser,
    pub session: Option<Session>,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthClientError>;

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthClientError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthClientError>;

    /// Resolves a token to its user. Fails with `InvalidSession` when the
    /// service does not recognise it.
    async fn get_user(&self, access_token: &str) -> Result<AuthUser, AuthClientError>;

    /// Where to send the browser to start an OAuth sign-in.
    fn authorize_url(&self, provider: &str, redirect_to: &str) -> Result<String, AuthClientError>;
}

/// Pulls the session token from `Authorization: Bearer` or the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = value.strip_prefix("Bearer ") {
            let token = token.trim();
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies
        .split(';')
        .filter_map(|c| c.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// The signed-in caller. Extracting it fails with `401` when no token is
/// present or the auth service rejects it.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub email: Option<String>,
    pub access_token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = session_token(&parts.headers).ok_or(AppError::Unauthorized)?;
        let user = state.auth.get_user(&token).await.map_err(|e| {
            debug!("Session lookup failed: {e}");
            AppError::from(e)
        })?;
        Ok(CurrentUser {
            id: user.id,
            email: user.email,
            access_token: token,
        })
    }
}
