use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::auth::{gate, session_token, AuthUser, CurrentUser, Session, SESSION_COOKIE};
use crate::errors::AppError;
use crate::state::AppState;

/// Providers the sign-in page offers.
const OAUTH_PROVIDERS: &[&str] = &["google"];
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    fn validate(&self) -> Result<(), AppError> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::Validation("A valid email is required".into()));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(())
    }
}

#[derive(Serialize)]
pub struct SignUpResponse {
    pub user: AuthUser,
    pub session: Option<Session>,
    /// False when the auth service wants the e-mail confirmed first.
    pub signed_in: bool,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    pub user: Option<AuthUser>,
}

fn session_cookie(session: &Session) -> Option<HeaderValue> {
    let max_age = session.expires_in.unwrap_or(3600);
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
        session.access_token
    ))
    .ok()
}

fn cleared_cookie() -> HeaderValue {
    HeaderValue::from_static("sb-access-token=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn with_session_cookie<T: Serialize>(session: Option<&Session>, body: T) -> Response {
    let mut response = Json(body).into_response();
    if let Some(cookie) = session.and_then(session_cookie) {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    response
}

/// POST /api/v1/auth/sign-up
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Response, AppError> {
    req.validate()?;
    let outcome = state.auth.sign_up(req.email.trim(), &req.password).await?;

    let session = outcome.session.clone();
    let body = SignUpResponse {
        signed_in: session.is_some(),
        user: outcome.user,
        session: outcome.session,
    };
    let mut response = with_session_cookie(session.as_ref(), body);
    *response.status_mut() = StatusCode::CREATED;
    Ok(response)
}

/// POST /api/v1/auth/sign-in
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Response, AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation("Email and password are required".into()));
    }
    let session = state
        .auth
        .sign_in_with_password(req.email.trim(), &req.password)
        .await?;

    if let Err(e) = state.store.touch_last_login(session.user.id).await {
        warn!("Failed to record last login for {}: {e}", session.user.id);
    }

    Ok(with_session_cookie(Some(&session), &session))
}

/// POST /api/v1/auth/sign-out
///
/// The cookie is cleared even when the auth service refuses the logout.
pub async fn handle_sign_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if let Err(e) = state.auth.sign_out(&token).await {
            warn!("Sign-out was rejected by the auth service: {e}");
        }
    }
    let mut response = StatusCode::NO_CONTENT.into_response();
    response
        .headers_mut()
        .insert(header::SET_COOKIE, cleared_cookie());
    response
}

/// GET /api/v1/auth/oauth/:provider
pub async fn handle_oauth(
    State(state): State<AppState>,
    Path(provider): Path<String>,
) -> Result<Response, AppError> {
    if !OAUTH_PROVIDERS.contains(&provider.as_str()) {
        return Err(AppError::Validation(format!(
            "Unsupported sign-in provider '{provider}'"
        )));
    }
    let redirect_to = format!(
        "{}{}",
        state.config.site_url.trim_end_matches('/'),
        gate::HOME_PAGE
    );
    let url = state.auth.authorize_url(&provider, &redirect_to)?;
    Ok(Redirect::to(&url).into_response())
}

/// GET /api/v1/auth/session
pub async fn handle_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<SessionResponse> {
    let user = gate::resolve_session(state.auth.as_ref(), &headers).await;
    Json(SessionResponse {
        authenticated: user.is_some(),
        user,
    })
}

/// GET /api/v1/auth/me
pub async fn handle_me(user: CurrentUser) -> Json<AuthUser> {
    Json(AuthUser {
        id: user.id,
        email: user.email,
    })
}
