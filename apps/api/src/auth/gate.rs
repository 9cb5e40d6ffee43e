//! Route gate: decides whether a page request proceeds or is redirected,
//! based only on whether the auth service recognises the caller's session.

use axum::http::HeaderMap;
use serde::Serialize;
use tracing::warn;

use crate::auth::{session_token, AuthProvider, AuthUser};

pub const SIGN_IN_PAGE: &str = "/auth";
pub const HOME_PAGE: &str = "/dashboard";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAccess {
    /// Anyone.
    Public,
    /// Only visitors without a session (sign-in / sign-up).
    GuestOnly,
    /// Only signed-in users.
    Protected,
}

/// Every page path the client knows about.
pub const PAGES: &[(&str, PageAccess)] = &[
    ("/", PageAccess::Public),
    ("/auth", PageAccess::GuestOnly),
    ("/dashboard", PageAccess::Protected),
    ("/onboarding", PageAccess::Protected),
    ("/settings", PageAccess::Protected),
    ("/find-jobs", PageAccess::Protected),
    ("/applied-jobs", PageAccess::Protected),
    ("/profile", PageAccess::Protected),
    ("/upgrade", PageAccess::Public),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    Redirect(&'static str),
}

pub fn classify(path: &str) -> Option<PageAccess> {
    let path = match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    };
    PAGES
        .iter()
        .find(|(page, _)| *page == path)
        .map(|(_, access)| *access)
}

pub fn decide(access: PageAccess, has_session: bool) -> GateDecision {
    match (access, has_session) {
        (PageAccess::Protected, false) => GateDecision::Redirect(SIGN_IN_PAGE),
        (PageAccess::GuestOnly, true) => GateDecision::Redirect(HOME_PAGE),
        _ => GateDecision::Allow,
    }
}

/// Looks up the caller's session. A failed lookup counts as "no session".
pub async fn resolve_session(auth: &dyn AuthProvider, headers: &HeaderMap) -> Option<AuthUser> {
    let token = session_token(headers)?;
    match auth.get_user(&token).await {
        Ok(user) => Some(user),
        Err(e) => {
            warn!("Auth check failed: {e}");
            None
        }
    }
}
