//! Page routes. Every known client page passes through the session gate;
//! the allowed response is a small JSON descriptor the front end renders.

use axum::{
    extract::{Request, State},
    http::Uri,
    middleware::{self, Next},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;

use crate::auth::gate::{self, GateDecision, PageAccess, PAGES};
use crate::auth::AuthUser;
use crate::state::AppState;

/// Session as seen by the gate, handed on to the page handler.
#[derive(Debug, Clone)]
pub struct PageSession(pub Option<AuthUser>);

#[derive(Debug, Serialize)]
pub struct PageDescriptor {
    pub page: String,
    pub access: PageAccess,
    pub authenticated: bool,
}

pub async fn gate_pages(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let Some(access) = gate::classify(request.uri().path()) else {
        return next.run(request).await;
    };

    let user = gate::resolve_session(state.auth.as_ref(), request.headers()).await;
    match gate::decide(access, user.is_some()) {
        GateDecision::Redirect(to) => Redirect::to(to).into_response(),
        GateDecision::Allow => {
            request.extensions_mut().insert(PageSession(user));
            next.run(request).await
        }
    }
}

/// GET on any page path.
pub async fn handle_page(uri: Uri, Extension(session): Extension<PageSession>) -> Json<PageDescriptor> {
    let path = uri.path();
    Json(PageDescriptor {
        page: path.to_string(),
        access: gate::classify(path).unwrap_or(PageAccess::Public),
        authenticated: session.0.is_some(),
    })
}

pub fn router(state: AppState) -> Router<AppState> {
    PAGES
        .iter()
        .fold(Router::new(), |router, (path, _)| {
            router.route(path, get(handle_page))
        })
        .route_layer(middleware::from_fn_with_state(state, gate_pages))
}
