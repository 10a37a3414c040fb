//! Session resolution middleware.
//!
//! Resolves the opaque Bearer token (if any) against the server-side
//! session store and injects the resulting [`SessionContext`] into request
//! extensions. Resolution never rejects a request here; authorization is
//! decided inside each use case via `Session::require`.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::domain::{Session, SessionToken};

/// The caller's session state plus the raw token it arrived with.
///
/// The token is kept alongside the session so logout and profile updates
/// can address the store entry.
#[derive(Clone, Debug)]
pub struct SessionContext {
    pub token: Option<SessionToken>,
    pub session: Session,
}

impl SessionContext {
    /// An anonymous context with no token.
    pub fn anonymous() -> Self {
        Self {
            token: None,
            session: Session::Anonymous,
        }
    }
}

/// Resolve the request's session and stash it in extensions.
pub async fn resolve_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .and_then(|t| t.parse::<SessionToken>().ok());

    let session = match &token {
        Some(token) => state.auth_service.resolve(token).await,
        None => Session::Anonymous,
    };

    request
        .extensions_mut()
        .insert(SessionContext { token, session });

    next.run(request).await
}
