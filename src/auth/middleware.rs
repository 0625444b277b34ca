//! Middleware that redirects requests without a valid session to the log-in
//! page.

use axum::{
    extract::{FromRef, FromRequestParts, Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{PrivateCookieJar, cookie::Key};

use crate::{AppState, auth::cookie::validate_session, endpoints};

/// The state needed for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}

/// Middleware function that checks for a valid session cookie. The request
/// executes normally if the session is valid, otherwise a redirect to the
/// log-in page is returned.
pub async fn auth_guard(State(state): State<AuthState>, request: Request, next: Next) -> Response {
    let (mut parts, body) = request.into_parts();

    let jar = match PrivateCookieJar::from_request_parts(&mut parts, &state).await {
        Ok(jar) => jar,
        Err(_) => return Redirect::to(endpoints::LOG_IN_VIEW).into_response(),
    };

    if let Err(error) = validate_session(&jar) {
        tracing::debug!("Rejecting request to {}: {error}", parts.uri.path());
        return Redirect::to(endpoints::LOG_IN_VIEW).into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}
