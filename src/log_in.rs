//! The log-in page and the credential check behind it.

use std::sync::Arc;

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, Error,
    auth::{CredentialVerifier, cookie::set_auth_cookie},
    endpoints,
    flash::{NoticeLevel, notice_banner},
    html::{base, render},
};

/// The state needed to perform a log-in.
#[derive(Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which session cookies are valid.
    pub cookie_duration: Duration,
    /// Checks the submitted credential pair.
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            verifier: state.verifier.clone(),
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The form data for a log-in request.
#[derive(Debug, Deserialize)]
pub struct LogInData {
    /// The submitted username.
    pub username: String,
    /// The submitted password.
    pub password: String,
}

fn log_in_page(error_message: Option<&str>) -> Markup {
    base(
        "Entrar",
        html! {
            h1 { "Entrar" }

            @if let Some(message) = error_message
            {
                (notice_banner(NoticeLevel::Error, message))
            }

            form class="stacked" method="post" action=(endpoints::LOG_IN_VIEW)
            {
                label for="username" { "Usuário" }
                input type="text" id="username" name="username" required;

                label for="password" { "Senha" }
                input type="password" id="password" name="password" required;

                button type="submit" { "Entrar" }
            }
        },
    )
}

/// Display the log-in page.
pub async fn get_log_in_page() -> Response {
    render(StatusCode::OK, log_in_page(None))
}

/// Handler for log-in requests via the POST method.
///
/// On success the session cookies are set and the client is redirected to the
/// dashboard. Otherwise the form is returned with an error message.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(data): Form<LogInData>,
) -> Response {
    if let Err(error) = state.verifier.verify(&data.username, &data.password) {
        tracing::debug!("Rejected log-in for {:?}: {error}", data.username);
        return render(
            StatusCode::UNAUTHORIZED,
            log_in_page(Some("Usuário ou senha incorretos")),
        );
    }

    let jar = match set_auth_cookie(jar, state.cookie_duration) {
        Ok(jar) => jar,
        Err(error) => return error.into_response(),
    };

    (jar, Redirect::to(endpoints::DASHBOARD_VIEW)).into_response()
}
