//! Livro Caixa is a small web app for running the finances of a one-person
//! business: income and expense transactions tied to clients, collaborators
//! and fixed-expense payees, with due-date tracking, receivable/payable
//! totals, near-due reminders and receipt/CSV/WhatsApp exports.
//!
//! The library serves HTML pages directly; there is no JSON API.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::response::{IntoResponse, Response};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod config;
mod dashboard;
mod db;
mod endpoints;
mod entity;
mod export;
mod flash;
mod format;
mod html;
mod log_in;
mod log_out;
mod navigation;
mod reminder;
mod routing;
mod transaction;

pub use app_state::AppState;
pub use auth::{CredentialVerifier, StaticCredentials};
pub use config::{Config, SenderIdentity};
pub use db::initialize as initialize_db;
pub use routing::build_router;

use crate::flash::{NoticeLevel, redirect_with_notice};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The operator provided a username/password pair that does not match the
    /// configured credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Either the session or expiry cookie is missing from the cookie jar in
    /// the request.
    #[error("no session cookies in the cookie jar")]
    CookieMissing,

    /// The session cookie has passed its expiry date-time.
    #[error("the session has expired")]
    CookieExpired,

    /// The expiry cookie's date-time could not be parsed or formatted.
    #[error("could not parse or format the session expiry date-time: {0}")]
    InvalidExpiryDate(String),

    /// An amount string did not match the fixed display convention
    /// (thousands `.`, decimal `,`).
    #[error("could not parse {0:?} as an amount")]
    InvalidAmount(String),

    /// A due date string was not a valid ISO (`YYYY-MM-DD`) date.
    #[error("could not parse {0:?} as a date")]
    InvalidDate(String),

    /// An entity kind string did not name one of the three fixed registries.
    #[error("unknown entity kind {0:?}")]
    UnknownEntityKind(String),

    /// A transaction kind string was neither an inflow nor an outflow.
    #[error("unknown transaction kind {0:?}")]
    UnknownTransactionKind(String),

    /// A status string was neither pending nor paid.
    #[error("unknown status {0:?}")]
    UnknownStatus(String),

    /// A required environment variable was not set.
    #[error("the environment variable {0} must be set")]
    MissingEnvVar(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a transaction that does not exist
    #[error("tried to update a transaction that is not in the database")]
    UpdateMissingTransaction,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// The receipt document could not be produced.
    #[error("could not generate the receipt document: {0}")]
    DocumentError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let message = match &self {
            Error::InvalidAmount(text) => {
                format!("Valor inválido: {text:?}. Use o formato 1.234,56.")
            }
            Error::InvalidDate(text) => format!("Data inválida: {text:?}."),
            Error::UnknownEntityKind(kind) => format!("Natureza desconhecida: {kind:?}."),
            Error::UnknownTransactionKind(kind) => format!("Tipo desconhecido: {kind:?}."),
            Error::UnknownStatus(status) => format!("Status desconhecido: {status:?}."),
            Error::NotFound | Error::UpdateMissingTransaction | Error::DeleteMissingTransaction => {
                "Transação não encontrada!".to_owned()
            }
            // Any errors that are not handled above are not intended to be shown to the operator.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                "Ocorreu um erro inesperado. Verifique os registros do servidor.".to_owned()
            }
        };

        redirect_with_notice(endpoints::DASHBOARD_VIEW, NoticeLevel::Error, &message)
    }
}
