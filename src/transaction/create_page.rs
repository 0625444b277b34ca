//! Defines the page for recording a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, endpoints,
    entity::Suggestions,
    html::render,
    transaction::form::transaction_form_page,
};

/// The state needed to display the new transaction page.
#[derive(Clone)]
pub struct NewTransactionPageState {
    /// The database connection for loading the autocomplete suggestions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for NewTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the empty transaction form with entity suggestions.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_new_transaction_page(State(state): State<NewTransactionPageState>) -> Response {
    let connection = state.db_connection.lock().unwrap();

    let suggestions = match Suggestions::load(&connection) {
        Ok(suggestions) => suggestions,
        Err(error) => return error.into_response(),
    };

    render(
        StatusCode::OK,
        transaction_form_page(
            "Nova transação",
            endpoints::NEW_TRANSACTION_VIEW,
            None,
            &suggestions,
        ),
    )
}
