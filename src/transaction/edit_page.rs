//! Defines the page for editing an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, endpoints,
    entity::Suggestions,
    html::render,
    transaction::{
        core::{TransactionId, get_transaction},
        form::transaction_form_page,
    },
};

/// The state needed to display the edit transaction page.
#[derive(Clone)]
pub struct EditTransactionPageState {
    /// The database connection for loading the transaction and suggestions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the transaction form pre-filled with the transaction `id`.
///
/// A missing `id` surfaces as a notice on the dashboard rather than a hard
/// failure.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_edit_transaction_page(
    State(state): State<EditTransactionPageState>,
    Path(id): Path<TransactionId>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    let transaction = match get_transaction(id, &connection) {
        Ok(transaction) => transaction,
        Err(error) => return error.into_response(),
    };

    let suggestions = match Suggestions::load(&connection) {
        Ok(suggestions) => suggestions,
        Err(error) => return error.into_response(),
    };

    render(
        StatusCode::OK,
        transaction_form_page(
            "Editar transação",
            &endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, id),
            Some(&transaction),
            &suggestions,
        ),
    )
}
