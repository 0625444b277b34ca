//! Defines the endpoint for creating a new transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use rusqlite::Connection;

use crate::{
    AppState, endpoints,
    flash::{NoticeLevel, redirect_with_notice},
    transaction::{core::create_transaction, form::TransactionForm},
};

/// The state needed to create a transaction.
#[derive(Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new transaction, redirects to the dashboard
/// on success.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let data = match form.into_data() {
        Ok(data) => data,
        Err(error) => return error.into_response(),
    };

    let connection = state.db_connection.lock().unwrap();

    if let Err(error) = create_transaction(data, &connection) {
        return error.into_response();
    }

    redirect_with_notice(
        endpoints::DASHBOARD_VIEW,
        NoticeLevel::Success,
        "Transação adicionada com sucesso!",
    )
}
