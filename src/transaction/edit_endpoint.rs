//! Defines the endpoint for updating an existing transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use rusqlite::Connection;

use crate::{
    AppState, endpoints,
    flash::{NoticeLevel, redirect_with_notice},
    transaction::{
        core::{TransactionId, update_transaction},
        form::TransactionForm,
    },
};

/// The state needed to update a transaction.
#[derive(Clone)]
pub struct EditTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that overwrites every field of the transaction `id`,
/// redirecting to the dashboard on success.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn edit_transaction_endpoint(
    State(state): State<EditTransactionState>,
    Path(id): Path<TransactionId>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let data = match form.into_data() {
        Ok(data) => data,
        Err(error) => return error.into_response(),
    };

    let connection = state.db_connection.lock().unwrap();

    if let Err(error) = update_transaction(id, data, &connection) {
        return error.into_response();
    }

    redirect_with_notice(
        endpoints::DASHBOARD_VIEW,
        NoticeLevel::Success,
        "Transação atualizada com sucesso!",
    )
}
