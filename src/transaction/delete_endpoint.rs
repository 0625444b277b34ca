//! Defines the endpoint for deleting a transaction.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, endpoints,
    flash::{NoticeLevel, redirect_with_notice},
    transaction::core::{TransactionId, delete_transaction},
};

/// The state needed to delete a transaction.
#[derive(Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that permanently deletes the transaction `id` and
/// redirects to the dashboard. Deleting an id that is already gone surfaces
/// as a notice, not a failure.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(id): Path<TransactionId>,
) -> Response {
    let connection = state.db_connection.lock().unwrap();

    if let Err(error) = delete_transaction(id, &connection) {
        return error.into_response();
    }

    redirect_with_notice(
        endpoints::DASHBOARD_VIEW,
        NoticeLevel::Success,
        "Transação excluída com sucesso!",
    )
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        entity::EntityKind,
        transaction::core::{
            Status, TransactionData, TransactionKind, all_transactions, create_transaction,
        },
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    fn get_state() -> DeleteTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
        }
    }

    #[tokio::test]
    async fn deletes_transaction_and_redirects() {
        let state = get_state();
        let id = {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(
                TransactionData {
                    kind: TransactionKind::Outflow,
                    entity_name: "João Silva".to_owned(),
                    entity_kind: EntityKind::Client,
                    category: "Outros".to_owned(),
                    description: "Sofa".to_owned(),
                    amount: 1234.50,
                    due_date: date!(2024 - 03 - 01),
                    status: Status::Pending,
                },
                &connection,
            )
            .unwrap()
            .id
        };

        let response = delete_transaction_endpoint(State(state.clone()), Path(id))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let connection = state.db_connection.lock().unwrap();
        assert!(all_transactions(&connection).unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_id_redirects_with_notice() {
        let state = get_state();

        let response = delete_transaction_endpoint(State(state), Path(999))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get("location")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(location.contains("level=erro"), "got {location:?}");
    }
}
