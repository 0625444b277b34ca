//! Defines the endpoint that dumps the whole transaction store as a CSV file.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{Transaction, all_transactions},
};

/// The state needed to export the transaction store.
#[derive(Clone)]
pub struct ExportCsvState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExportCsvState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that downloads every transaction as `transacoes.csv`,
/// semicolon separated, with values in their stored form.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_export_csv(State(state): State<ExportCsvState>) -> Response {
    let transactions = {
        let connection = state.db_connection.lock().unwrap();

        match all_transactions(&connection) {
            Ok(transactions) => transactions,
            Err(error) => return error.into_response(),
        }
    };

    let bytes = match transactions_csv(&transactions) {
        Ok(bytes) => bytes,
        Err(error) => return error.into_response(),
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"transacoes.csv\"".to_owned(),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Serialize `transactions` with a semicolon separator and a header row
/// matching the database columns.
fn transactions_csv(transactions: &[Transaction]) -> Result<Vec<u8>, Error> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    writer
        .write_record([
            "id",
            "tipo",
            "entidade",
            "entidade_tipo",
            "categoria",
            "descricao",
            "valor",
            "data_vencimento",
            "status",
        ])
        .map_err(|error| Error::DocumentError(error.to_string()))?;

    for transaction in transactions {
        writer
            .write_record([
                transaction.id.to_string(),
                transaction.kind.as_str().to_owned(),
                transaction.entity_name.clone(),
                transaction.entity_kind.as_str().to_owned(),
                transaction.category.clone(),
                transaction.description.clone(),
                transaction.amount.to_string(),
                transaction.due_date.to_string(),
                transaction.status.as_str().to_owned(),
            ])
            .map_err(|error| Error::DocumentError(error.to_string()))?;
    }

    writer
        .into_inner()
        .map_err(|error| Error::DocumentError(error.to_string()))
}
