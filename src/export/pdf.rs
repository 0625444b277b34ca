//! Defines the endpoint that renders a transaction as a downloadable PDF
//! receipt.

use std::{
    io::BufWriter,
    sync::{Arc, Mutex},
};

use axum::{
    extract::{FromRef, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    format::{format_amount, format_date},
    transaction::{Transaction, TransactionId, get_transaction},
};

/// The state needed to render a PDF receipt.
#[derive(Clone)]
pub struct TransactionPdfState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionPdfState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that downloads a one-page receipt for the transaction with
/// `id`.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_transaction_pdf(
    State(state): State<TransactionPdfState>,
    Path(id): Path<TransactionId>,
) -> Response {
    let transaction = {
        let connection = state.db_connection.lock().unwrap();

        match get_transaction(id, &connection) {
            Ok(transaction) => transaction,
            Err(error) => return error.into_response(),
        }
    };

    let bytes = match receipt_pdf(&transaction) {
        Ok(bytes) => bytes,
        Err(error) => return error.into_response(),
    };

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"recibo_{id}.pdf\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

/// Lay out the receipt on a single A4 page and return the document bytes.
fn receipt_pdf(transaction: &Transaction) -> Result<Vec<u8>, Error> {
    let title = format!("Recibo - {}", transaction.kind.as_str());

    let (document, page, layer) = PdfDocument::new(&title, Mm(210.0), Mm(297.0), "Layer 1");
    let layer = document.get_page(page).get_layer(layer);

    let font = document
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|error| Error::DocumentError(error.to_string()))?;
    let font_bold = document
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|error| Error::DocumentError(error.to_string()))?;

    layer.use_text(&title, 16.0, Mm(20.0), Mm(270.0), &font_bold);

    let fields = [
        ("Entidade", transaction.entity_name.clone()),
        ("Categoria", transaction.category.clone()),
        ("Descrição", transaction.description.clone()),
        ("Valor", format!("R$ {}", format_amount(transaction.amount))),
        ("Vencimento", format_date(transaction.due_date)),
        ("Status", transaction.status.as_str().to_owned()),
    ];

    let mut y = 250.0;
    for (label, value) in fields {
        layer.use_text(format!("{label}: {value}"), 12.0, Mm(20.0), Mm(y), &font);
        y -= 10.0;
    }

    let mut writer = BufWriter::new(Vec::new());
    document
        .save(&mut writer)
        .map_err(|error| Error::DocumentError(error.to_string()))?;

    writer
        .into_inner()
        .map_err(|error| Error::DocumentError(error.to_string()))
}
