//! Defines the endpoint that turns a transaction into a prefilled WhatsApp
//! message and redirects the browser to the WhatsApp send link.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use rusqlite::Connection;
use time::{OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, SenderIdentity,
    format::{format_amount, format_date},
    transaction::{Transaction, TransactionId, get_transaction},
};

/// The timestamp stamped onto the message as its issue time.
const ISSUED_AT_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day]/[month]/[year] [hour]:[minute]:[second]");

/// The state needed to build a WhatsApp message link.
#[derive(Clone)]
pub struct TransactionWhatsAppState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The identity block stamped onto the message.
    pub sender: SenderIdentity,
}

impl FromRef<AppState> for TransactionWhatsAppState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            sender: state.sender.clone(),
        }
    }
}

/// A route handler that redirects to a WhatsApp link prefilled with a notice
/// for the transaction with `id`.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_transaction_whatsapp(
    State(state): State<TransactionWhatsAppState>,
    Path(id): Path<TransactionId>,
) -> Response {
    let transaction = {
        let connection = state.db_connection.lock().unwrap();

        match get_transaction(id, &connection) {
            Ok(transaction) => transaction,
            Err(error) => return error.into_response(),
        }
    };

    let issued_at = OffsetDateTime::now_utc();
    let message = whatsapp_message(&transaction, &state.sender, issued_at);

    Redirect::to(&whatsapp_link(&message)).into_response()
}

/// Compose the notice message with the transaction details and the sender
/// identity block. WhatsApp renders `*bold*` markup itself.
fn whatsapp_message(
    transaction: &Transaction,
    sender: &SenderIdentity,
    issued_at: OffsetDateTime,
) -> String {
    let timestamp = issued_at
        .format(ISSUED_AT_FORMAT)
        .unwrap_or_else(|_| issued_at.to_string());

    format!(
        "🔔 *Aviso de Transação - {name}*\n\n\
         👤 *Cliente / Entidade:* {entity}\n\
         💳 *Transação:* {description}\n\
         💰 *Valor:* R$ {amount}\n\
         🗂 *Categoria:* {category}\n\
         📅 *Vencimento:* {due_date}\n\
         ✅ *Status:* {status}\n\
         🕒 *Emitido em:* {timestamp}\n\n\
         {tagline}\n\n\
         📞 {phone} | ✉ {email} | 📸 {instagram}",
        name = sender.name,
        entity = transaction.entity_name,
        description = transaction.description,
        amount = format_amount(transaction.amount),
        category = transaction.category,
        due_date = format_date(transaction.due_date),
        status = transaction.status.as_str(),
        tagline = sender.tagline,
        phone = sender.phone,
        email = sender.email,
        instagram = sender.instagram,
    )
}

/// Build the `api.whatsapp.com` send link with the message percent-encoded.
fn whatsapp_link(message: &str) -> String {
    let query = serde_urlencoded::to_string([("text", message)]).unwrap_or_default();

    format!("https://api.whatsapp.com/send?{query}")
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
    use time::macros::{date, datetime};

    use crate::{
        SenderIdentity,
        db::initialize,
        entity::EntityKind,
        transaction::{Status, TransactionData, TransactionKind, create_transaction},
    };

    use super::{
        TransactionWhatsAppState, get_transaction_whatsapp, whatsapp_link, whatsapp_message,
    };

    fn sample_sender() -> SenderIdentity {
        SenderIdentity {
            name: "Aura Soluções em Mobiliários Planejados".to_owned(),
            phone: "(11) 98765-4321".to_owned(),
            email: "aura.moveisplanejados225@gmail.com".to_owned(),
            instagram: "@aura.moveisplanejados".to_owned(),
            tagline: "Esta mensagem foi gerada automaticamente pelo *AuraTech*, \
                      garantindo tecnologia, precisão e profissionalismo."
                .to_owned(),
        }
    }

    fn get_state() -> TransactionWhatsAppState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        TransactionWhatsAppState {
            db_connection: Arc::new(Mutex::new(conn)),
            sender: sample_sender(),
        }
    }

    fn sample_data() -> TransactionData {
        TransactionData {
            kind: TransactionKind::Inflow,
            entity_name: "João Silva".to_owned(),
            entity_kind: EntityKind::Client,
            category: "Móveis".to_owned(),
            description: "Sofa".to_owned(),
            amount: 1234.5,
            due_date: date!(2024 - 03 - 01),
            status: Status::Pending,
        }
    }

    #[test]
    fn message_contains_details_and_identity_block() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let transaction = create_transaction(sample_data(), &conn).unwrap();

        let message = whatsapp_message(
            &transaction,
            &sample_sender(),
            datetime!(2024-02-20 14:30:05 UTC),
        );

        assert!(message.starts_with(
            "🔔 *Aviso de Transação - Aura Soluções em Mobiliários Planejados*"
        ));
        assert!(message.contains("👤 *Cliente / Entidade:* João Silva"));
        assert!(message.contains("💰 *Valor:* R$ 1.234,50"));
        assert!(message.contains("📅 *Vencimento:* 01/03/2024"));
        assert!(message.contains("✅ *Status:* Pendente"));
        assert!(message.contains("🕒 *Emitido em:* 20/02/2024 14:30:05"));
        assert!(message.ends_with(
            "📞 (11) 98765-4321 | ✉ aura.moveisplanejados225@gmail.com | 📸 @aura.moveisplanejados"
        ));
    }

    #[test]
    fn link_percent_encodes_the_message() {
        let link = whatsapp_link("Olá mundo");

        assert!(link.starts_with("https://api.whatsapp.com/send?text="));
        assert!(!link.contains(' '));
    }

    #[tokio::test]
    async fn redirects_to_whatsapp() {
        let state = get_state();
        {
            let connection = state.db_connection.lock().unwrap();
            create_transaction(sample_data(), &connection).unwrap();
        }

        let response = get_transaction_whatsapp(State(state), Path(1))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response
            .headers()
            .get("location")
            .unwrap()
            .to_str()
            .unwrap();
        assert!(
            location.starts_with("https://api.whatsapp.com/send?text="),
            "got {location:?}"
        );
    }

    #[tokio::test]
    async fn missing_transaction_redirects_with_notice() {
        let state = get_state();

        let response = get_transaction_whatsapp(State(state), Path(42))
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
