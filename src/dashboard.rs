//! The dashboard: totals, the full transaction list, the pending
//! payable/receivable breakdowns and the due-soon reminder banners.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, endpoints,
    flash::{NoticeLevel, NoticeQuery, notice_banner},
    format::{format_amount, format_date},
    html::{base, render},
    navigation::NavBar,
    reminder::{DUE_SOON_HORIZON_DAYS, due_soon},
    transaction::{
        Totals, Transaction, TransactionKind, all_transactions, pending_by_kind, totals,
    },
};

/// The state needed to display the dashboard.
#[derive(Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Everything the dashboard shows, loaded in one pass over the store.
struct DashboardData {
    totals: Totals,
    transactions: Vec<Transaction>,
    payable: Vec<Transaction>,
    receivable: Vec<Transaction>,
}

impl DashboardData {
    fn load(connection: &Connection) -> Result<Self, crate::Error> {
        Ok(Self {
            totals: totals(connection)?,
            transactions: all_transactions(connection)?,
            payable: pending_by_kind(TransactionKind::Outflow, connection)?,
            receivable: pending_by_kind(TransactionKind::Inflow, connection)?,
        })
    }
}

/// Display the dashboard.
///
/// Due-soon reminders are recomputed on every render from the pending
/// breakdowns; a one-shot notice from a redirect is rendered above them.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Query(notice): Query<NoticeQuery>,
) -> Response {
    let data = {
        let connection = state.db_connection.lock().unwrap();

        match DashboardData::load(&connection) {
            Ok(data) => data,
            Err(error) => {
                // The dashboard is the safe page errors redirect to, so it
                // renders its own failure instead of redirecting to itself.
                tracing::error!("Could not load the dashboard: {error}");
                return render(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    base(
                        "Painel",
                        notice_banner(
                            NoticeLevel::Error,
                            "Não foi possível carregar o painel. Verifique os registros do servidor.",
                        ),
                    ),
                );
            }
        }
    };

    let today = OffsetDateTime::now_utc().date();
    let payable_reminders = due_soon(&data.payable, today, DUE_SOON_HORIZON_DAYS);
    let receivable_reminders = due_soon(&data.receivable, today, DUE_SOON_HORIZON_DAYS);

    let content = html! {
        (NavBar::new().into_html())

        @if let Some(banner) = notice.into_banner()
        {
            (banner)
        }

        @if !payable_reminders.is_empty()
        {
            (notice_banner(
                NoticeLevel::Warning,
                &format!("💡 Contas a pagar próximas: {}", payable_reminders.join("; ")),
            ))
        }

        @if !receivable_reminders.is_empty()
        {
            (notice_banner(
                NoticeLevel::Success,
                &format!("💡 Contas a receber próximas: {}", receivable_reminders.join("; ")),
            ))
        }

        div class="cards"
        {
            (total_card("A receber", data.totals.receivable))
            (total_card("A pagar", data.totals.payable))
            (total_card("Saldo", data.totals.balance))
        }

        h2 { "Contas a pagar pendentes" }
        (transaction_table(&data.payable, false))

        h2 { "Contas a receber pendentes" }
        (transaction_table(&data.receivable, false))

        h2 { "Todas as transações" }
        (transaction_table(&data.transactions, true))
    };

    render(StatusCode::OK, base("Painel", content))
}

fn total_card(label: &str, value: f64) -> Markup {
    html! {
        div class="card"
        {
            div class="label" { (label) }
            div class="value" { "R$ " (format_amount(value)) }
        }
    }
}

fn transaction_table(transactions: &[Transaction], with_actions: bool) -> Markup {
    html! {
        @if transactions.is_empty()
        {
            p { "Nenhuma transação." }
        }
        @else
        {
            table
            {
                thead
                {
                    tr
                    {
                        th { "Tipo" }
                        th { "Entidade" }
                        th { "Categoria" }
                        th { "Descrição" }
                        th class="amount" { "Valor" }
                        th { "Vencimento" }
                        th { "Status" }
                        @if with_actions { th { "Ações" } }
                    }
                }
                tbody
                {
                    @for transaction in transactions
                    {
                        tr
                        {
                            td { (transaction.kind.as_str()) }
                            td { (transaction.entity_name) }
                            td { (transaction.category) }
                            td { (transaction.description) }
                            td class="amount" { "R$ " (format_amount(transaction.amount)) }
                            td { (format_date(transaction.due_date)) }
                            td { (transaction.status.as_str()) }
                            @if with_actions
                            {
                                td class="actions"
                                {
                                    a href=(endpoints::format_endpoint(endpoints::EDIT_TRANSACTION_VIEW, transaction.id))
                                    {
                                        "Editar"
                                    }
                                    a href=(endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id))
                                    {
                                        "Excluir"
                                    }
                                    a href=(endpoints::format_endpoint(endpoints::TRANSACTION_PDF, transaction.id))
                                    {
                                        "Recibo"
                                    }
                                    a href=(endpoints::format_endpoint(endpoints::TRANSACTION_WHATSAPP, transaction.id))
                                    {
                                        "WhatsApp"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
