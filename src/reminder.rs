//! Due-soon reminders: notices for pending transactions whose due date falls
//! within a fixed forward-looking window from today.

use time::{Date, Duration};

use crate::{
    format::{format_amount, format_date},
    transaction::Transaction,
};

/// How many days ahead the dashboard looks for upcoming due dates.
pub const DUE_SOON_HORIZON_DAYS: i64 = 5;

/// Collect a reminder line for each transaction due between `today` and
/// `today + horizon_days`, both ends inclusive. Past due dates are excluded;
/// there is no overdue tier.
pub fn due_soon(transactions: &[Transaction], today: Date, horizon_days: i64) -> Vec<String> {
    let horizon = today + Duration::days(horizon_days);

    transactions
        .iter()
        .filter(|transaction| today <= transaction.due_date && transaction.due_date <= horizon)
        .map(|transaction| {
            format!(
                "{} ({}) - R$ {} vence em {}",
                transaction.description,
                transaction.entity_name,
                format_amount(transaction.amount),
                format_date(transaction.due_date),
            )
        })
        .collect()
}
