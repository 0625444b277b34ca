//! The application's route URIs.
//!
//! For routes that take a parameter, e.g., '/transaction/edit/{id}', use
//! [format_endpoint].

/// The dashboard: totals, the full transaction list, pending breakdowns and
/// due-soon reminders.
pub const DASHBOARD_VIEW: &str = "/";
/// The page and endpoint for logging in.
pub const LOG_IN_VIEW: &str = "/login";
/// The route for logging out the current operator.
pub const LOG_OUT: &str = "/logout";
/// The page and endpoint for recording a new transaction.
pub const NEW_TRANSACTION_VIEW: &str = "/transaction/add";
/// The page and endpoint for editing an existing transaction.
pub const EDIT_TRANSACTION_VIEW: &str = "/transaction/edit/{id}";
/// The route for deleting a transaction.
pub const DELETE_TRANSACTION: &str = "/transaction/delete/{id}";
/// The route for downloading a transaction's receipt document.
pub const TRANSACTION_PDF: &str = "/transaction/pdf/{id}";
/// The route that redirects to a pre-filled WhatsApp message for a transaction.
pub const TRANSACTION_WHATSAPP: &str = "/transaction/whatsapp/{id}";
/// The route for downloading all transactions as a CSV file.
pub const EXPORT_CSV: &str = "/export/csv";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/transaction/edit/{id}', '{id}' is the
/// parameter.
///
/// This function assumes that an endpoint path only contains ASCII characters
/// and a single parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };
    let Some(param_end) = endpoint_path[param_start..].find('}') else {
        return endpoint_path.to_owned();
    };

    let mut formatted = endpoint_path[..param_start].to_owned();
    formatted.push_str(&id.to_string());
    formatted.push_str(&endpoint_path[param_start + param_end + 1..]);

    formatted
}

#[cfg(test)]
mod format_endpoint_tests {
    use super::{DELETE_TRANSACTION, EDIT_TRANSACTION_VIEW, LOG_IN_VIEW, format_endpoint};

    #[test]
    fn replaces_id_parameter() {
        assert_eq!(
            format_endpoint(EDIT_TRANSACTION_VIEW, 42),
            "/transaction/edit/42"
        );
        assert_eq!(
            format_endpoint(DELETE_TRANSACTION, 7),
            "/transaction/delete/7"
        );
    }

    #[test]
    fn returns_path_unchanged_without_parameter() {
        assert_eq!(format_endpoint(LOG_IN_VIEW, 1), LOG_IN_VIEW);
    }
}
