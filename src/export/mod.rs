//! Ways to get a transaction out of the app: a PDF receipt, a CSV dump of the
//! whole store and a prefilled WhatsApp message link.

mod csv;
mod pdf;
mod whatsapp;

pub use csv::{ExportCsvState, get_export_csv};
pub use pdf::{TransactionPdfState, get_transaction_pdf};
pub use whatsapp::{TransactionWhatsAppState, get_transaction_whatsapp};
