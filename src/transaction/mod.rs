//! Transaction management: the ledger's one table of financial movements.
//!
//! This module contains:
//! - The `Transaction` model, its enums and database functions
//! - The shared add/edit form and its validation
//! - Route handlers for the add, edit and delete flows

pub(crate) mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod edit_endpoint;
mod edit_page;
pub(crate) mod form;

pub use self::core::{
    Status, Totals, Transaction, TransactionData, TransactionId, TransactionKind,
    all_transactions, create_transaction, create_transaction_table, delete_transaction,
    get_transaction, pending_by_kind, totals, update_transaction,
};
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_new_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use edit_page::get_edit_transaction_page;
