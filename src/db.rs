//! Database initialization.

use rusqlite::Connection;

use crate::{entity::create_entity_tables, transaction::create_transaction_table};

/// Create the transaction table and the three entity name registries if they
/// do not exist yet.
///
/// # Errors
/// Returns an error if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    create_transaction_table(connection)?;
    create_entity_tables(connection)?;

    Ok(())
}
