//! Defines the core data model and database queries for transactions.

use std::str::FromStr;

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use time::Date;

use crate::{
    Error,
    entity::{EntityKind, upsert_entity},
    format::title_case,
};

/// The ID of a transaction, assigned by the database.
pub type TransactionId = i64;

/// The category used when the operator leaves the category field blank.
pub const DEFAULT_CATEGORY: &str = "Outros";

// ============================================================================
// MODELS
// ============================================================================

/// The direction of a transaction: money coming in or going out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// A receivable, displayed as "Entrada".
    Inflow,
    /// A payable, displayed as "Saída".
    Outflow,
}

impl TransactionKind {
    /// The stored and displayed label for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionKind::Inflow => "Entrada",
            TransactionKind::Outflow => "Saída",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "Entrada" => Ok(TransactionKind::Inflow),
            "Saída" => Ok(TransactionKind::Outflow),
            other => Err(Error::UnknownTransactionKind(other.to_owned())),
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// The payment lifecycle of a transaction.
///
/// Only [Status::Pending] carries business meaning: totals and due-soon
/// reminders filter on it. A paid transaction never resurfaces in either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Not yet settled, displayed as "Pendente".
    Pending,
    /// Settled, displayed as "Pago".
    Paid,
}

impl Status {
    /// The stored and displayed label for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "Pendente",
            Status::Paid => "Pago",
        }
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "Pendente" => Ok(Status::Pending),
            "Pago" => Ok(Status::Paid),
            other => Err(Error::UnknownStatus(other.to_owned())),
        }
    }
}

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// One financial movement: an expense or income tied to an entity, with a due
/// date and a payment status.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether money comes in or goes out.
    pub kind: TransactionKind,
    /// The counterparty's name, title-cased on write.
    pub entity_name: String,
    /// Which registry the counterparty belongs to.
    pub entity_kind: EntityKind,
    /// A free-text category, defaulting to [DEFAULT_CATEGORY].
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The amount of money, always non-negative in practice.
    pub amount: f64,
    /// When the transaction is due.
    pub due_date: Date,
    /// Whether the transaction has been settled.
    pub status: Status,
}

/// The fields of a transaction as submitted by the add and edit forms, before
/// a database ID is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionData {
    /// Whether money comes in or goes out.
    pub kind: TransactionKind,
    /// The counterparty's name as typed; normalized on write.
    pub entity_name: String,
    /// Which registry the counterparty belongs to.
    pub entity_kind: EntityKind,
    /// A free-text category; blank defaults to [DEFAULT_CATEGORY].
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The parsed amount.
    pub amount: f64,
    /// When the transaction is due.
    pub due_date: Date,
    /// Whether the transaction has been settled.
    pub status: Status,
}

impl TransactionData {
    /// Apply the write-time normalization rules: trim and title-case the
    /// entity name, default a blank category.
    fn normalize(mut self) -> Self {
        self.entity_name = title_case(&self.entity_name);

        if self.category.trim().is_empty() {
            self.category = DEFAULT_CATEGORY.to_owned();
        }

        self
    }
}

/// The aggregate view shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    /// Sum of pending inflows, 0 when there are none.
    pub receivable: f64,
    /// Sum of pending outflows, 0 when there are none.
    pub payable: f64,
    /// `receivable - payable`.
    pub balance: f64,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction and return it with its assigned ID.
///
/// Normalizes the entity name and category, and inserts the entity name into
/// the registry selected by the entity kind if it is not already there.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    data: TransactionData,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let data = data.normalize();

    upsert_entity(data.entity_kind, &data.entity_name, connection)?;

    let transaction = connection
        .prepare(
            "INSERT INTO transacoes (tipo, entidade, entidade_tipo, categoria, descricao, valor, data_vencimento, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             RETURNING id, tipo, entidade, entidade_tipo, categoria, descricao, valor, data_vencimento, status",
        )?
        .query_row(
            (
                data.kind,
                &data.entity_name,
                data.entity_kind,
                &data.category,
                &data.description,
                data.amount,
                data.due_date,
                data.status,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Overwrite every field of the transaction with `id`.
///
/// Applies the same normalization and registry upsert as
/// [create_transaction]. This is a full replace, not a partial patch.
///
/// # Errors
/// Returns an [Error::UpdateMissingTransaction] if `id` does not refer to a
/// transaction, leaving the store unchanged, or an [Error::SqlError] if there
/// is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    data: TransactionData,
    connection: &Connection,
) -> Result<(), Error> {
    let data = data.normalize();

    // Checking existence before the upsert keeps a failed update from
    // growing the registries.
    let exists: bool = connection.query_row(
        "SELECT EXISTS (SELECT 1 FROM transacoes WHERE id = ?1)",
        [id],
        |row| row.get(0),
    )?;

    if !exists {
        return Err(Error::UpdateMissingTransaction);
    }

    upsert_entity(data.entity_kind, &data.entity_name, connection)?;

    connection.execute(
        "UPDATE transacoes
         SET tipo = ?1, entidade = ?2, entidade_tipo = ?3, categoria = ?4,
             descricao = ?5, valor = ?6, data_vencimento = ?7, status = ?8
         WHERE id = ?9",
        (
            data.kind,
            &data.entity_name,
            data.entity_kind,
            &data.category,
            &data.description,
            data.amount,
            data.due_date,
            data.status,
            id,
        ),
    )?;

    Ok(())
}

/// Permanently delete the transaction with `id`. Registry entries are left
/// untouched.
///
/// # Errors
/// Returns an [Error::DeleteMissingTransaction] if `id` does not refer to a
/// transaction, or an [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM transacoes WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Retrieve a transaction by its `id`.
///
/// # Errors
/// Returns an [Error::NotFound] if `id` does not refer to a transaction, or an
/// [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, tipo, entidade, entidade_tipo, categoria, descricao, valor, data_vencimento, status
             FROM transacoes WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve all transactions, most recent due date first.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, tipo, entidade, entidade_tipo, categoria, descricao, valor, data_vencimento, status
             FROM transacoes ORDER BY data_vencimento DESC",
        )?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Retrieve the pending transactions of the given `kind`, used for the
/// accounts payable/receivable breakdowns and for due-soon scanning.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn pending_by_kind(
    kind: TransactionKind,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, tipo, entidade, entidade_tipo, categoria, descricao, valor, data_vencimento, status
             FROM transacoes WHERE tipo = :tipo AND status = :status
             ORDER BY data_vencimento",
        )?
        .query_map(
            &[(":tipo", kind.as_str()), (":status", Status::Pending.as_str())],
            map_transaction_row,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
        .collect()
}

/// Compute the receivable/payable totals over pending transactions and their
/// balance.
///
/// # Errors
/// Returns an [Error::SqlError] if there is an SQL error.
pub fn totals(connection: &Connection) -> Result<Totals, Error> {
    let sum_for = |kind: TransactionKind| -> Result<f64, Error> {
        let total: Option<f64> = connection.query_row(
            "SELECT SUM(valor) FROM transacoes WHERE tipo = :tipo AND status = :status",
            &[(":tipo", kind.as_str()), (":status", Status::Pending.as_str())],
            |row| row.get(0),
        )?;

        Ok(total.unwrap_or(0.0))
    };

    let receivable = sum_for(TransactionKind::Inflow)?;
    let payable = sum_for(TransactionKind::Outflow)?;

    Ok(Totals {
        receivable,
        payable,
        balance: receivable - payable,
    })
}

/// Create the transaction table.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transacoes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                tipo TEXT NOT NULL,
                entidade TEXT NOT NULL,
                entidade_tipo TEXT NOT NULL,
                categoria TEXT NOT NULL,
                descricao TEXT NOT NULL,
                valor REAL NOT NULL,
                data_vencimento TEXT NOT NULL,
                status TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        kind: row.get(1)?,
        entity_name: row.get(2)?,
        entity_kind: row.get(3)?,
        category: row.get(4)?,
        description: row.get(5)?,
        amount: row.get(6)?,
        due_date: row.get(7)?,
        status: row.get(8)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod database_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        db::initialize,
        entity::{EntityKind, entity_names},
    };

    use super::{
        Status, TransactionData, TransactionKind, all_transactions, create_transaction,
        delete_transaction, get_transaction, pending_by_kind, totals, update_transaction,
    };

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn sample_data() -> TransactionData {
        TransactionData {
            kind: TransactionKind::Outflow,
            entity_name: " joão silva ".to_owned(),
            entity_kind: EntityKind::Client,
            category: "".to_owned(),
            description: "Sofa".to_owned(),
            amount: 1234.50,
            due_date: date!(2024 - 03 - 01),
            status: Status::Pending,
        }
    }

    #[test]
    fn create_normalizes_and_registers_entity() {
        let conn = get_test_connection();

        let transaction = create_transaction(sample_data(), &conn).unwrap();

        assert_eq!(transaction.entity_name, "João Silva");
        assert_eq!(transaction.category, "Outros");
        assert_eq!(transaction.amount, 1234.50);
        assert_eq!(
            entity_names(EntityKind::Client, &conn).unwrap(),
            vec!["João Silva".to_owned()]
        );
    }

    #[test]
    fn create_keeps_non_blank_category() {
        let conn = get_test_connection();

        let transaction = create_transaction(
            TransactionData {
                category: "Móveis".to_owned(),
                ..sample_data()
            },
            &conn,
        )
        .unwrap();

        assert_eq!(transaction.category, "Móveis");
    }

    #[test]
    fn totals_cover_only_pending_rows() {
        let conn = get_test_connection();
        create_transaction(sample_data(), &conn).unwrap();
        create_transaction(
            TransactionData {
                kind: TransactionKind::Inflow,
                amount: 2000.0,
                ..sample_data()
            },
            &conn,
        )
        .unwrap();
        create_transaction(
            TransactionData {
                kind: TransactionKind::Inflow,
                amount: 500.0,
                status: Status::Paid,
                ..sample_data()
            },
            &conn,
        )
        .unwrap();

        let totals = totals(&conn).unwrap();

        assert_eq!(totals.payable, 1234.50);
        assert_eq!(totals.receivable, 2000.0);
        assert_eq!(totals.balance, totals.receivable - totals.payable);
    }

    #[test]
    fn totals_are_zero_on_empty_store() {
        let conn = get_test_connection();

        let totals = totals(&conn).unwrap();

        assert_eq!(totals.receivable, 0.0);
        assert_eq!(totals.payable, 0.0);
        assert_eq!(totals.balance, 0.0);
    }

    #[test]
    fn update_replaces_every_field() {
        let conn = get_test_connection();
        let transaction = create_transaction(sample_data(), &conn).unwrap();

        update_transaction(
            transaction.id,
            TransactionData {
                kind: TransactionKind::Inflow,
                entity_name: "maria souza".to_owned(),
                entity_kind: EntityKind::Collaborator,
                category: "Serviços".to_owned(),
                description: "Montagem".to_owned(),
                amount: 350.0,
                due_date: date!(2024 - 04 - 15),
                status: Status::Paid,
            },
            &conn,
        )
        .unwrap();

        let updated = get_transaction(transaction.id, &conn).unwrap();
        assert_eq!(updated.kind, TransactionKind::Inflow);
        assert_eq!(updated.entity_name, "Maria Souza");
        assert_eq!(updated.entity_kind, EntityKind::Collaborator);
        assert_eq!(updated.status, Status::Paid);
        assert_eq!(
            entity_names(EntityKind::Collaborator, &conn).unwrap(),
            vec!["Maria Souza".to_owned()]
        );
    }

    #[test]
    fn update_missing_id_fails_and_leaves_store_unchanged() {
        let conn = get_test_connection();

        let result = update_transaction(999, sample_data(), &conn);

        assert_eq!(result, Err(Error::UpdateMissingTransaction));
        assert!(all_transactions(&conn).unwrap().is_empty());
        assert!(entity_names(EntityKind::Client, &conn).unwrap().is_empty());
    }

    #[test]
    fn delete_removes_row_but_keeps_registry() {
        let conn = get_test_connection();
        let transaction = create_transaction(sample_data(), &conn).unwrap();

        delete_transaction(transaction.id, &conn).unwrap();

        assert!(all_transactions(&conn).unwrap().is_empty());
        assert_eq!(
            entity_names(EntityKind::Client, &conn).unwrap(),
            vec!["João Silva".to_owned()]
        );
    }

    #[test]
    fn delete_missing_id_fails() {
        let conn = get_test_connection();

        let result = delete_transaction(999, &conn);

        assert_eq!(result, Err(Error::DeleteMissingTransaction));
    }

    #[test]
    fn get_missing_id_fails() {
        let conn = get_test_connection();

        let result = get_transaction(1, &conn);

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn all_transactions_order_by_due_date_descending() {
        let conn = get_test_connection();
        for (day, description) in [(10, "meio"), (20, "fim"), (1, "começo")] {
            create_transaction(
                TransactionData {
                    due_date: date!(2024 - 03 - 01).replace_day(day).unwrap(),
                    description: description.to_owned(),
                    ..sample_data()
                },
                &conn,
            )
            .unwrap();
        }

        let transactions = all_transactions(&conn).unwrap();

        let descriptions: Vec<&str> = transactions
            .iter()
            .map(|transaction| transaction.description.as_str())
            .collect();
        assert_eq!(descriptions, vec!["fim", "meio", "começo"]);
    }

    #[test]
    fn pending_by_kind_filters_kind_and_status() {
        let conn = get_test_connection();
        create_transaction(sample_data(), &conn).unwrap();
        create_transaction(
            TransactionData {
                kind: TransactionKind::Inflow,
                ..sample_data()
            },
            &conn,
        )
        .unwrap();
        create_transaction(
            TransactionData {
                status: Status::Paid,
                ..sample_data()
            },
            &conn,
        )
        .unwrap();

        let payable = pending_by_kind(TransactionKind::Outflow, &conn).unwrap();
        let receivable = pending_by_kind(TransactionKind::Inflow, &conn).unwrap();

        assert_eq!(payable.len(), 1);
        assert_eq!(payable[0].kind, TransactionKind::Outflow);
        assert_eq!(payable[0].status, Status::Pending);
        assert_eq!(receivable.len(), 1);
    }
}
