//! The entity name registries: the counterparties transactions refer to.
//!
//! Each registry is an append-only set of unique names, populated as a side
//! effect of recording transactions and used only to power the autocomplete
//! suggestions on the transaction form. There is no delete path.

use std::str::FromStr;

use rusqlite::{
    Connection,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};

use crate::Error;

/// Which registry a transaction's entity name belongs to.
///
/// The mapping from kind to registry table is fixed and exhaustive; unknown
/// kind strings are rejected at the boundary with
/// [Error::UnknownEntityKind].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// A paying customer.
    Client,
    /// Someone who works with the business and gets paid.
    Collaborator,
    /// A fixed-expense payee, e.g. the landlord or the power company.
    GeneralExpense,
}

impl EntityKind {
    /// Every kind, in form display order.
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Client,
        EntityKind::Collaborator,
        EntityKind::GeneralExpense,
    ];

    /// The stored and displayed label for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Client => "Cliente",
            EntityKind::Collaborator => "Colaborador",
            EntityKind::GeneralExpense => "Despesa Geral",
        }
    }

    /// The registry table that holds names of this kind.
    fn table(self) -> &'static str {
        match self {
            EntityKind::Client => "clientes",
            EntityKind::Collaborator => "colaboradores",
            EntityKind::GeneralExpense => "despesas_fixas",
        }
    }
}

impl FromStr for EntityKind {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text {
            "Cliente" => Ok(EntityKind::Client),
            "Colaborador" => Ok(EntityKind::Collaborator),
            "Despesa Geral" => Ok(EntityKind::GeneralExpense),
            other => Err(Error::UnknownEntityKind(other.to_owned())),
        }
    }
}

impl ToSql for EntityKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EntityKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

/// Insert `name` into the registry selected by `kind` if it is not already
/// there. Existing entries are never overwritten.
pub fn upsert_entity(kind: EntityKind, name: &str, connection: &Connection) -> Result<(), Error> {
    let statement = match kind {
        EntityKind::Client => "INSERT OR IGNORE INTO clientes (nome) VALUES (?1)",
        EntityKind::Collaborator => "INSERT OR IGNORE INTO colaboradores (nome) VALUES (?1)",
        EntityKind::GeneralExpense => "INSERT OR IGNORE INTO despesas_fixas (nome) VALUES (?1)",
    };

    connection.execute(statement, (name,))?;

    Ok(())
}

/// Retrieve all names in the registry selected by `kind`, ordered
/// alphabetically.
pub fn entity_names(kind: EntityKind, connection: &Connection) -> Result<Vec<String>, Error> {
    connection
        .prepare(&format!("SELECT nome FROM {} ORDER BY nome;", kind.table()))?
        .query_map([], |row| row.get(0))?
        .map(|maybe_name| maybe_name.map_err(|error| error.into()))
        .collect()
}

/// The autocomplete suggestions for the transaction form, one list per
/// registry.
#[derive(Debug, Default, PartialEq)]
pub struct Suggestions {
    /// Known client names.
    pub clients: Vec<String>,
    /// Known collaborator names.
    pub collaborators: Vec<String>,
    /// Known fixed-expense payee names.
    pub expenses: Vec<String>,
}

impl Suggestions {
    /// Load the three registries.
    pub fn load(connection: &Connection) -> Result<Self, Error> {
        Ok(Self {
            clients: entity_names(EntityKind::Client, connection)?,
            collaborators: entity_names(EntityKind::Collaborator, connection)?,
            expenses: entity_names(EntityKind::GeneralExpense, connection)?,
        })
    }
}

/// Create the three registry tables.
pub fn create_entity_tables(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS clientes (nome TEXT PRIMARY KEY);
         CREATE TABLE IF NOT EXISTS colaboradores (nome TEXT PRIMARY KEY);
         CREATE TABLE IF NOT EXISTS despesas_fixas (nome TEXT PRIMARY KEY);",
    )
}

#[cfg(test)]
mod entity_kind_tests {
    use crate::Error;

    use super::EntityKind;

    #[test]
    fn parses_known_kinds() {
        assert_eq!("Cliente".parse(), Ok(EntityKind::Client));
        assert_eq!("Colaborador".parse(), Ok(EntityKind::Collaborator));
        assert_eq!("Despesa Geral".parse(), Ok(EntityKind::GeneralExpense));
    }

    #[test]
    fn rejects_unknown_kinds() {
        assert_eq!(
            "Fornecedor".parse::<EntityKind>(),
            Err(Error::UnknownEntityKind("Fornecedor".to_owned()))
        );
    }
}

#[cfg(test)]
mod registry_tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    use super::{EntityKind, Suggestions, entity_names, upsert_entity};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn upsert_is_idempotent() {
        let conn = get_test_connection();

        upsert_entity(EntityKind::Client, "João Silva", &conn).unwrap();
        upsert_entity(EntityKind::Client, "João Silva", &conn).unwrap();

        let names = entity_names(EntityKind::Client, &conn).unwrap();
        assert_eq!(names, vec!["João Silva".to_owned()]);
    }

    #[test]
    fn names_are_ordered_alphabetically() {
        let conn = get_test_connection();
        upsert_entity(EntityKind::Collaborator, "Pedro", &conn).unwrap();
        upsert_entity(EntityKind::Collaborator, "Ana", &conn).unwrap();

        let names = entity_names(EntityKind::Collaborator, &conn).unwrap();

        assert_eq!(names, vec!["Ana".to_owned(), "Pedro".to_owned()]);
    }

    #[test]
    fn registries_are_independent() {
        let conn = get_test_connection();
        upsert_entity(EntityKind::Client, "Maria", &conn).unwrap();
        upsert_entity(EntityKind::GeneralExpense, "Aluguel", &conn).unwrap();

        let suggestions = Suggestions::load(&conn).unwrap();

        assert_eq!(suggestions.clients, vec!["Maria".to_owned()]);
        assert!(suggestions.collaborators.is_empty());
        assert_eq!(suggestions.expenses, vec!["Aluguel".to_owned()]);
    }
}
