//! Defines and implements traits for interacting with the application's
//! database.
//!
//! Dates are stored as ISO-8601 `YYYY-MM-DD` TEXT columns. For that fixed
//! format, lexical order equals chronological order, which is what makes
//! `BETWEEN` range predicates and `MIN(date)` correct. Store implementations
//! rely on this invariant and must not write dates in any other format.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    stores::sqlite::{SQLiteBudgetStore, SQLiteCategoryStore, SQLiteTransactionStore},
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create the table(s) for the model.
    ///
    /// # Errors
    /// Returns an error if the table already exists or if there is an SQL
    /// error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping a `rusqlite::Row` from a SQLite database to a
/// concrete rust type.
pub trait MapRow {
    /// The type to map rows to.
    type ReturnType;

    /// Convert a row to [Self::ReturnType], reading from the first column.
    ///
    /// # Errors
    /// Returns an error if a column is missing or cannot be converted.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row to [Self::ReturnType], reading from the column at
    /// `offset`. Useful for rows produced by joins.
    ///
    /// # Errors
    /// Returns an error if a column is missing or cannot be converted.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Create the tables for the domain models and enable foreign key
/// enforcement.
///
/// Must be called on a new connection before constructing any of the SQLite
/// stores.
///
/// # Errors
/// Returns an [Error::SqlError] if the schema could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute("PRAGMA foreign_keys = ON", ())?;

    SQLiteCategoryStore::create_table(connection)?;
    SQLiteTransactionStore::create_table(connection)?;
    SQLiteBudgetStore::create_table(connection)?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_creates_schema() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("could not initialize schema");

        let count: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('category', 'transaction', 'budget', 'budget_category')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn iso_dates_sort_chronologically() {
        // The lexical-order invariant the schema relies on: TEXT comparison
        // of YYYY-MM-DD dates must match date comparison across month and
        // year boundaries.
        let connection = Connection::open_in_memory().unwrap();
        let ordered: Vec<String> = connection
            .prepare(
                "SELECT column1 FROM (VALUES ('2024-03-15'), ('2024-12-01'), ('2023-12-31'),
                 ('2024-03-02')) ORDER BY column1 ASC",
            )
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            ordered,
            vec!["2023-12-31", "2024-03-02", "2024-03-15", "2024-12-01"]
        );
    }
}
