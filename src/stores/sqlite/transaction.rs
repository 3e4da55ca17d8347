//! Implements a SQLite backed transaction store.
//!
//! The aggregate queries push the summing into SQL (`SUM`, `GROUP BY`,
//! `MIN`) so the store returns totals rather than row sets.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::Date;

use crate::{
    Error,
    database_id::DatabaseId,
    db::{CreateTable, MapRow},
    models::{CategoryType, NewTransaction, Transaction},
    period::Period,
    stores::{
        TransactionStore,
        sqlite::SQLiteCategoryStore,
        transaction::{CategoryTotal, DailyTotal},
    },
};

/// Stores transactions in a SQLite database.
///
/// Note that because a transaction depends on the
/// [Category](crate::models::Category) model, the category table must be set
/// up in the database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

/// Numbered SQL placeholders `?start` through `?start + count - 1`, joined
/// for an `IN (…)` clause.
fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|position| format!("?{position}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidCategory] if the new transaction's category ID does
    ///   not refer to a valid category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (amount, date, description, category_id)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, amount, date, description, category_id",
            )?
            .query_row(
                (
                    new_transaction.amount(),
                    new_transaction.date(),
                    new_transaction.description(),
                    new_transaction.category_id(),
                ),
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve a transaction in the database by its `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `id` does not refer to a valid transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, id: DatabaseId) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(
                "SELECT id, amount, date, description, category_id FROM \"transaction\"
                 WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(transaction)
    }

    /// Retrieve the transactions for `category_ids` dated within `range`,
    /// most recent first.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn transactions_in_range(
        &self,
        category_ids: &[DatabaseId],
        range: Period,
    ) -> Result<Vec<Transaction>, Error> {
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "SELECT id, amount, date, description, category_id FROM \"transaction\"
             WHERE date BETWEEN ?1 AND ?2 AND category_id IN ({})
             ORDER BY date DESC",
            placeholders(3, category_ids.len())
        );
        let params = range_and_id_params(range, category_ids);

        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(&query)?
            .query_map(params_from_iter(params.iter()), Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    /// Sum the amounts of the transactions for `category_ids` dated within
    /// `range`.
    ///
    /// Returns `0.0` when no transactions match, including when
    /// `category_ids` is empty.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn sum_in_range(&self, category_ids: &[DatabaseId], range: Period) -> Result<f64, Error> {
        if category_ids.is_empty() {
            return Ok(0.0);
        }

        let query = format!(
            "SELECT COALESCE(SUM(amount), 0.0) FROM \"transaction\"
             WHERE date BETWEEN ?1 AND ?2 AND category_id IN ({})",
            placeholders(3, category_ids.len())
        );
        let params = range_and_id_params(range, category_ids);

        let total = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(&query)?
            .query_row(params_from_iter(params.iter()), |row| row.get(0))?;

        Ok(total)
    }

    /// Sum and count transactions per category of `category_type`, ordered
    /// by total descending with ties broken by category ID ascending.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn totals_by_category(
        &self,
        category_type: CategoryType,
        range: Option<Period>,
    ) -> Result<Vec<CategoryTotal>, Error> {
        let mut query = String::from(
            "SELECT c.id, c.name, c.icon, c.category_type,
                    SUM(t.amount) AS total, COUNT(t.id) AS transaction_count
             FROM \"transaction\" t JOIN category c ON t.category_id = c.id
             WHERE c.category_type = ?1",
        );
        let mut params = vec![Value::Text(category_type.as_str().to_string())];

        if let Some(range) = range {
            query.push_str(" AND t.date BETWEEN ?2 AND ?3");
            params.push(Value::Text(range.start.to_string()));
            params.push(Value::Text(range.end.to_string()));
        }

        query.push_str(" GROUP BY c.id ORDER BY total DESC, c.id ASC");

        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(&query)?
            .query_map(params_from_iter(params.iter()), |row| {
                Ok(CategoryTotal {
                    category: SQLiteCategoryStore::map_row(row)?,
                    total: row.get("total")?,
                    count: row.get::<_, i64>("transaction_count")? as usize,
                })
            })?
            .map(|maybe_total| maybe_total.map_err(|error| error.into()))
            .collect()
    }

    /// Sum expense transactions per day within `range`, in date order.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn daily_totals(&self, range: Period) -> Result<Vec<DailyTotal>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(
                "SELECT t.date, SUM(t.amount)
                 FROM \"transaction\" t JOIN category c ON t.category_id = c.id
                 WHERE c.category_type = ?1 AND t.date BETWEEN ?2 AND ?3
                 GROUP BY t.date ORDER BY t.date ASC",
            )?
            .query_map(
                (CategoryType::Expense, range.start, range.end),
                |row| {
                    Ok(DailyTotal {
                        date: row.get(0)?,
                        total: row.get(1)?,
                    })
                },
            )?
            .map(|maybe_total| maybe_total.map_err(|error| error.into()))
            .collect()
    }

    /// The date of the earliest transaction for `category_ids`, or `None`
    /// when those categories have no transactions.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn earliest_date(&self, category_ids: &[DatabaseId]) -> Result<Option<Date>, Error> {
        if category_ids.is_empty() {
            return Ok(None);
        }

        let query = format!(
            "SELECT MIN(date) FROM \"transaction\" WHERE category_id IN ({})",
            placeholders(1, category_ids.len())
        );
        let params: Vec<Value> = category_ids.iter().map(|&id| Value::Integer(id)).collect();

        let earliest = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(&query)?
            .query_row(params_from_iter(params.iter()), |row| row.get(0))?;

        Ok(earliest)
    }
}

/// Parameter list for queries filtering by date range and category IDs: the
/// range endpoints first, then the IDs, matching [placeholders] starting at
/// position 3.
fn range_and_id_params(range: Period, category_ids: &[DatabaseId]) -> Vec<Value> {
    let mut params = vec![
        Value::Text(range.start.to_string()),
        Value::Text(range.end.to_string()),
    ];
    params.extend(category_ids.iter().map(|&id| Value::Integer(id)));

    params
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    amount REAL NOT NULL CHECK(amount >= 0),
                    date TEXT NOT NULL,
                    description TEXT NOT NULL,
                    category_id INTEGER NOT NULL,
                    FOREIGN KEY(category_id) REFERENCES category(id) ON UPDATE CASCADE ON DELETE CASCADE
                    )",
            (),
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date)",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let amount = row.get(offset + 1)?;
        let date = row.get(offset + 2)?;
        let description = row.get(offset + 3)?;
        let category_id = row.get(offset + 4)?;

        Ok(Transaction::new_unchecked(
            id,
            amount,
            date,
            description,
            category_id,
        ))
    }
}
