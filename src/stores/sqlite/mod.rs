//! SQLite-backed implementations of the storage ports.
//!
//! Each store shares a [Connection](rusqlite::Connection) behind an
//! `Arc<Mutex<…>>`, so the same connection can serve independent reads from
//! several stores. Dates travel through `rusqlite`'s `time` integration and
//! land in the database as ISO-8601 `YYYY-MM-DD` text (see
//! [db](crate::db) for the ordering invariant this relies on).

mod budget;
mod category;
mod transaction;

pub use budget::SQLiteBudgetStore;
pub use category::SQLiteCategoryStore;
pub use transaction::SQLiteTransactionStore;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::{models::CategoryType, period::BudgetPeriod};

impl ToSql for CategoryType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for CategoryType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            other => Err(FromSqlError::Other(
                format!("unknown category type \"{other}\"").into(),
            )),
        }
    }
}

impl ToSql for BudgetPeriod {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for BudgetPeriod {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(FromSqlError::Other(
                format!("unknown budget period \"{other}\"").into(),
            )),
        }
    }
}
