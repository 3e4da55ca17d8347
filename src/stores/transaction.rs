//! Defines the transaction store trait and its aggregate row types.

use serde::Serialize;
use time::Date;

use crate::{
    Error,
    database_id::DatabaseId,
    models::{Category, CategoryType, NewTransaction, Transaction},
    period::Period,
};

/// One category's summed activity within a type and date-range query.
///
/// Ephemeral report aggregate, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category the transactions belong to.
    pub category: Category,
    /// The sum of the matching transaction amounts.
    pub total: f64,
    /// How many transactions were summed.
    pub count: usize,
}

/// The summed expense amount of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyTotal {
    /// The day the transactions happened.
    pub date: Date,
    /// The sum of the day's expense amounts.
    pub total: f64,
}

/// Handles the creation, retrieval, and aggregation of transactions.
///
/// The aggregation operations return totals, never row sets, so that the
/// database does the summing; the calling computations only combine totals.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    fn create(&self, new_transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve a transaction from the store.
    fn get(&self, id: DatabaseId) -> Result<Transaction, Error>;

    /// Retrieve the transactions belonging to `category_ids` dated within
    /// `range` (inclusive), most recent first.
    fn transactions_in_range(
        &self,
        category_ids: &[DatabaseId],
        range: Period,
    ) -> Result<Vec<Transaction>, Error>;

    /// Sum the amounts of the transactions belonging to `category_ids` dated
    /// within `range` (inclusive).
    ///
    /// Returns exactly `0.0` when no transactions match; callers never see a
    /// missing-value sentinel.
    fn sum_in_range(&self, category_ids: &[DatabaseId], range: Period) -> Result<f64, Error>;

    /// Sum and count transactions per category for all categories of
    /// `category_type`, optionally restricted to `range`.
    ///
    /// Categories without any matching transactions are omitted. The result
    /// is ordered by total descending; ties are broken by category ID
    /// ascending so the order is deterministic.
    fn totals_by_category(
        &self,
        category_type: CategoryType,
        range: Option<Period>,
    ) -> Result<Vec<CategoryTotal>, Error>;

    /// Sum expense transactions per day within `range`, in date order.
    ///
    /// Only days with at least one transaction appear in the result;
    /// gap-filling silent days is the trend bucketer's job.
    fn daily_totals(&self, range: Period) -> Result<Vec<DailyTotal>, Error>;

    /// The date of the earliest transaction belonging to `category_ids`, or
    /// `None` if those categories have no transactions at all.
    fn earliest_date(&self, category_ids: &[DatabaseId]) -> Result<Option<Date>, Error>;
}
