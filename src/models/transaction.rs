//! Defines the `Transaction` type, the record every aggregation in this
//! crate is computed from.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::DatabaseId};

/// An expense or income, i.e. an event where money was either spent or
/// earned.
///
/// The amount is always non-negative; whether it was spent or earned is
/// decided by the type of the referenced category. To create a new
/// transaction, validate the input with [NewTransaction::new] and pass it to
/// [TransactionStore::create](crate::stores::TransactionStore::create).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: DatabaseId,
    amount: f64,
    date: Date,
    description: String,
    category_id: DatabaseId,
}

impl Transaction {
    /// Create a transaction instance without validation.
    ///
    /// Intended for store implementations mapping database rows, which were
    /// validated when the row was inserted.
    pub fn new_unchecked(
        id: DatabaseId,
        amount: f64,
        date: Date,
        description: String,
        category_id: DatabaseId,
    ) -> Self {
        Self {
            id,
            amount,
            date,
            description,
            category_id,
        }
    }

    /// The ID of the transaction.
    pub fn id(&self) -> DatabaseId {
        self.id
    }

    /// The amount of money spent or earned in this transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// When the transaction happened.
    pub fn date(&self) -> Date {
        self.date
    }

    /// A text description of what the transaction was for.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The category that gives this transaction its sign and meaning.
    pub fn category_id(&self) -> DatabaseId {
        self.category_id
    }
}

/// A validated, not yet stored transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    amount: f64,
    date: Date,
    description: String,
    category_id: DatabaseId,
}

impl NewTransaction {
    /// Validate the data for a new transaction.
    ///
    /// `today` is the caller's current date; it is a parameter rather than
    /// an ambient clock so validation is reproducible in tests.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NegativeAmount] if `amount` is less than zero,
    /// - or [Error::FutureDate] if `date` is later than `today`.
    pub fn new(
        amount: f64,
        date: Date,
        description: &str,
        category_id: DatabaseId,
        today: Date,
    ) -> Result<Self, Error> {
        if amount < 0.0 {
            return Err(Error::NegativeAmount(amount));
        }

        if date > today {
            return Err(Error::FutureDate(date));
        }

        Ok(Self {
            amount,
            date,
            description: description.to_string(),
            category_id,
        })
    }

    /// The amount of money spent or earned.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// When the transaction happened.
    pub fn date(&self) -> Date {
        self.date
    }

    /// A text description of what the transaction was for.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The category the transaction belongs to.
    pub fn category_id(&self) -> DatabaseId {
        self.category_id
    }
}

#[cfg(test)]
mod new_transaction_tests {
    use time::macros::date;

    use super::NewTransaction;
    use crate::Error;

    #[test]
    fn new_accepts_today_and_past_dates() {
        let today = date!(2024 - 03 - 15);

        for date in [today, date!(2024 - 03 - 01), date!(2019 - 12 - 31)] {
            let result = NewTransaction::new(12.3, date, "lunch", 1, today);
            assert!(result.is_ok(), "date {date} should be accepted");
        }
    }

    #[test]
    fn new_fails_on_future_date() {
        let today = date!(2024 - 03 - 15);
        let tomorrow = date!(2024 - 03 - 16);

        let result = NewTransaction::new(12.3, tomorrow, "lunch", 1, today);

        assert_eq!(result, Err(Error::FutureDate(tomorrow)));
    }

    #[test]
    fn new_fails_on_negative_amount() {
        let today = date!(2024 - 03 - 15);

        let result = NewTransaction::new(-0.01, today, "refund?", 1, today);

        assert_eq!(result, Err(Error::NegativeAmount(-0.01)));
    }
}
