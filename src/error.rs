//! Defines the crate level error type and its conversion from SQL errors.

use time::Date;

/// The errors that may occur while storing or aggregating budget data.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// The category ID used to create a transaction or budget did not match
    /// a valid category.
    #[error("the category ID does not refer to a valid category")]
    InvalidCategory,

    /// A date in the future was used to create a transaction.
    ///
    /// Transactions record events that have already happened, therefore
    /// future dates are not allowed.
    #[error("{0} is a date in the future, which is not allowed")]
    FutureDate(Date),

    /// A negative amount was used to create a transaction.
    ///
    /// Amounts are stored unsigned; whether a transaction counts as money
    /// spent or earned is decided by its category's type.
    #[error("transaction amounts must not be negative, got {0}")]
    NegativeAmount(f64),

    /// A budget was created without any categories.
    ///
    /// A budget with no categories would sum over nothing and always report
    /// zero spending, which masks a configuration mistake.
    #[error("a budget must cover at least one category")]
    EmptyBudgetCategories,

    /// A budget was created with a zero or negative maximum amount.
    #[error("budget maximum amounts must be positive, got {0}")]
    NonPositiveBudgetAmount(f64),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_))
                if sql_error.extended_code == 787 =>
            {
                Error::InvalidCategory
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
