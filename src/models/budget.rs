//! Defines the `Budget` type: a spending cap over a category set that
//! recurs every week or month.

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId, period::BudgetPeriod};

/// A recurring spending cap for a set of categories.
///
/// A budget stores no dates: its current boundaries are derived from the
/// period unit relative to "today" by the
/// [accounting](crate::accounting) module, so the budget rolls forward
/// automatically as time passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    id: DatabaseId,
    description: String,
    max_amount: f64,
    period: BudgetPeriod,
    category_ids: Vec<DatabaseId>,
}

impl Budget {
    /// Create a budget instance without validation.
    ///
    /// Intended for store implementations mapping database rows, which were
    /// validated when the row was inserted.
    pub fn new_unchecked(
        id: DatabaseId,
        description: String,
        max_amount: f64,
        period: BudgetPeriod,
        category_ids: Vec<DatabaseId>,
    ) -> Self {
        Self {
            id,
            description,
            max_amount,
            period,
            category_ids,
        }
    }

    /// The ID of the budget.
    pub fn id(&self) -> DatabaseId {
        self.id
    }

    /// A short description of what the budget covers.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The most that should be spent within one period. Always positive.
    pub fn max_amount(&self) -> f64 {
        self.max_amount
    }

    /// How often the budget resets.
    pub fn period(&self) -> BudgetPeriod {
        self.period
    }

    /// The categories whose spending counts against the cap. Never empty.
    pub fn category_ids(&self) -> &[DatabaseId] {
        &self.category_ids
    }
}

/// A validated, not yet stored budget.
///
/// Malformed budgets are rejected here, at construction, rather than at
/// computation time: aggregating over an empty category set silently returns
/// zero and a non-positive cap makes the percentage of budget used
/// undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    description: String,
    max_amount: f64,
    period: BudgetPeriod,
    category_ids: Vec<DatabaseId>,
}

impl NewBudget {
    /// Validate the data for a new budget.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveBudgetAmount] if `max_amount` is zero or
    ///   negative,
    /// - or [Error::EmptyBudgetCategories] if `category_ids` is empty.
    pub fn new(
        description: &str,
        max_amount: f64,
        period: BudgetPeriod,
        category_ids: Vec<DatabaseId>,
    ) -> Result<Self, Error> {
        if max_amount <= 0.0 {
            return Err(Error::NonPositiveBudgetAmount(max_amount));
        }

        if category_ids.is_empty() {
            return Err(Error::EmptyBudgetCategories);
        }

        Ok(Self {
            description: description.to_string(),
            max_amount,
            period,
            category_ids,
        })
    }

    /// A short description of what the budget covers.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The most that should be spent within one period.
    pub fn max_amount(&self) -> f64 {
        self.max_amount
    }

    /// How often the budget resets.
    pub fn period(&self) -> BudgetPeriod {
        self.period
    }

    /// The categories whose spending counts against the cap.
    pub fn category_ids(&self) -> &[DatabaseId] {
        &self.category_ids
    }
}

#[cfg(test)]
mod new_budget_tests {
    use super::NewBudget;
    use crate::{Error, period::BudgetPeriod};

    #[test]
    fn new_fails_on_empty_category_set() {
        let result = NewBudget::new("groceries", 500.0, BudgetPeriod::Week, vec![]);

        assert_eq!(result, Err(Error::EmptyBudgetCategories));
    }

    #[test]
    fn new_fails_on_non_positive_max_amount() {
        for amount in [0.0, -100.0] {
            let result = NewBudget::new("groceries", amount, BudgetPeriod::Week, vec![1]);

            assert_eq!(result, Err(Error::NonPositiveBudgetAmount(amount)));
        }
    }

    #[test]
    fn new_accepts_valid_budget() {
        let budget = NewBudget::new("groceries", 500.0, BudgetPeriod::Month, vec![1, 2]).unwrap();

        assert_eq!(budget.description(), "groceries");
        assert_eq!(budget.max_amount(), 500.0);
        assert_eq!(budget.period(), BudgetPeriod::Month);
        assert_eq!(budget.category_ids(), &[1, 2]);
    }
}
