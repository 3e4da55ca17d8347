//! Defines the budget store trait.

use crate::{
    Error,
    database_id::DatabaseId,
    models::{Budget, NewBudget},
};

/// Handles the creation and retrieval of budgets.
pub trait BudgetStore {
    /// Create a new budget and add it to the store.
    ///
    /// The category-set and cap invariants were already checked when the
    /// [NewBudget] was constructed; implementations additionally verify that
    /// every referenced category exists.
    fn create(&self, new_budget: NewBudget) -> Result<Budget, Error>;

    /// Get a budget, with its category set, by its ID.
    fn get(&self, budget_id: DatabaseId) -> Result<Budget, Error>;

    /// Get all budgets, with their category sets.
    fn get_all(&self) -> Result<Vec<Budget>, Error>;

    /// Delete a budget and its category links.
    fn delete(&self, budget_id: DatabaseId) -> Result<(), Error>;
}
