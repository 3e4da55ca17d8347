//! Defines the category store trait.

use crate::{
    Error,
    database_id::DatabaseId,
    models::{Category, CategoryName, CategoryType},
};

/// Handles the creation and retrieval of transaction categories.
pub trait CategoryStore {
    /// Create a new category and add it to the store.
    fn create(
        &self,
        name: CategoryName,
        icon: &str,
        category_type: CategoryType,
    ) -> Result<Category, Error>;

    /// Get a category by its ID.
    fn get(&self, category_id: DatabaseId) -> Result<Category, Error>;

    /// Get all categories, ordered by name.
    fn get_all(&self) -> Result<Vec<Category>, Error>;

    /// Get all categories of one type, ordered by name.
    fn get_by_type(&self, category_type: CategoryType) -> Result<Vec<Category>, Error>;
}
