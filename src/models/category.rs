//! Defines the `Category` type: a named, icon-tagged grouping that decides
//! whether its transactions count as money spent or money earned.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId};

/// Whether a category's transactions are expenses or income.
///
/// Transaction amounts are stored unsigned; the type of the referenced
/// category gives them their sign and meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    /// Money spent.
    Expense,
    /// Money earned.
    Income,
}

impl CategoryType {
    /// The fixed string form used in the database schema.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Income => "income",
        }
    }
}

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    /// This function will return an error if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for expenses or income, e.g., 'Groceries', 'Eating Out',
/// 'Wages'.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Category {
    id: DatabaseId,
    name: CategoryName,
    icon: String,
    category_type: CategoryType,
}

impl Category {
    /// Create a category instance.
    ///
    /// New categories should be created through
    /// [CategoryStore::create](crate::stores::CategoryStore::create), which
    /// assigns the ID.
    pub fn new(
        id: DatabaseId,
        name: CategoryName,
        icon: String,
        category_type: CategoryType,
    ) -> Self {
        Self {
            id,
            name,
            icon,
            category_type,
        }
    }

    /// The ID of the category.
    pub fn id(&self) -> DatabaseId {
        self.id
    }

    /// The name of the category.
    pub fn name(&self) -> &CategoryName {
        &self.name
    }

    /// The icon identifier shown next to the category in the UI.
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Whether the category's transactions are expenses or income.
    pub fn category_type(&self) -> CategoryType {
        self.category_type
    }
}

#[cfg(test)]
mod category_tests {
    use super::{CategoryName, CategoryType};
    use crate::Error;

    #[test]
    fn new_fails_on_empty_name() {
        assert_eq!(CategoryName::new(""), Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_accepts_nonempty_name() {
        let name = CategoryName::new("Groceries").unwrap();
        assert_eq!(name.as_ref(), "Groceries");
    }

    #[test]
    fn category_type_has_fixed_schema_strings() {
        assert_eq!(CategoryType::Expense.as_str(), "expense");
        assert_eq!(CategoryType::Income.as_str(), "income");
    }
}
