//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::DatabaseId,
    db::{CreateTable, MapRow},
    models::{Category, CategoryName, CategoryType},
    stores::CategoryStore,
};

/// Stores categories in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a new category in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn create(
        &self,
        name: CategoryName,
        icon: &str,
        category_type: CategoryType,
    ) -> Result<Category, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let category = connection
            .prepare(
                "INSERT INTO category (name, icon, category_type) VALUES (?1, ?2, ?3)
                 RETURNING id, name, icon, category_type",
            )?
            .query_row((name.as_ref(), icon, category_type), Self::map_row)?;

        Ok(category)
    }

    /// Retrieve a category in the database by its `category_id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `category_id` does not refer to a valid
    ///   category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, category_id: DatabaseId) -> Result<Category, Error> {
        let category = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare("SELECT id, name, icon, category_type FROM category WHERE id = :id")?
            .query_row(&[(":id", &category_id)], Self::map_row)?;

        Ok(category)
    }

    /// Retrieve all categories, ordered by name.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn get_all(&self) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare("SELECT id, name, icon, category_type FROM category ORDER BY name ASC")?
            .query_map([], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }

    /// Retrieve all categories of `category_type`, ordered by name.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn get_by_type(&self, category_type: CategoryType) -> Result<Vec<Category>, Error> {
        self.connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?
            .prepare(
                "SELECT id, name, icon, category_type FROM category
                 WHERE category_type = ?1 ORDER BY name ASC",
            )?
            .query_map([category_type], Self::map_row)?
            .map(|maybe_category| maybe_category.map_err(|error| error.into()))
            .collect()
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS category (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    icon TEXT NOT NULL,
                    category_type TEXT NOT NULL CHECK(category_type IN ('expense', 'income'))
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let name: String = row.get(offset + 1)?;
        let icon: String = row.get(offset + 2)?;
        let category_type = row.get(offset + 3)?;

        Ok(Category::new(
            id,
            CategoryName::new_unchecked(&name),
            icon,
            category_type,
        ))
    }
}

#[cfg(test)]
mod sqlite_category_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::{CategoryName, CategoryType},
        stores::CategoryStore,
    };

    use super::SQLiteCategoryStore;

    fn create_store() -> SQLiteCategoryStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteCategoryStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn create_succeeds() {
        let store = create_store();
        let name = CategoryName::new("Groceries").unwrap();

        let category = store
            .create(name.clone(), "cart", CategoryType::Expense)
            .unwrap();

        assert_eq!(category.name(), &name);
        assert_eq!(category.icon(), "cart");
        assert_eq!(category.category_type(), CategoryType::Expense);
    }

    #[test]
    fn get_category_by_id_succeeds() {
        let store = create_store();
        let category = store
            .create(
                CategoryName::new("Wages").unwrap(),
                "banknote",
                CategoryType::Income,
            )
            .unwrap();

        let selected_category = store.get(category.id());

        assert_eq!(Ok(category), selected_category);
    }

    #[test]
    fn get_category_fails_on_invalid_id() {
        let store = create_store();
        let category = store
            .create(
                CategoryName::new("Wages").unwrap(),
                "banknote",
                CategoryType::Income,
            )
            .unwrap();

        let maybe_category = store.get(category.id() + 654);

        assert_eq!(maybe_category, Err(Error::NotFound));
    }

    #[test]
    fn get_by_type_filters_and_orders_by_name() {
        let store = create_store();
        for (name, category_type) in [
            ("Transport", CategoryType::Expense),
            ("Wages", CategoryType::Income),
            ("Groceries", CategoryType::Expense),
        ] {
            store
                .create(CategoryName::new(name).unwrap(), "tag", category_type)
                .unwrap();
        }

        let expenses = store.get_by_type(CategoryType::Expense).unwrap();

        let names: Vec<&str> = expenses
            .iter()
            .map(|category| category.name().as_ref())
            .collect();
        assert_eq!(names, vec!["Groceries", "Transport"]);
    }
}
