//! Implements a SQLite backed budget store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::DatabaseId,
    db::{CreateTable, MapRow},
    models::{Budget, NewBudget},
    stores::BudgetStore,
};

/// Stores budgets and their category sets in a SQLite database.
///
/// The category set lives in a `budget_category` join table; deleting a
/// budget removes its links, and deleting a category removes it from any
/// budget that referenced it.
#[derive(Debug, Clone)]
pub struct SQLiteBudgetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteBudgetStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn category_ids(
        connection: &Connection,
        budget_id: DatabaseId,
    ) -> Result<Vec<DatabaseId>, rusqlite::Error> {
        connection
            .prepare(
                "SELECT category_id FROM budget_category WHERE budget_id = :id
                 ORDER BY category_id ASC",
            )?
            .query_map(&[(":id", &budget_id)], |row| row.get(0))?
            .collect()
    }
}

impl BudgetStore for SQLiteBudgetStore {
    /// Create a new budget and its category links in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidCategory] if any of the new budget's category IDs
    ///   does not refer to a valid category,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn create(&self, new_budget: NewBudget) -> Result<Budget, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let sql_transaction = connection.unchecked_transaction()?;

        let budget_id: DatabaseId = sql_transaction
            .prepare(
                "INSERT INTO budget (description, max_amount, period) VALUES (?1, ?2, ?3)
                 RETURNING id",
            )?
            .query_row(
                (
                    new_budget.description(),
                    new_budget.max_amount(),
                    new_budget.period(),
                ),
                |row| row.get(0),
            )?;

        {
            let mut statement = sql_transaction
                .prepare("INSERT INTO budget_category (budget_id, category_id) VALUES (?1, ?2)")?;

            for &category_id in new_budget.category_ids() {
                statement.execute((budget_id, category_id))?;
            }
        }

        sql_transaction.commit()?;

        Ok(Budget::new_unchecked(
            budget_id,
            new_budget.description().to_string(),
            new_budget.max_amount(),
            new_budget.period(),
            new_budget.category_ids().to_vec(),
        ))
    }

    /// Retrieve a budget, with its category set, by its `budget_id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `budget_id` does not refer to a valid budget,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn get(&self, budget_id: DatabaseId) -> Result<Budget, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let (id, description, max_amount, period) = connection
            .prepare("SELECT id, description, max_amount, period FROM budget WHERE id = :id")?
            .query_row(&[(":id", &budget_id)], Self::map_row)?;
        let category_ids = Self::category_ids(&connection, id)?;

        Ok(Budget::new_unchecked(
            id,
            description,
            max_amount,
            period,
            category_ids,
        ))
    }

    /// Retrieve all budgets with their category sets.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn get_all(&self) -> Result<Vec<Budget>, Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let rows: Vec<_> = connection
            .prepare("SELECT id, description, max_amount, period FROM budget ORDER BY id ASC")?
            .query_map([], Self::map_row)?
            .collect::<Result<_, _>>()?;

        rows.into_iter()
            .map(|(id, description, max_amount, period)| {
                let category_ids = Self::category_ids(&connection, id)?;

                Ok(Budget::new_unchecked(
                    id,
                    description,
                    max_amount,
                    period,
                    category_ids,
                ))
            })
            .collect()
    }

    /// Delete a budget and its category links.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NotFound] if `budget_id` does not refer to a valid budget,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn delete(&self, budget_id: DatabaseId) -> Result<(), Error> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| Error::DatabaseLockError)?;

        let rows_deleted = connection.execute("DELETE FROM budget WHERE id = ?1", [budget_id])?;

        if rows_deleted == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

impl CreateTable for SQLiteBudgetStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS budget (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    description TEXT NOT NULL,
                    max_amount REAL NOT NULL CHECK(max_amount > 0),
                    period TEXT NOT NULL CHECK(period IN ('week', 'month'))
                    )",
            (),
        )?;

        connection.execute(
            "CREATE TABLE IF NOT EXISTS budget_category (
                    budget_id INTEGER NOT NULL,
                    category_id INTEGER NOT NULL,
                    PRIMARY KEY (budget_id, category_id),
                    FOREIGN KEY(budget_id) REFERENCES budget(id) ON DELETE CASCADE,
                    FOREIGN KEY(category_id) REFERENCES category(id) ON DELETE CASCADE
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteBudgetStore {
    /// The budget row without its category set, which needs a second query.
    type ReturnType = (DatabaseId, String, f64, crate::period::BudgetPeriod);

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        Ok((
            row.get(offset)?,
            row.get(offset + 1)?,
            row.get(offset + 2)?,
            row.get(offset + 3)?,
        ))
    }
}

#[cfg(test)]
mod sqlite_budget_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        database_id::DatabaseId,
        db::initialize,
        models::{CategoryName, CategoryType, NewBudget},
        period::BudgetPeriod,
        stores::{BudgetStore, CategoryStore, sqlite::SQLiteCategoryStore},
    };

    use super::SQLiteBudgetStore;

    fn create_stores() -> (SQLiteBudgetStore, SQLiteCategoryStore) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        (
            SQLiteBudgetStore::new(connection.clone()),
            SQLiteCategoryStore::new(connection),
        )
    }

    fn create_category(store: &SQLiteCategoryStore, name: &str) -> DatabaseId {
        store
            .create(CategoryName::new(name).unwrap(), "tag", CategoryType::Expense)
            .unwrap()
            .id()
    }

    #[test]
    fn create_and_get_round_trips() {
        let (store, categories) = create_stores();
        let groceries = create_category(&categories, "Groceries");
        let transport = create_category(&categories, "Transport");

        let created = store
            .create(
                NewBudget::new(
                    "essentials",
                    800.0,
                    BudgetPeriod::Week,
                    vec![groceries, transport],
                )
                .unwrap(),
            )
            .unwrap();
        let fetched = store.get(created.id()).unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.description(), "essentials");
        assert_eq!(fetched.max_amount(), 800.0);
        assert_eq!(fetched.period(), BudgetPeriod::Week);
        assert_eq!(fetched.category_ids(), &[groceries, transport]);
    }

    #[test]
    fn create_fails_on_invalid_category_id() {
        let (store, categories) = create_stores();
        let groceries = create_category(&categories, "Groceries");

        let result = store.create(
            NewBudget::new("essentials", 800.0, BudgetPeriod::Week, vec![groceries, 999]).unwrap(),
        );

        assert_eq!(result, Err(Error::InvalidCategory));
    }

    #[test]
    fn get_fails_on_invalid_id() {
        let (store, _categories) = create_stores();

        assert_eq!(store.get(654), Err(Error::NotFound));
    }

    #[test]
    fn get_all_returns_every_budget() {
        let (store, categories) = create_stores();
        let groceries = create_category(&categories, "Groceries");
        let fun = create_category(&categories, "Eating Out");

        store
            .create(NewBudget::new("food", 500.0, BudgetPeriod::Month, vec![groceries]).unwrap())
            .unwrap();
        store
            .create(NewBudget::new("treats", 150.0, BudgetPeriod::Week, vec![fun]).unwrap())
            .unwrap();

        let budgets = store.get_all().unwrap();

        let descriptions: Vec<&str> = budgets
            .iter()
            .map(|budget| budget.description())
            .collect();
        assert_eq!(descriptions, vec!["food", "treats"]);
    }

    #[test]
    fn delete_removes_budget() {
        let (store, categories) = create_stores();
        let groceries = create_category(&categories, "Groceries");
        let budget = store
            .create(NewBudget::new("food", 500.0, BudgetPeriod::Month, vec![groceries]).unwrap())
            .unwrap();

        store.delete(budget.id()).unwrap();

        assert_eq!(store.get(budget.id()), Err(Error::NotFound));
    }

    #[test]
    fn delete_fails_on_invalid_id() {
        let (store, _categories) = create_stores();

        assert_eq!(store.delete(654), Err(Error::NotFound));
    }
}
