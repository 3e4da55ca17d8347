//! The domain models: plain data records validated at construction time.
//!
//! Business logic lives in the [accounting](crate::accounting),
//! [trend](crate::trend), and [reports](crate::reports) modules; the types
//! here only carry data between the stores and those computations.

mod budget;
mod category;
mod transaction;

pub use budget::{Budget, NewBudget};
pub use category::{Category, CategoryName, CategoryType};
pub use transaction::{NewTransaction, Transaction};
