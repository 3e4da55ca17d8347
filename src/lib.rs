//! Budgetline is the accounting core of a personal finance tracker.
//!
//! It computes everything a budget detail screen or report dashboard needs
//! from a transaction store: rolling period boundaries, spending totals per
//! category set, the backward walk over a budget's historical periods, and
//! gap-filled trend series for charting. Rendering, navigation, and data
//! entry belong to the embedding application; this crate only reads and
//! aggregates.
//!
//! All "relative to now" computations take an explicit `today` date so that
//! callers control the clock and results are reproducible.

#![warn(missing_docs)]

pub mod accounting;
mod database_id;
pub mod db;
mod error;
mod logging;
pub mod models;
pub mod period;
pub mod reports;
pub mod stores;
pub mod trend;

pub use database_id::DatabaseId;
pub use error::Error;
pub use logging::init_tracing;
