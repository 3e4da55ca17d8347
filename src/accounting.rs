//! The budget accounting engine: how much of a budget has been used in the
//! current rolling period, and how spending looked in every period before
//! it.
//!
//! A budget stores no dates, so every computation here derives its
//! boundaries from the budget's period unit relative to a caller-supplied
//! `today`. Spend totals degrade to zero on storage faults rather than
//! failing, so a flaky store can never take down a budget screen; listing
//! operations propagate their errors instead.

use serde::Serialize;
use time::Date;

use crate::{
    Error,
    models::Budget,
    period::{Period, compute_period, periods_between},
    stores::TransactionStore,
    trend::{TrendSeries, budget_trend},
};

/// How far through its cap a budget is, as a three-tier classification for
/// the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// Less than 60% of the cap spent.
    Low,
    /// Between 60% and 94% of the cap spent.
    Medium,
    /// 95% or more of the cap spent.
    High,
}

impl BudgetStatus {
    /// Classify a percentage of budget used.
    ///
    /// The breakpoints are fixed: below 60 is [Low](Self::Low), 60 to 94 is
    /// [Medium](Self::Medium), 95 and above is [High](Self::High).
    pub fn from_percentage(percentage: u32) -> Self {
        if percentage < 60 {
            Self::Low
        } else if percentage < 95 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// The spending total of one historical budget period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSpending {
    /// The period's calendar boundaries.
    pub period: Period,
    /// The sum of the budget's transactions within the period.
    pub total_spent: f64,
}

/// Everything a budget detail screen needs, computed in one call by
/// [compute_budget_view].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetView {
    /// The sum of the budget's transactions in the current period.
    pub total_spent: f64,
    /// Whole percentage of the cap used, rounded down.
    pub percentage: u32,
    /// The three-tier classification of `percentage`.
    pub status: BudgetStatus,
    /// Spending totals for every prior period, most recent first.
    pub previous_periods: Vec<PeriodSpending>,
    /// The cumulative spend series for the current period.
    pub trend: TrendSeries,
}

/// The sum of `budget`'s transactions within the period `offset` units from
/// the one containing `today`.
///
/// A storage fault is logged and reported as `0.0`: a spending total must
/// never block the budget view from rendering.
pub fn total_spent(
    store: &impl TransactionStore,
    budget: &Budget,
    offset: i64,
    today: Date,
) -> f64 {
    let range = compute_period(budget.period().unit(), offset, today);

    match store.sum_in_range(budget.category_ids(), range) {
        Ok(total) => total,
        Err(error) => {
            tracing::warn!(
                "could not sum transactions for budget {}: {error}",
                budget.id()
            );
            0.0
        }
    }
}

/// Whole percentage of `max_amount` covered by `total_spent`, rounded down.
///
/// Returns 0 for a non-positive `max_amount` instead of dividing by zero.
pub fn percentage_used(total_spent: f64, max_amount: f64) -> u32 {
    if max_amount <= 0.0 {
        return 0;
    }

    (total_spent / max_amount * 100.0).floor() as u32
}

/// Spending totals for every period before the current one, most recent
/// first, walking backward until the budget's transaction history runs out.
///
/// Returns an empty list when the budget has no transactions at all, or
/// when its earliest transaction falls inside the current period (there is
/// no *prior* period to report). `limit` keeps only the most recent N past
/// periods.
///
/// The walk issues one aggregate query per period; per-period failures
/// degrade to zero like [total_spent], but a failure to find the earliest
/// transaction date propagates as a failed load.
///
/// # Errors
/// Returns an [Error::SqlError] if the earliest-transaction query fails.
pub fn previous_periods(
    store: &impl TransactionStore,
    budget: &Budget,
    limit: Option<usize>,
    today: Date,
) -> Result<Vec<PeriodSpending>, Error> {
    let Some(earliest) = store.earliest_date(budget.category_ids())? else {
        return Ok(Vec::new());
    };

    let unit = budget.period().unit();
    let periods_elapsed = periods_between(unit, earliest, today);

    let mut spending = Vec::new();
    for offset in 1..=periods_elapsed {
        spending.push(PeriodSpending {
            period: compute_period(unit, -offset, today),
            total_spent: total_spent(store, budget, -offset, today),
        });

        if limit.is_some_and(|limit| spending.len() == limit) {
            break;
        }
    }

    Ok(spending)
}

/// Compute the composed read for a budget detail screen: current total,
/// percentage and status, the backward walk over previous periods, and the
/// cumulative trend series.
///
/// # Errors
/// Returns an [Error::SqlError] if the previous-period walk or the trend's
/// transaction fetch fails. The current total itself degrades to zero on
/// storage faults.
pub fn compute_budget_view(
    store: &impl TransactionStore,
    budget: &Budget,
    today: Date,
) -> Result<BudgetView, Error> {
    let total = total_spent(store, budget, 0, today);
    let percentage = percentage_used(total, budget.max_amount());

    Ok(BudgetView {
        total_spent: total,
        percentage,
        status: BudgetStatus::from_percentage(percentage),
        previous_periods: previous_periods(store, budget, None, today)?,
        trend: budget_trend(store, budget, today)?,
    })
}
