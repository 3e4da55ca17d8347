//! Turns dated amounts into fixed-size, gap-filled series for charting.
//!
//! Charts cannot tolerate missing buckets: a week with spending on only two
//! days must still produce seven points. The bucketer therefore walks every
//! bucket of the period and emits a labelled total for each, zero or not,
//! and the budget trend accumulates those buckets into a running sum so the
//! line chart shows spend climbing over the period rather than isolated
//! daily spikes.

use serde::Serialize;
use time::{Date, Duration, Weekday};

use crate::{
    Error,
    models::Budget,
    period::{BudgetPeriod, compute_period, month_number},
    stores::TransactionStore,
};

/// An ordered, labelled series of bucket totals spanning one full period.
///
/// `labels` and `values` always have the same length: 7 for a week of day
/// buckets, and however many week buckets cover the month (4 to 6) for a
/// month period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSeries {
    /// One label per bucket: the weekday abbreviation for day buckets, the
    /// bucket's start date as `DD/MM` for week buckets.
    pub labels: Vec<String>,
    /// One total per bucket, `0.0` for buckets without activity.
    pub values: Vec<f64>,
}

impl TrendSeries {
    /// Replace each value with the sum of itself and all values before it.
    ///
    /// For non-negative input the result is non-decreasing, which is what
    /// makes a cumulative spend line climb monotonically.
    pub fn into_cumulative(mut self) -> Self {
        let mut running_total = 0.0;

        for value in &mut self.values {
            running_total += *value;
            *value = running_total;
        }

        self
    }
}

/// Group dated amounts into the buckets of the current `period` relative to
/// `anchor`.
///
/// Week periods bucket by day, month periods by week (see
/// [BudgetPeriod::bucket_unit]). Entries dated outside the current period
/// are ignored. The result is complete and gap-filled: every bucket of the
/// period appears, in order, with a zero total when nothing was spent in it.
pub fn bucketize(entries: &[(Date, f64)], period: BudgetPeriod, anchor: Date) -> TrendSeries {
    let range = compute_period(period.unit(), 0, anchor);
    let bucket_days = match period {
        BudgetPeriod::Week => 1,
        BudgetPeriod::Month => 7,
    };
    let bucket_count = (range.num_days() + bucket_days - 1) / bucket_days;

    let mut values = vec![0.0; bucket_count as usize];
    for &(date, amount) in entries {
        if !range.contains(date) {
            continue;
        }

        let bucket_index = (date - range.start).whole_days() / bucket_days;
        values[bucket_index as usize] += amount;
    }

    let labels = (0..bucket_count)
        .map(|bucket_index| {
            let cursor = range.start + Duration::days(bucket_index * bucket_days);
            bucket_label(period, cursor)
        })
        .collect();

    TrendSeries { labels, values }
}

/// The chart label for the bucket starting at `cursor`.
fn bucket_label(period: BudgetPeriod, cursor: Date) -> String {
    match period {
        BudgetPeriod::Week => weekday_abbrev(cursor.weekday()).to_string(),
        BudgetPeriod::Month => format!(
            "{:02}/{:02}",
            cursor.day(),
            month_number(cursor.month())
        ),
    }
}

fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

/// The cumulative spend series for `budget`'s current period.
///
/// Fetches the budget's transactions for the period containing `today`,
/// buckets them, and accumulates the buckets into a running sum.
///
/// # Errors
/// Returns an [Error::SqlError] if the transactions could not be fetched.
pub fn budget_trend(
    store: &impl TransactionStore,
    budget: &Budget,
    today: Date,
) -> Result<TrendSeries, Error> {
    let range = compute_period(budget.period().unit(), 0, today);
    let transactions = store.transactions_in_range(budget.category_ids(), range)?;

    let entries: Vec<(Date, f64)> = transactions
        .iter()
        .map(|transaction| (transaction.date(), transaction.amount()))
        .collect();

    Ok(bucketize(&entries, budget.period(), today).into_cumulative())
}

/// The raw (non-cumulative) expense series for the current `range` period,
/// for the dashboard's spending chart.
///
/// # Errors
/// Returns an [Error::SqlError] if the daily totals could not be fetched.
pub fn expense_trend(
    store: &impl TransactionStore,
    range: BudgetPeriod,
    today: Date,
) -> Result<TrendSeries, Error> {
    let period = compute_period(range.unit(), 0, today);
    let totals = store.daily_totals(period)?;

    let entries: Vec<(Date, f64)> = totals
        .iter()
        .map(|daily_total| (daily_total.date, daily_total.total))
        .collect();

    Ok(bucketize(&entries, range, today))
}

#[cfg(test)]
mod trend_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;
    use time::{Date, macros::date};

    use crate::{
        database_id::DatabaseId,
        db::initialize,
        models::{Budget, CategoryName, CategoryType, NewTransaction},
        period::BudgetPeriod,
        stores::{
            CategoryStore,
            sqlite::{SQLiteCategoryStore, SQLiteTransactionStore},
            TransactionStore,
        },
    };

    use super::{bucketize, budget_trend, expense_trend};

    // A Friday; its week runs 2024-03-11 to 2024-03-17.
    const TODAY: Date = date!(2024 - 03 - 15);

    #[test]
    fn bucketize_fills_gaps_with_zeroes() {
        let series = bucketize(&[], BudgetPeriod::Week, TODAY);

        assert_eq!(
            series.labels,
            vec!["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]
        );
        assert_eq!(series.values, vec![0.0; 7]);
    }

    #[test]
    fn bucketize_accumulates_same_bucket_amounts() {
        let entries = [
            (date!(2024 - 03 - 11), 100.0),
            (date!(2024 - 03 - 11), 50.0),
            (date!(2024 - 03 - 13), 25.0),
        ];

        let series = bucketize(&entries, BudgetPeriod::Week, TODAY);

        assert_eq!(series.values, vec![150.0, 0.0, 25.0, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn bucketize_ignores_entries_outside_the_period() {
        let entries = [
            (date!(2024 - 03 - 10), 999.0),
            (date!(2024 - 03 - 18), 999.0),
            (date!(2024 - 03 - 15), 40.0),
        ];

        let series = bucketize(&entries, BudgetPeriod::Week, TODAY);

        assert_eq!(series.values, vec![0.0, 0.0, 0.0, 0.0, 40.0, 0.0, 0.0]);
    }

    #[test]
    fn bucketize_groups_month_periods_by_week() {
        // March 2024 has 31 days, so 5 week buckets starting on the 1st,
        // 8th, 15th, 22nd, and 29th.
        let entries = [
            (date!(2024 - 03 - 01), 10.0),
            (date!(2024 - 03 - 07), 20.0),
            (date!(2024 - 03 - 08), 30.0),
            (date!(2024 - 03 - 31), 40.0),
        ];

        let series = bucketize(&entries, BudgetPeriod::Month, TODAY);

        assert_eq!(
            series.labels,
            vec!["01/03", "08/03", "15/03", "22/03", "29/03"]
        );
        assert_eq!(series.values, vec![30.0, 30.0, 0.0, 0.0, 40.0]);
    }

    #[test]
    fn bucketize_handles_february_of_a_leap_year() {
        // 29 days: 4 full week buckets plus a single-day bucket.
        let anchor = date!(2024 - 02 - 10);

        let series = bucketize(&[], BudgetPeriod::Month, anchor);

        assert_eq!(
            series.labels,
            vec!["01/02", "08/02", "15/02", "22/02", "29/02"]
        );
    }

    #[test]
    fn cumulative_series_is_non_decreasing() {
        let entries = [
            (date!(2024 - 03 - 11), 100.0),
            (date!(2024 - 03 - 13), 25.0),
            (date!(2024 - 03 - 16), 75.0),
        ];

        let series = bucketize(&entries, BudgetPeriod::Week, TODAY).into_cumulative();

        assert_eq!(
            series.values,
            vec![100.0, 100.0, 125.0, 125.0, 125.0, 200.0, 200.0]
        );
        for window in series.values.windows(2) {
            assert!(
                window[1] >= window[0],
                "cumulative trend decreased: {:?}",
                series.values
            );
        }
    }

    fn create_stores() -> (SQLiteTransactionStore, SQLiteCategoryStore) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        let connection = Arc::new(Mutex::new(connection));

        (
            SQLiteTransactionStore::new(connection.clone()),
            SQLiteCategoryStore::new(connection),
        )
    }

    fn create_category(
        store: &SQLiteCategoryStore,
        name: &str,
        category_type: CategoryType,
    ) -> DatabaseId {
        store
            .create(CategoryName::new(name).unwrap(), "tag", category_type)
            .unwrap()
            .id()
    }

    #[test]
    fn budget_trend_accumulates_the_current_week() {
        let (transactions, categories) = create_stores();
        let groceries = create_category(&categories, "Groceries", CategoryType::Expense);
        let budget = Budget::new_unchecked(
            1,
            "food".to_string(),
            500.0,
            BudgetPeriod::Week,
            vec![groceries],
        );

        for (amount, date) in [
            (100.0, date!(2024 - 03 - 11)),
            (50.0, date!(2024 - 03 - 13)),
            // Last week, must not appear.
            (999.0, date!(2024 - 03 - 08)),
        ] {
            transactions
                .create(NewTransaction::new(amount, date, "test", groceries, TODAY).unwrap())
                .unwrap();
        }

        let series = budget_trend(&transactions, &budget, TODAY).unwrap();

        assert_eq!(
            series.values,
            vec![100.0, 100.0, 150.0, 150.0, 150.0, 150.0, 150.0]
        );
    }

    #[test]
    fn expense_trend_is_not_cumulative() {
        let (transactions, categories) = create_stores();
        let groceries = create_category(&categories, "Groceries", CategoryType::Expense);

        for (amount, date) in [(100.0, date!(2024 - 03 - 11)), (50.0, date!(2024 - 03 - 13))] {
            transactions
                .create(NewTransaction::new(amount, date, "test", groceries, TODAY).unwrap())
                .unwrap();
        }

        let series = expense_trend(&transactions, BudgetPeriod::Week, TODAY).unwrap();

        assert_eq!(series.values, vec![100.0, 0.0, 50.0, 0.0, 0.0, 0.0, 0.0]);
    }
}
