//! Calendar period arithmetic for rolling budgets and reports.
//!
//! A period is a full calendar span (a day, a Monday-to-Sunday week, or a
//! 1st-to-last-day month) identified by an integer offset from an anchor
//! date: offset 0 is the period containing the anchor, negative offsets walk
//! backward, positive forward. All functions here are pure and total for any
//! integer offset.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month};

/// The calendar units a period can span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodUnit {
    /// A single calendar day.
    Day,
    /// A Monday-to-Sunday week. The Monday start is a fixed convention,
    /// independent of locale.
    Week,
    /// A calendar month, from the 1st to the last day.
    Month,
}

/// The period lengths a budget can recur over.
///
/// Budgets never roll over daily, so this is a strict subset of
/// [PeriodUnit].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetPeriod {
    /// The budget resets every Monday.
    Week,
    /// The budget resets on the 1st of every month.
    Month,
}

impl BudgetPeriod {
    /// The calendar unit spanned by one budget period.
    pub fn unit(self) -> PeriodUnit {
        match self {
            Self::Week => PeriodUnit::Week,
            Self::Month => PeriodUnit::Month,
        }
    }

    /// The granularity used to bucket a period's transactions for charting:
    /// days within a week, weeks within a month.
    pub fn bucket_unit(self) -> PeriodUnit {
        match self {
            Self::Week => PeriodUnit::Day,
            Self::Month => PeriodUnit::Week,
        }
    }

    /// The fixed string form used in the database schema.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

/// A contiguous calendar span with inclusive start and end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// The first day of the period.
    pub start: Date,
    /// The last day of the period.
    pub end: Date,
}

impl Period {
    /// The number of days in the period, counting both endpoints.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }

    /// Whether `date` falls within the period (inclusive).
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Compute the boundaries of the period `offset` units away from the one
/// containing `anchor`.
///
/// Offset 0 is the period containing `anchor` itself; -1 is the previous
/// period, and so on. The result always covers the full unit, never a
/// partial span.
pub fn compute_period(unit: PeriodUnit, offset: i64, anchor: Date) -> Period {
    match unit {
        PeriodUnit::Day => {
            let day = anchor + Duration::days(offset);
            Period {
                start: day,
                end: day,
            }
        }
        PeriodUnit::Week => {
            let start = start_of_week(anchor) + Duration::weeks(offset);
            Period {
                start,
                end: start + Duration::days(6),
            }
        }
        PeriodUnit::Month => month_period(month_index(anchor) + offset),
    }
}

/// Count the whole period boundaries crossed between the period containing
/// `from` and the period containing `to`.
///
/// Returns 0 when both dates fall in the same period, and a negative count
/// when `to` precedes `from`.
pub fn periods_between(unit: PeriodUnit, from: Date, to: Date) -> i64 {
    match unit {
        PeriodUnit::Day => (to - from).whole_days(),
        PeriodUnit::Week => (start_of_week(to) - start_of_week(from)).whole_days() / 7,
        PeriodUnit::Month => month_index(to) - month_index(from),
    }
}

/// The Monday of the week containing `date`.
fn start_of_week(date: Date) -> Date {
    let weekday_number = date.weekday().number_from_monday() as i64;
    date - Duration::days(weekday_number - 1)
}

/// Months since year zero, so that month arithmetic is plain integer
/// arithmetic for any offset.
fn month_index(date: Date) -> i64 {
    date.year() as i64 * 12 + (month_number(date.month()) as i64 - 1)
}

fn month_period(index: i64) -> Period {
    let year = index.div_euclid(12) as i32;
    let month = month_from_number(index.rem_euclid(12) as u8 + 1);

    Period {
        start: Date::from_calendar_date(year, month, 1).expect("invalid month start date"),
        end: Date::from_calendar_date(year, month, last_day_of_month(year, month))
            .expect("invalid month end date"),
    }
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

pub(crate) fn month_number(month: Month) -> u8 {
    match month {
        Month::January => 1,
        Month::February => 2,
        Month::March => 3,
        Month::April => 4,
        Month::May => 5,
        Month::June => 6,
        Month::July => 7,
        Month::August => 8,
        Month::September => 9,
        Month::October => 10,
        Month::November => 11,
        Month::December => 12,
    }
}

fn month_from_number(month: u8) -> Month {
    match month {
        1 => Month::January,
        2 => Month::February,
        3 => Month::March,
        4 => Month::April,
        5 => Month::May,
        6 => Month::June,
        7 => Month::July,
        8 => Month::August,
        9 => Month::September,
        10 => Month::October,
        11 => Month::November,
        12 => Month::December,
        _ => panic!("invalid month number {month}"),
    }
}
