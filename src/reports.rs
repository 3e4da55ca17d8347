//! Category breakdown reports for the pie and bar charts of the report
//! screens.

use serde::Serialize;

use crate::{
    Error,
    models::{Category, CategoryType},
    period::Period,
    stores::TransactionStore,
};

/// The chart colors assigned to report rows, cycled in order.
///
/// Chart *rendering* belongs to the embedding application; the color is
/// assigned here so that a category keeps the same color in the pie chart
/// and its legend.
const CHART_COLORS: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#9c755f",
];

/// One row of a category breakdown report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReportRow {
    /// The category the row describes.
    pub category: Category,
    /// The summed transaction amounts for the category.
    pub total: f64,
    /// How many transactions were summed.
    pub count: usize,
    /// The category's fraction of the type total, in `0.0..=1.0`. Zero when
    /// the type total is zero.
    pub share: f64,
    /// The chart color assigned to the row.
    pub color: &'static str,
}

/// Break down spending (or income) per category, ordered largest first,
/// with each category's share of the overall total and a stable chart
/// color.
///
/// Restricted to `range` when given, otherwise covering all transactions.
/// The share denominator is guarded: when every category totals zero, all
/// shares are `0.0` rather than NaN.
///
/// # Errors
/// Returns an [Error::SqlError] if the grouped totals could not be fetched.
pub fn category_report(
    store: &impl TransactionStore,
    category_type: CategoryType,
    range: Option<Period>,
) -> Result<Vec<CategoryReportRow>, Error> {
    let totals = store.totals_by_category(category_type, range)?;
    let overall: f64 = totals.iter().map(|category_total| category_total.total).sum();

    let rows = totals
        .into_iter()
        .enumerate()
        .map(|(index, category_total)| CategoryReportRow {
            share: if overall > 0.0 {
                category_total.total / overall
            } else {
                0.0
            },
            color: CHART_COLORS[index % CHART_COLORS.len()],
            category: category_total.category,
            total: category_total.total,
            count: category_total.count,
        })
        .collect();

    Ok(rows)
}
