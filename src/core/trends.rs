//! Multi-month trend aggregation.
//!
//! Walks a window of consecutive calendar months (oldest first) and reports
//! per-month income/expense/savings totals plus per-category expense sums.
//! The category list preserves the order categories were first observed in
//! across the window, so charted series keep a stable ordering between runs.

use crate::{
    core::{
        period::Period,
        summary::{Breakdown, summarize},
    },
    entities::{Expense, expense},
    errors::{Error, Result},
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, prelude::*};
use serde::Serialize;

/// One month of income/expense/savings totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// Calendar month, 1-12
    pub month: u32,
    /// Calendar year
    pub year: i32,
    /// Three-letter month abbreviation for chart labels
    pub month_name: &'static str,
    /// Total income for the month
    pub income: Decimal,
    /// Total expenses for the month
    pub expenses: Decimal,
    /// Income minus expenses
    pub savings: Decimal,
}

/// One month of per-category expense sums
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTrendPoint {
    /// Calendar month, 1-12
    pub month: u32,
    /// Calendar year
    pub year: i32,
    /// Three-letter month abbreviation for chart labels
    pub month_name: &'static str,
    /// Expense sums per category; categories without spend are absent
    pub totals: Breakdown,
}

/// Per-category expense series over a trend window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTrends {
    /// Every category with nonzero spend in the window, first-observed order
    pub categories: Vec<String>,
    /// One entry per month, oldest first
    pub data: Vec<CategoryTrendPoint>,
}

fn validate_window(months_back: u32) -> Result<()> {
    if months_back == 0 {
        return Err(Error::InvalidMonthsBack {
            months: months_back,
        });
    }
    Ok(())
}

/// Income/expense/savings totals for the last `months_back` calendar months
/// ending at the current month, oldest first.
pub async fn trends(
    db: &DatabaseConnection,
    user_id: &str,
    months_back: u32,
) -> Result<Vec<TrendPoint>> {
    trends_ending_at(db, user_id, Period::current(), months_back).await
}

/// Income/expense/savings totals for the `months_back` calendar months
/// ending at `end`, oldest first.
///
/// Callers conventionally pass 3, 6, or 12 months, but any positive window
/// length is accepted.
pub async fn trends_ending_at(
    db: &DatabaseConnection,
    user_id: &str,
    end: Period,
    months_back: u32,
) -> Result<Vec<TrendPoint>> {
    validate_window(months_back)?;

    let mut points = Vec::with_capacity(months_back as usize);
    for period in end.window_ending_at(months_back) {
        let summary = summarize(db, user_id, period).await?;
        points.push(TrendPoint {
            month: period.month,
            year: period.year,
            month_name: period.month_name(),
            income: summary.total_income,
            expenses: summary.total_expenses,
            savings: summary.net_savings,
        });
    }
    Ok(points)
}

/// Per-category expense series for the last `months_back` calendar months
/// ending at the current month.
pub async fn category_trends(
    db: &DatabaseConnection,
    user_id: &str,
    months_back: u32,
) -> Result<CategoryTrends> {
    category_trends_ending_at(db, user_id, Period::current(), months_back).await
}

/// Per-category expense series for the `months_back` calendar months ending
/// at `end`.
///
/// The `categories` list unions every category observed with nonzero spend
/// across the window, in the order they were first seen walking the months
/// chronologically and each month's records in (date, id) order.
pub async fn category_trends_ending_at(
    db: &DatabaseConnection,
    user_id: &str,
    end: Period,
    months_back: u32,
) -> Result<CategoryTrends> {
    validate_window(months_back)?;

    let mut categories: Vec<String> = Vec::new();
    let mut data = Vec::with_capacity(months_back as usize);

    for period in end.window_ending_at(months_back) {
        let records = Expense::find()
            .filter(expense::Column::UserId.eq(user_id))
            .filter(
                expense::Column::Date.between(period.first_day(), period.last_day()),
            )
            .order_by_asc(expense::Column::Date)
            .order_by_asc(expense::Column::Id)
            .all(db)
            .await?;

        let mut totals = Breakdown::default();
        for record in &records {
            totals.add(&record.category, record.amount);
        }
        for label in totals.labels() {
            if !categories.iter().any(|c| c == label) {
                categories.push(label.to_string());
            }
        }

        data.push(CategoryTrendPoint {
            month: period.month,
            year: period.year,
            month_name: period.month_name(),
            totals,
        });
    }

    Ok(CategoryTrends { categories, data })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_trends_rejects_zero_window() -> Result<()> {
        let db = setup_test_db().await?;

        let result = trends_ending_at(&db, "u1", Period::new(2025, 6)?, 0).await;
        assert!(matches!(result, Err(Error::InvalidMonthsBack { months: 0 })));

        let result = category_trends_ending_at(&db, "u1", Period::new(2025, 6)?, 0).await;
        assert!(matches!(result, Err(Error::InvalidMonthsBack { months: 0 })));

        Ok(())
    }

    #[tokio::test]
    async fn test_trends_window_shape() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_income(&db, "u1", dec!(3000), date(2025, 5, 5)).await?;
        create_test_expense(&db, "u1", "Housing", dec!(1200), date(2025, 6, 3)).await?;

        let points = trends_ending_at(&db, "u1", Period::new(2025, 6)?, 6).await?;

        assert_eq!(points.len(), 6);
        // Strictly increasing chronological order ending at the requested month
        assert_eq!((points[0].year, points[0].month), (2025, 1));
        assert_eq!((points[5].year, points[5].month), (2025, 6));
        assert_eq!(points[4].month_name, "May");

        // Empty months report zeros
        assert_eq!(points[0].income, Decimal::ZERO);
        assert_eq!(points[0].expenses, Decimal::ZERO);

        assert_eq!(points[4].income, dec!(3000));
        assert_eq!(points[4].savings, dec!(3000));
        assert_eq!(points[5].expenses, dec!(1200));
        assert_eq!(points[5].savings, dec!(-1200));

        Ok(())
    }

    #[tokio::test]
    async fn test_trends_window_crosses_year_boundary() -> Result<()> {
        let db = setup_test_db().await?;

        let points = trends_ending_at(&db, "u1", Period::new(2025, 2)?, 4).await?;
        let months: Vec<_> = points.iter().map(|p| (p.year, p.month)).collect();
        assert_eq!(
            months,
            vec![(2024, 11), (2024, 12), (2025, 1), (2025, 2)]
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_category_trends_first_observed_order() -> Result<()> {
        let db = setup_test_db().await?;

        // April: Housing then Travel; May: Travel only; June: Utilities
        create_test_expense(&db, "u1", "Housing", dec!(1200), date(2025, 4, 2)).await?;
        create_test_expense(&db, "u1", "Travel", dec!(400), date(2025, 4, 20)).await?;
        create_test_expense(&db, "u1", "Travel", dec!(150), date(2025, 5, 9)).await?;
        create_test_expense(&db, "u1", "Utilities", dec!(60), date(2025, 6, 1)).await?;

        let result = category_trends_ending_at(&db, "u1", Period::new(2025, 6)?, 3).await?;

        assert_eq!(result.categories, vec!["Housing", "Travel", "Utilities"]);
        assert_eq!(result.data.len(), 3);

        // April carries both categories
        assert_eq!(result.data[0].totals.get("Housing"), Some(dec!(1200)));
        assert_eq!(result.data[0].totals.get("Travel"), Some(dec!(400)));
        // May omits Housing entirely rather than reporting zero
        assert_eq!(result.data[1].totals.get("Housing"), None);
        assert_eq!(result.data[1].totals.get("Travel"), Some(dec!(150)));
        // June
        assert_eq!(result.data[2].totals.get("Utilities"), Some(dec!(60)));

        Ok(())
    }

    #[tokio::test]
    async fn test_category_trends_empty_window() -> Result<()> {
        let db = setup_test_db().await?;

        let result = category_trends_ending_at(&db, "u1", Period::new(2025, 6)?, 3).await?;
        assert!(result.categories.is_empty());
        assert_eq!(result.data.len(), 3);
        assert!(result.data.iter().all(|point| point.totals.is_empty()));

        Ok(())
    }

    #[tokio::test]
    async fn test_trends_are_deterministic() -> Result<()> {
        let db = setup_test_db().await?;

        create_test_expense(&db, "u1", "Housing", dec!(1200), date(2025, 5, 2)).await?;
        create_test_expense(&db, "u1", "Travel", dec!(300), date(2025, 5, 2)).await?;

        let first = category_trends_ending_at(&db, "u1", Period::new(2025, 6)?, 3).await?;
        let second = category_trends_ending_at(&db, "u1", Period::new(2025, 6)?, 3).await?;
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert_eq!(first, second);

        Ok(())
    }
}
