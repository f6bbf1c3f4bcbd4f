//! Monthly summary aggregation.
//!
//! Folds a user's income and expense records for one calendar month into
//! totals and breakdowns. All arithmetic is `Decimal`, so repeated runs over
//! the same records produce identical sums. A month with no records yields an
//! all-zero summary with empty breakdowns, never an error.

use crate::{
    core::period::Period,
    entities::{Expense, Income, expense, income},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, prelude::*};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// An ordered label -> amount accumulator.
///
/// Keys keep the order they were first observed in, which the trend
/// aggregator relies on; generic map iteration order would not be a reliable
/// substitute. Serializes as a JSON object in that same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Breakdown {
    entries: Vec<(String, Decimal)>,
}

impl Breakdown {
    /// Adds `amount` under `label`, creating the entry on first sight
    pub fn add(&mut self, label: &str, amount: Decimal) {
        if let Some((_, total)) = self.entries.iter_mut().find(|(key, _)| key == label) {
            *total += amount;
        } else {
            self.entries.push((label.to_string(), amount));
        }
    }

    /// The summed amount for `label`, if any was recorded
    #[must_use]
    pub fn get(&self, label: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, total)| *total)
    }

    /// Labels in first-observed order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// (label, amount) pairs in first-observed order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(key, total)| (key.as_str(), *total))
    }

    /// Whether anything was recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct labels
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Serialize for Breakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, amount) in &self.entries {
            map.serialize_entry(label, amount)?;
        }
        map.end()
    }
}

/// Aggregated view of one user's month
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Sum of all income amounts in the period
    pub total_income: Decimal,
    /// Sum of all expense amounts in the period
    pub total_expenses: Decimal,
    /// `total_income - total_expenses`; negative when overspent
    pub net_savings: Decimal,
    /// Expense totals per category; zero-spend categories are absent
    pub category_breakdown: Breakdown,
    /// Expense totals per payment method ("cash", "credit_card")
    pub payment_breakdown: Breakdown,
    /// Income totals per source
    pub income_breakdown: Breakdown,
}

/// Computes the [`Summary`] for (user, period).
///
/// Records are folded in (date, id) order so that breakdown key order - and
/// therefore serialized output - is identical across repeated calls.
pub async fn summarize(db: &DatabaseConnection, user_id: &str, period: Period) -> Result<Summary> {
    let (start, end) = (period.first_day(), period.last_day());

    let incomes = Income::find()
        .filter(income::Column::UserId.eq(user_id))
        .filter(income::Column::Date.between(start, end))
        .order_by_asc(income::Column::Date)
        .order_by_asc(income::Column::Id)
        .all(db)
        .await?;

    let expenses = Expense::find()
        .filter(expense::Column::UserId.eq(user_id))
        .filter(expense::Column::Date.between(start, end))
        .order_by_asc(expense::Column::Date)
        .order_by_asc(expense::Column::Id)
        .all(db)
        .await?;

    let mut total_income = Decimal::ZERO;
    let mut income_breakdown = Breakdown::default();
    for record in &incomes {
        total_income += record.amount;
        income_breakdown.add(&record.source, record.amount);
    }

    let mut total_expenses = Decimal::ZERO;
    let mut category_breakdown = Breakdown::default();
    let mut payment_breakdown = Breakdown::default();
    for record in &expenses {
        total_expenses += record.amount;
        category_breakdown.add(&record.category, record.amount);
        payment_breakdown.add(record.payment_method.as_str(), record.amount);
    }

    Ok(Summary {
        total_income,
        total_expenses,
        net_savings: total_income - total_expenses,
        category_breakdown,
        payment_breakdown,
        income_breakdown,
    })
}
