//! Budget threshold alert evaluation.
//!
//! Compares a month's spending against the saved budget and emits warning
//! (>= 80%) or danger (>= 100%) alerts, overall first and then per category
//! in the order the category allocations were defined. Months without a
//! budget degrade to an empty, all-zero result.

use crate::{
    core::{budget::get_budget, period::Period, summary::summarize},
    errors::Result,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde::Serialize;

/// Percentage at which a warning alert fires
const WARNING_THRESHOLD: Decimal = Decimal::from_parts(80, 0, 0, false, 0);
/// Percentage at which spending has exceeded the budget
const DANGER_THRESHOLD: Decimal = Decimal::ONE_HUNDRED;

/// Alert severity, ordered least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Spending is approaching the budget (>= 80%)
    Warning,
    /// Spending has reached or exceeded the budget (>= 100%)
    Danger,
}

/// A single threshold-crossing notice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// How serious the crossing is
    pub severity: Severity,
    /// Human-readable message with the amounts involved
    pub message: String,
}

/// Result of evaluating a month's spending against its budget
#[derive(Debug, Clone, Serialize)]
pub struct BudgetAlerts {
    /// Overall alert first (if any), then category alerts in definition order
    pub alerts: Vec<Alert>,
    /// Spend-to-budget percentage; 0 when no or zero budget
    pub percentage: Decimal,
    /// Total expenses for the period
    pub total_spent: Decimal,
    /// The saved overall budget; 0 when none exists
    pub budget: Decimal,
}

/// Spend-to-budget percentage, 0 when the budget is zero
fn spend_percentage(spent: Decimal, budget: Decimal) -> Decimal {
    if budget <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    spent / budget * Decimal::ONE_HUNDRED
}

/// Evaluates the (user, period) budget against that month's spending.
///
/// Thresholds never stack: a month at 100% emits only the danger alert.
pub async fn evaluate_budget_alerts(
    db: &DatabaseConnection,
    user_id: &str,
    period: Period,
) -> Result<BudgetAlerts> {
    let Some(budget) = get_budget(db, user_id, period).await? else {
        return Ok(BudgetAlerts {
            alerts: Vec::new(),
            percentage: Decimal::ZERO,
            total_spent: Decimal::ZERO,
            budget: Decimal::ZERO,
        });
    };

    let summary = summarize(db, user_id, period).await?;
    let total_spent = summary.total_expenses;
    let percentage = spend_percentage(total_spent, budget.total_budget);

    let mut alerts = Vec::new();
    if percentage >= DANGER_THRESHOLD {
        alerts.push(Alert {
            severity: Severity::Danger,
            message: format!(
                "You've exceeded your budget! Spent ${total_spent:.2} of ${:.2}",
                budget.total_budget
            ),
        });
    } else if percentage >= WARNING_THRESHOLD {
        alerts.push(Alert {
            severity: Severity::Warning,
            message: format!(
                "You've used {percentage:.1}% of your budget. ${:.2} remaining.",
                budget.total_budget - total_spent
            ),
        });
    }

    // Category alerts follow, in the order the allocations were defined
    for allocation in &budget.category_budgets.0 {
        let Some(spent) = summary.category_breakdown.get(&allocation.category) else {
            continue;
        };
        let category_percentage = spend_percentage(spent, allocation.amount);
        if category_percentage >= DANGER_THRESHOLD {
            alerts.push(Alert {
                severity: Severity::Danger,
                message: format!(
                    "{}: Budget exceeded! Spent ${spent:.2} of ${:.2}",
                    allocation.category, allocation.amount
                ),
            });
        } else if category_percentage >= WARNING_THRESHOLD {
            alerts.push(Alert {
                severity: Severity::Warning,
                message: format!(
                    "{}: {category_percentage:.1}% used. ${:.2} remaining.",
                    allocation.category,
                    allocation.amount - spent
                ),
            });
        }
    }

    Ok(BudgetAlerts {
        alerts,
        percentage,
        total_spent,
        budget: budget.total_budget,
    })
}
