//! Monthly budget upsert and lookup.
//!
//! At most one budget exists per (user, month, year). Saving a budget for a
//! period that already has one overwrites the amounts in place and preserves
//! the original `created_at`; this overwrite is normal operation, not a
//! conflict.

use crate::{
    config::categories::CategorySet,
    core::period::Period,
    entities::{
        Budget, budget,
        budget::{CategoryBudget, CategoryBudgets},
    },
    errors::{Error, Result},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{Set, prelude::*};
use uuid::Uuid;

fn validate_budget(
    categories: &CategorySet,
    total_budget: Decimal,
    category_budgets: &CategoryBudgets,
) -> Result<()> {
    if total_budget < Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: total_budget,
        });
    }
    for CategoryBudget { category, amount } in &category_budgets.0 {
        categories.validate(category)?;
        if *amount < Decimal::ZERO {
            return Err(Error::InvalidAmount { amount: *amount });
        }
    }
    Ok(())
}

/// Saves the budget for (user, period), overwriting any existing one.
///
/// `total_budget` may be zero (the alert evaluator guards the division);
/// negative amounts and unknown category keys are rejected. Returns the
/// stored row.
pub async fn upsert_budget(
    db: &DatabaseConnection,
    user_id: &str,
    categories: &CategorySet,
    period: Period,
    total_budget: Decimal,
    category_budgets: CategoryBudgets,
) -> Result<budget::Model> {
    validate_budget(categories, total_budget, &category_budgets)?;

    // Check if a budget already exists for this period
    let existing = get_budget(db, user_id, period).await?;

    if let Some(budget) = existing {
        // Update existing row, preserving created_at
        let mut active_model: budget::ActiveModel = budget.into();
        active_model.total_budget = Set(total_budget);
        active_model.category_budgets = Set(category_budgets);
        active_model.update(db).await.map_err(Into::into)
    } else {
        // Insert new row
        let new_budget = budget::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id.to_string()),
            month: Set(period.month_number()),
            year: Set(period.year),
            total_budget: Set(total_budget),
            category_budgets: Set(category_budgets),
            created_at: Set(Utc::now()),
        };
        new_budget.insert(db).await.map_err(Into::into)
    }
}

/// Fetches the budget for (user, period), if one has been saved.
pub async fn get_budget(
    db: &DatabaseConnection,
    user_id: &str,
    period: Period,
) -> Result<Option<budget::Model>> {
    Budget::find()
        .filter(budget::Column::UserId.eq(user_id))
        .filter(budget::Column::Month.eq(period.month_number()))
        .filter(budget::Column::Year.eq(period.year))
        .one(db)
        .await
        .map_err(Into::into)
}
