//! Budget entity - Monthly spending targets.
//!
//! At most one budget exists per (user, month, year); saving again overwrites
//! the existing row. Besides the overall `total_budget`, a budget may carry
//! per-category allocations stored as an ordered JSON list so that alert
//! evaluation follows the order the categories were defined in.

use sea_orm::FromJsonQueryResult;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A single per-category allocation inside a budget
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBudget {
    /// Expense category the allocation applies to
    pub category: String,
    /// Allocated amount for the month
    pub amount: Decimal,
}

/// Ordered per-category allocations, persisted as a JSON column.
/// A list rather than a map: definition order is meaningful for alerts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct CategoryBudgets(pub Vec<CategoryBudget>);

/// Budget database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user - budgets are never visible across users
    pub user_id: String,
    /// Calendar month the budget applies to (1-12)
    pub month: i32,
    /// Calendar year the budget applies to
    pub year: i32,
    /// Overall spending target for the month
    pub total_budget: Decimal,
    /// Ordered per-category allocations, keys a subset of expense categories
    #[sea_orm(column_type = "Json")]
    pub category_budgets: CategoryBudgets,
    /// When the budget was first saved (preserved across overwrites)
    pub created_at: DateTimeUtc,
}

/// Budget has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
