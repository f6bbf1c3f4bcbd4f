//! Recurring item entity - Templates for monthly income or expenses.
//!
//! A recurring item defines a template, not a transaction: the materializer
//! turns it into at most one concrete income or expense record per calendar
//! month. Income templates carry a `source`; expense templates carry a
//! `category` and payment details. Items are deactivated rather than deleted
//! so that already-materialized records keep a resolvable back-reference.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::expense::PaymentMethod;

/// Whether a template produces income or expense records
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Materializes into income records
    #[sea_orm(string_value = "income")]
    Income,
    /// Materializes into expense records
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Recurring item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recurring_items")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user - templates are never visible across users
    pub user_id: String,
    /// Whether this template produces income or expense records
    pub item_type: ItemType,
    /// Income source label, set iff `item_type` is `income`
    pub source: Option<String>,
    /// Expense category, set iff `item_type` is `expense`
    pub category: Option<String>,
    /// Amount each materialized record carries, a positive magnitude
    pub amount: Decimal,
    /// Free-text note copied onto materialized records
    pub description: String,
    /// Payment method for expense templates, None for income templates
    pub payment_method: Option<PaymentMethod>,
    /// Card reference for credit-card expense templates
    pub credit_card_id: Option<String>,
    /// Day of month to materialize on (1-31, clamped to month length)
    pub day_of_month: i32,
    /// Inactive templates are skipped by the materializer
    pub is_active: bool,
    /// When the template was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `RecurringItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One template has many materialized income records
    #[sea_orm(has_many = "super::income::Entity")]
    Income,
    /// One template has many materialized expense records
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
}

impl Related<super::income::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Income.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
