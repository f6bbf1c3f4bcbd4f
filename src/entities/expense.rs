//! Expense entity - Represents money going out.
//!
//! Each expense is scoped to a single user and carries a category from the
//! configured category set, a positive amount, a calendar date, and a payment
//! method. Credit-card expenses reference a card owned by the same user;
//! deleting the card later leaves the reference dangling on purpose (display
//! falls back to an empty label). Materialized records carry
//! `recurring_item_id` and `period` like income records do.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How an expense was paid
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Paid in cash (or debit/other non-card means)
    #[sea_orm(string_value = "cash")]
    Cash,
    /// Paid with a tracked credit card
    #[sea_orm(string_value = "credit_card")]
    CreditCard,
}

impl PaymentMethod {
    /// Stable label used in payment breakdowns
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::CreditCard => "credit_card",
        }
    }
}

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user - records are never visible across users
    pub user_id: String,
    /// Expense category from the configured category set
    pub category: String,
    /// Amount spent, stored as a positive magnitude
    pub amount: Decimal,
    /// Calendar date the expense applies to
    pub date: Date,
    /// Free-text note, empty when not provided
    pub description: String,
    /// How the expense was paid
    pub payment_method: PaymentMethod,
    /// Card reference, set iff `payment_method` is `credit_card`
    pub credit_card_id: Option<String>,
    /// Whether this record came from a recurring template
    pub is_recurring: bool,
    /// Back-reference to the recurring template, if materialized
    pub recurring_item_id: Option<String>,
    /// Materialization period key (`"YYYY-MM"`), None for manual records.
    /// Unique together with `user_id` and `recurring_item_id`.
    pub period: Option<String>,
    /// When the record was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Card the expense was charged to, when paid by credit card
    #[sea_orm(
        belongs_to = "super::credit_card::Entity",
        from = "Column::CreditCardId",
        to = "super::credit_card::Column::Id"
    )]
    CreditCard,
    /// Materialized expense records reference their recurring template
    #[sea_orm(
        belongs_to = "super::recurring_item::Entity",
        from = "Column::RecurringItemId",
        to = "super::recurring_item::Column::Id"
    )]
    RecurringItem,
}

impl Related<super::credit_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditCard.def()
    }
}

impl Related<super::recurring_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecurringItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
