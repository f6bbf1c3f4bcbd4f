//! Income entity - Represents money coming in.
//!
//! Each income record is scoped to a single user and carries a source label,
//! a positive amount, and a calendar date. Records created by the recurring
//! materializer carry a `recurring_item_id` back-reference and a `period` key
//! (`"YYYY-MM"`); records entered directly leave both unset.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Income database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "income")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user - records are never visible across users
    pub user_id: String,
    /// Where the money came from (e.g., "Salary", "Freelance")
    pub source: String,
    /// Amount received, stored as a positive magnitude
    pub amount: Decimal,
    /// Calendar date the income applies to
    pub date: Date,
    /// Free-text note, empty when not provided
    pub description: String,
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

/// Defines relationships between Income and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Materialized income records reference their recurring template
    #[sea_orm(
        belongs_to = "super::recurring_item::Entity",
        from = "Column::RecurringItemId",
        to = "super::recurring_item::Column::Id"
    )]
    RecurringItem,
}

impl Related<super::recurring_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecurringItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
