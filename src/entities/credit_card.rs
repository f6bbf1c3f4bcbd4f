//! Credit card entity - Tracked payment cards.
//!
//! Cards are display metadata only (name, last four digits, network); no
//! balances or limits are tracked. Deleting a card does not cascade to the
//! expenses that reference it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Card network
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum CardType {
    /// Visa
    #[sea_orm(string_value = "Visa")]
    Visa,
    /// Mastercard
    #[sea_orm(string_value = "Mastercard")]
    Mastercard,
    /// American Express
    #[sea_orm(string_value = "American Express")]
    AmericanExpress,
    /// Discover
    #[sea_orm(string_value = "Discover")]
    Discover,
    /// Anything else
    #[sea_orm(string_value = "Other")]
    Other,
}

/// Credit card database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "credit_cards")]
pub struct Model {
    /// Unique identifier (UUID string)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning user - cards are never visible across users
    pub user_id: String,
    /// Human-readable card name (e.g., "Everyday Visa")
    pub name: String,
    /// Exactly four ASCII digits identifying the card
    pub last_four_digits: String,
    /// Card network
    pub card_type: CardType,
    /// When the card was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `CreditCard` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One card has many expenses charged to it
    #[sea_orm(has_many = "super::expense::Entity")]
    Expenses,
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
