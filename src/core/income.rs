//! Income record operations.
//!
//! Create, list, and delete income records for a user. Records are immutable
//! once created except via delete. Listing optionally narrows to a single
//! calendar month, which is how the aggregators and the UI's month view
//! consume the table.

use crate::{
    core::period::Period,
    entities::{Income, income},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use uuid::Uuid;

/// Creates an income record after validating the amount and source.
///
/// # Arguments
/// * `db` - Database connection
/// * `user_id` - Owning user
/// * `source` - Where the money came from (e.g., "Salary")
/// * `amount` - Positive amount received
/// * `date` - Calendar date the income applies to
/// * `description` - Optional free-text note
/// * `is_recurring` - Display flag for manually entered recurring income
pub async fn create_income(
    db: &DatabaseConnection,
    user_id: &str,
    source: &str,
    amount: Decimal,
    date: NaiveDate,
    description: Option<String>,
    is_recurring: bool,
) -> Result<income::Model> {
    if amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount { amount });
    }
    if source.trim().is_empty() {
        return Err(Error::MissingField { field: "source" });
    }

    let record = income::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        source: Set(source.trim().to_string()),
        amount: Set(amount),
        date: Set(date),
        description: Set(description.unwrap_or_default()),
        is_recurring: Set(is_recurring),
        recurring_item_id: Set(None),
        period: Set(None),
        created_at: Set(Utc::now()),
    };

    record.insert(db).await.map_err(Into::into)
}

/// Lists a user's income records, newest date first.
///
/// When `period` is given, only records dated within that calendar month are
/// returned.
pub async fn list_income(
    db: &DatabaseConnection,
    user_id: &str,
    period: Option<Period>,
) -> Result<Vec<income::Model>> {
    let mut query = Income::find().filter(income::Column::UserId.eq(user_id));

    if let Some(period) = period {
        query = query.filter(income::Column::Date.between(period.first_day(), period.last_day()));
    }

    query
        .order_by_desc(income::Column::Date)
        .order_by_asc(income::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes one of the user's income records.
///
/// Records belonging to other users are invisible here; attempting to delete
/// one reports `IncomeNotFound` rather than touching it.
pub async fn delete_income(db: &DatabaseConnection, user_id: &str, income_id: &str) -> Result<()> {
    let outcome = Income::delete_many()
        .filter(income::Column::Id.eq(income_id))
        .filter(income::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if outcome.rows_affected == 0 {
        return Err(Error::IncomeNotFound {
            id: income_id.to_string(),
        });
    }
    Ok(())
}
