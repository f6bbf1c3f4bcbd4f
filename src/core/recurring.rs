//! Recurring-item templates and monthly materialization.
//!
//! A recurring item is a template that the materializer turns into at most
//! one concrete income or expense record per calendar month. Duplicate
//! prevention lives in the store, not in application logic: materialized
//! records carry a `period` key, and a uniqueness index over
//! (user, recurring item, period) makes the conditional insert the sole
//! guard. Two passes over the same month - even concurrent ones - cannot
//! double-materialize an item.

use crate::{
    config::categories::CategorySet,
    core::{expense::validate_card_pairing, period::Period},
    entities::{
        Expense, Income, ItemType, PaymentMethod, RecurringItem, expense, income, recurring_item,
    },
    errors::{Error, Result},
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, TryInsertResult, prelude::*, sea_query::OnConflict};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

/// Parameters for creating a recurring-item template
#[derive(Debug, Clone)]
pub struct NewRecurringItem {
    /// Whether the template produces income or expense records
    pub item_type: ItemType,
    /// Income source label, required for income templates
    pub source: Option<String>,
    /// Expense category, required for expense templates
    pub category: Option<String>,
    /// Positive amount each materialized record carries
    pub amount: Decimal,
    /// Optional free-text note copied onto materialized records
    pub description: Option<String>,
    /// Payment method for expense templates (defaults to cash)
    pub payment_method: Option<PaymentMethod>,
    /// Card reference for credit-card expense templates
    pub credit_card_id: Option<String>,
    /// Day of month to materialize on (1-31, clamped to month length)
    pub day_of_month: i32,
}

/// Result of one materialization pass over a user's templates
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProcessOutcome {
    /// Number of records created by this pass
    pub created_count: usize,
    /// IDs of the created income/expense records
    pub created_ids: Vec<String>,
    /// Templates already materialized for the period
    pub skipped_count: usize,
    /// Templates whose persistence failed (logged, never fatal)
    pub failed_count: usize,
}

/// Creates a recurring-item template after validating its shape.
///
/// Income templates require a `source`; their expense-only fields are
/// stored as `None` regardless of input. Expense templates require a
/// `category` from the configured set and a valid payment-method/card
/// pairing; their `source` is stored as `None`.
pub async fn create_recurring_item(
    db: &DatabaseConnection,
    user_id: &str,
    categories: &CategorySet,
    item: NewRecurringItem,
) -> Result<recurring_item::Model> {
    if item.amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: item.amount,
        });
    }
    if !(1..=31).contains(&item.day_of_month) {
        return Err(Error::InvalidDayOfMonth {
            day: item.day_of_month,
        });
    }

    let (source, category, payment_method, credit_card_id) = match item.item_type {
        ItemType::Income => {
            let source = item
                .source
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or(Error::MissingField { field: "source" })?
                .to_string();
            (Some(source), None, None, None)
        }
        ItemType::Expense => {
            let category = item
                .category
                .clone()
                .ok_or(Error::MissingField { field: "category" })?;
            categories.validate(&category)?;
            let payment_method = item.payment_method.unwrap_or(PaymentMethod::Cash);
            let credit_card_id = validate_card_pairing(
                db,
                user_id,
                payment_method,
                item.credit_card_id.as_deref(),
            )
            .await?;
            (None, Some(category), Some(payment_method), credit_card_id)
        }
    };

    let template = recurring_item::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        item_type: Set(item.item_type),
        source: Set(source),
        category: Set(category),
        amount: Set(item.amount),
        description: Set(item.description.unwrap_or_default()),
        payment_method: Set(payment_method),
        credit_card_id: Set(credit_card_id),
        day_of_month: Set(item.day_of_month),
        is_active: Set(true),
        created_at: Set(Utc::now()),
    };

    template.insert(db).await.map_err(Into::into)
}

/// Lists a user's active recurring-item templates in creation order.
pub async fn list_recurring_items(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<Vec<recurring_item::Model>> {
    RecurringItem::find()
        .filter(recurring_item::Column::UserId.eq(user_id))
        .filter(recurring_item::Column::IsActive.eq(true))
        .order_by_asc(recurring_item::Column::CreatedAt)
        .order_by_asc(recurring_item::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deactivates one of the user's recurring-item templates.
///
/// The template stops materializing but stays in the store, so records it
/// already produced keep a resolvable back-reference.
pub async fn deactivate_recurring_item(
    db: &DatabaseConnection,
    user_id: &str,
    item_id: &str,
) -> Result<()> {
    let item = RecurringItem::find_by_id(item_id)
        .filter(recurring_item::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::RecurringItemNotFound {
            id: item_id.to_string(),
        })?;

    let mut active_model: recurring_item::ActiveModel = item.into();
    active_model.is_active = Set(false);
    active_model.update(db).await?;
    Ok(())
}

/// Materializes all of a user's active templates for one period.
///
/// Each template contributes at most one record per pass: the conditional
/// insert lands `Conflicted` for already-materialized (user, item, period)
/// keys, which count as skips. A store failure on one template is logged
/// and counted, and processing continues with the remaining templates.
pub async fn process_recurring_items(
    db: &DatabaseConnection,
    user_id: &str,
    period: Period,
) -> Result<ProcessOutcome> {
    let items = list_recurring_items(db, user_id).await?;

    let mut outcome = ProcessOutcome::default();
    for item in &items {
        match materialize_item(db, item, period).await {
            Ok(Some(record_id)) => {
                outcome.created_count += 1;
                outcome.created_ids.push(record_id);
            }
            Ok(None) => outcome.skipped_count += 1,
            Err(error) => {
                warn!(
                    item_id = %item.id,
                    %error,
                    "failed to materialize recurring item, continuing with the rest"
                );
                outcome.failed_count += 1;
            }
        }
    }

    debug!(
        user_id,
        period = %period.key(),
        created = outcome.created_count,
        skipped = outcome.skipped_count,
        failed = outcome.failed_count,
        "processed recurring items"
    );
    Ok(outcome)
}

/// Attempts the conditional insert for one template.
///
/// Returns the new record's id, or `None` when the period was already
/// materialized for this template.
async fn materialize_item(
    db: &DatabaseConnection,
    item: &recurring_item::Model,
    period: Period,
) -> Result<Option<String>> {
    let record_id = Uuid::new_v4().to_string();
    let day = u32::try_from(item.day_of_month).unwrap_or(1);
    let date = period.clamped_date(day);
    let now = Utc::now();

    match item.item_type {
        ItemType::Income => {
            let source = item
                .source
                .clone()
                .ok_or(Error::MissingField { field: "source" })?;
            let record = income::ActiveModel {
                id: Set(record_id.clone()),
                user_id: Set(item.user_id.clone()),
                source: Set(source),
                amount: Set(item.amount),
                date: Set(date),
                description: Set(item.description.clone()),
                is_recurring: Set(true),
                recurring_item_id: Set(Some(item.id.clone())),
                period: Set(Some(period.key())),
                created_at: Set(now),
            };
            let inserted = Income::insert(record)
                .on_conflict(
                    OnConflict::columns([
                        income::Column::UserId,
                        income::Column::RecurringItemId,
                        income::Column::Period,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .do_nothing()
                .exec(db)
                .await?;
            Ok(matches!(inserted, TryInsertResult::Inserted(_)).then_some(record_id))
        }
        ItemType::Expense => {
            let category = item
                .category
                .clone()
                .ok_or(Error::MissingField { field: "category" })?;
            let record = expense::ActiveModel {
                id: Set(record_id.clone()),
                user_id: Set(item.user_id.clone()),
                category: Set(category),
                amount: Set(item.amount),
                date: Set(date),
                description: Set(item.description.clone()),
                payment_method: Set(item.payment_method.unwrap_or(PaymentMethod::Cash)),
                credit_card_id: Set(item.credit_card_id.clone()),
                is_recurring: Set(true),
                recurring_item_id: Set(Some(item.id.clone())),
                period: Set(Some(period.key())),
                created_at: Set(now),
            };
            let inserted = Expense::insert(record)
                .on_conflict(
                    OnConflict::columns([
                        expense::Column::UserId,
                        expense::Column::RecurringItemId,
                        expense::Column::Period,
                    ])
                    .do_nothing()
                    .to_owned(),
                )
                .do_nothing()
                .exec(db)
                .await?;
            Ok(matches!(inserted, TryInsertResult::Inserted(_)).then_some(record_id))
        }
    }
}
