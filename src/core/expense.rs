//! Expense record operations.
//!
//! Create, list, and delete expense records for a user. Creation enforces the
//! payment-method pairing rule: a credit-card expense must reference a card
//! owned by the same user, and a cash expense must not reference one. Listing
//! optionally narrows by calendar month and by category.

use crate::{
    config::categories::CategorySet,
    core::period::Period,
    entities::{CreditCard, Expense, PaymentMethod, credit_card, expense},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{QueryOrder, Set, prelude::*};
use uuid::Uuid;

/// Parameters for creating an expense record
#[derive(Debug, Clone)]
pub struct NewExpense {
    /// Expense category, validated against the configured category set
    pub category: String,
    /// Positive amount spent
    pub amount: Decimal,
    /// Calendar date the expense applies to
    pub date: NaiveDate,
    /// Optional free-text note
    pub description: Option<String>,
    /// How the expense was paid
    pub payment_method: PaymentMethod,
    /// Card reference, required iff paid by credit card
    pub credit_card_id: Option<String>,
    /// Display flag for manually entered recurring expenses
    pub is_recurring: bool,
}

/// Verifies the payment-method/card pairing rule for `user_id`.
///
/// Returns the validated card id for credit-card payments, `None` for cash.
/// Shared with the recurring-template validation.
pub(crate) async fn validate_card_pairing(
    db: &DatabaseConnection,
    user_id: &str,
    payment_method: PaymentMethod,
    credit_card_id: Option<&str>,
) -> Result<Option<String>> {
    match payment_method {
        PaymentMethod::Cash => {
            if credit_card_id.is_some() {
                return Err(Error::InvalidPaymentMethod {
                    detail: "cash payments cannot reference a credit card",
                });
            }
            Ok(None)
        }
        PaymentMethod::CreditCard => {
            let card_id = credit_card_id.ok_or(Error::MissingField {
                field: "credit_card_id",
            })?;
            let card = CreditCard::find_by_id(card_id)
                .filter(credit_card::Column::UserId.eq(user_id))
                .one(db)
                .await?;
            if card.is_none() {
                return Err(Error::CreditCardNotFound {
                    id: card_id.to_string(),
                });
            }
            Ok(Some(card_id.to_string()))
        }
    }
}

/// Creates an expense record after validating amount, category, and the
/// payment-method pairing.
pub async fn create_expense(
    db: &DatabaseConnection,
    user_id: &str,
    categories: &CategorySet,
    new_expense: NewExpense,
) -> Result<expense::Model> {
    if new_expense.amount <= Decimal::ZERO {
        return Err(Error::InvalidAmount {
            amount: new_expense.amount,
        });
    }
    categories.validate(&new_expense.category)?;
    let credit_card_id = validate_card_pairing(
        db,
        user_id,
        new_expense.payment_method,
        new_expense.credit_card_id.as_deref(),
    )
    .await?;

    let record = expense::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        user_id: Set(user_id.to_string()),
        category: Set(new_expense.category),
        amount: Set(new_expense.amount),
        date: Set(new_expense.date),
        description: Set(new_expense.description.unwrap_or_default()),
        payment_method: Set(new_expense.payment_method),
        credit_card_id: Set(credit_card_id),
        is_recurring: Set(new_expense.is_recurring),
        recurring_item_id: Set(None),
        period: Set(None),
        created_at: Set(Utc::now()),
    };

    record.insert(db).await.map_err(Into::into)
}

/// Lists a user's expense records, newest date first.
///
/// `period` narrows to a calendar month; `category` narrows to a single
/// category label. Both filters are optional and combine.
pub async fn list_expenses(
    db: &DatabaseConnection,
    user_id: &str,
    period: Option<Period>,
    category: Option<&str>,
) -> Result<Vec<expense::Model>> {
    let mut query = Expense::find().filter(expense::Column::UserId.eq(user_id));

    if let Some(period) = period {
        query = query.filter(expense::Column::Date.between(period.first_day(), period.last_day()));
    }
    if let Some(category) = category {
        query = query.filter(expense::Column::Category.eq(category));
    }

    query
        .order_by_desc(expense::Column::Date)
        .order_by_asc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes one of the user's expense records.
///
/// Records belonging to other users are invisible here; attempting to delete
/// one reports `ExpenseNotFound` rather than touching it.
pub async fn delete_expense(
    db: &DatabaseConnection,
    user_id: &str,
    expense_id: &str,
) -> Result<()> {
    let outcome = Expense::delete_many()
        .filter(expense::Column::Id.eq(expense_id))
        .filter(expense::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    if outcome.rows_affected == 0 {
        return Err(Error::ExpenseNotFound {
            id: expense_id.to_string(),
        });
    }
    Ok(())
}
