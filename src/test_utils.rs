//! Shared test utilities for `FinTrack`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test records with sensible defaults.

use crate::{
    config::categories::CategorySet,
    core::{
        budget::upsert_budget,
        credit_card::create_credit_card,
        expense::{NewExpense, create_expense},
        income::create_income,
        period::Period,
        recurring::NewRecurringItem,
    },
    entities,
    entities::{
        CardType, ItemType, PaymentMethod,
        budget::{CategoryBudget, CategoryBudgets},
    },
    errors::Result,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The default category set used across tests
#[must_use]
pub fn test_categories() -> CategorySet {
    CategorySet::default()
}

/// Shorthand for a calendar date; panics on invalid input (tests only)
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Creates an income record with sensible defaults.
///
/// # Defaults
/// * `source`: "Salary"
/// * `description`: None
/// * `is_recurring`: false
pub async fn create_test_income(
    db: &DatabaseConnection,
    user_id: &str,
    amount: Decimal,
    on: NaiveDate,
) -> Result<entities::income::Model> {
    create_income(db, user_id, "Salary", amount, on, None, false).await
}

/// Creates a cash expense record with sensible defaults.
pub async fn create_test_expense(
    db: &DatabaseConnection,
    user_id: &str,
    category: &str,
    amount: Decimal,
    on: NaiveDate,
) -> Result<entities::expense::Model> {
    create_expense(
        db,
        user_id,
        &test_categories(),
        cash_expense(category, amount, on),
    )
    .await
}

/// Creates a credit-card expense charged to `card_id`.
pub async fn create_test_card_expense(
    db: &DatabaseConnection,
    user_id: &str,
    category: &str,
    amount: Decimal,
    on: NaiveDate,
    card_id: &str,
) -> Result<entities::expense::Model> {
    let mut new_expense = cash_expense(category, amount, on);
    new_expense.payment_method = PaymentMethod::CreditCard;
    new_expense.credit_card_id = Some(card_id.to_string());
    create_expense(db, user_id, &test_categories(), new_expense).await
}

/// Builds cash-expense parameters without persisting anything.
#[must_use]
pub fn cash_expense(category: &str, amount: Decimal, on: NaiveDate) -> NewExpense {
    NewExpense {
        category: category.to_string(),
        amount,
        date: on,
        description: None,
        payment_method: PaymentMethod::Cash,
        credit_card_id: None,
        is_recurring: false,
    }
}

/// Creates a test credit card with sensible defaults.
///
/// # Defaults
/// * `name`: "Everyday Visa"
/// * `last_four_digits`: "4242"
/// * `card_type`: Visa
pub async fn create_test_card(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<entities::credit_card::Model> {
    create_credit_card(db, user_id, "Everyday Visa", "4242", CardType::Visa).await
}

/// Builds income-template parameters without persisting anything.
#[must_use]
pub fn income_template(source: Option<&str>, amount: Decimal, day_of_month: i32) -> NewRecurringItem {
    NewRecurringItem {
        item_type: ItemType::Income,
        source: source.map(ToString::to_string),
        category: None,
        amount,
        description: None,
        payment_method: None,
        credit_card_id: None,
        day_of_month,
    }
}

/// Builds cash expense-template parameters without persisting anything.
#[must_use]
pub fn expense_template(category: &str, amount: Decimal, day_of_month: i32) -> NewRecurringItem {
    NewRecurringItem {
        item_type: ItemType::Expense,
        source: None,
        category: Some(category.to_string()),
        amount,
        description: None,
        payment_method: Some(PaymentMethod::Cash),
        credit_card_id: None,
        day_of_month,
    }
}

/// Builds an ordered category-allocation list from (category, amount) pairs.
#[must_use]
pub fn category_budgets(allocations: &[(&str, Decimal)]) -> CategoryBudgets {
    CategoryBudgets(
        allocations
            .iter()
            .map(|(category, amount)| CategoryBudget {
                category: (*category).to_string(),
                amount: *amount,
            })
            .collect(),
    )
}

/// Saves a budget for (user, period) with the given allocations.
pub async fn seed_budget(
    db: &DatabaseConnection,
    user_id: &str,
    period: Period,
    total_budget: Decimal,
    allocations: &[(&str, Decimal)],
) -> Result<entities::budget::Model> {
    upsert_budget(
        db,
        user_id,
        &test_categories(),
        period,
        total_budget,
        category_budgets(allocations),
    )
    .await
}
