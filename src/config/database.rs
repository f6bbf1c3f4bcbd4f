//! Database configuration module for `FinTrack`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! It provides functions for establishing database connections and creating all necessary tables
//! based on the entity definitions. The module uses `SeaORM`'s `Schema::create_table_from_entity`
//! method to automatically generate SQL statements from the entity models, ensuring that the
//! database schema matches the Rust struct definitions without requiring manual SQL.
//!
//! Two uniqueness guarantees are installed alongside the tables:
//! one materialized record per (user, recurring item, period) on both the
//! income and expenses tables, and one budget per (user, month, year).
//! `SQLite` treats NULL index keys as distinct, so manually entered records
//! (which leave `recurring_item_id` and `period` NULL) never collide.

use crate::entities::{Budget, CreditCard, Expense, Income, RecurringItem};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Index statements that cannot be expressed through entity derives.
const UNIQUE_INDEXES: [&str; 3] = [
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_income_user_item_period \
     ON income (user_id, recurring_item_id, period)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_expenses_user_item_period \
     ON expenses (user_id, recurring_item_id, period)",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_budgets_user_month_year \
     ON budgets (user_id, month, year)",
];

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/fintrack.sqlite".to_string())
}

/// Establishes a connection to the `SQLite` database using the `DATABASE_URL` environment variable.
///
/// Falls back to a default local `SQLite` file if no environment variable is set.
/// This function handles connection errors and provides a clean interface for database access
/// throughout the application.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all necessary database tables using `SeaORM`'s schema generation from entity definitions.
///
/// This function uses the `DeriveEntityModel` macros to automatically generate proper SQL
/// statements for table creation, then installs the uniqueness indexes that back
/// materialization idempotence and the one-budget-per-period invariant.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let income_table = schema.create_table_from_entity(Income);
    let expense_table = schema.create_table_from_entity(Expense);
    let credit_card_table = schema.create_table_from_entity(CreditCard);
    let recurring_item_table = schema.create_table_from_entity(RecurringItem);
    let budget_table = schema.create_table_from_entity(Budget);

    db.execute(builder.build(&income_table)).await?;
    db.execute(builder.build(&expense_table)).await?;
    db.execute(builder.build(&credit_card_table)).await?;
    db.execute(builder.build(&recurring_item_table)).await?;
    db.execute(builder.build(&budget_table)).await?;

    for statement in UNIQUE_INDEXES {
        db.execute_unprepared(statement).await?;
    }

    Ok(())
}
