//! Unified error types for the finance tracker core.
//!
//! Validation problems are reported with enough detail for the caller to
//! correct the input; store failures surface as a single `Database` variant
//! without leaking driver internals past the message.

use thiserror::Error;

/// Unified error type covering validation, lookup, store, and config failures
#[derive(Debug, Error)]
pub enum Error {
    /// Monetary amount is zero, negative, or otherwise unusable
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: rust_decimal::Decimal,
    },

    /// A required field was empty or absent
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: &'static str,
    },

    /// Credit card digits must be exactly four ASCII digits
    #[error("Invalid card digits: {digits:?} (expected exactly 4 digits)")]
    InvalidCardDigits {
        /// The rejected input
        digits: String,
    },

    /// Payment method and credit card reference do not pair up
    #[error("Invalid payment method pairing: {detail}")]
    InvalidPaymentMethod {
        /// What was wrong with the pairing
        detail: &'static str,
    },

    /// Recurring template day of month outside 1-31
    #[error("Invalid day of month: {day} (expected 1-31)")]
    InvalidDayOfMonth {
        /// The rejected day
        day: i32,
    },

    /// Expense category is not in the configured category set
    #[error("Unknown expense category: {category}")]
    UnknownCategory {
        /// The rejected category label
        category: String,
    },

    /// Calendar month outside 1-12
    #[error("Invalid month: {month} (expected 1-12)")]
    InvalidPeriod {
        /// The rejected month number
        month: u32,
    },

    /// Trend window length must be at least one month
    #[error("Invalid trend window: {months} (expected a positive month count)")]
    InvalidMonthsBack {
        /// The rejected window length
        months: u32,
    },

    /// Credit card does not exist or belongs to another user
    #[error("Credit card not found: {id}")]
    CreditCardNotFound {
        /// The card id that failed to resolve
        id: String,
    },

    /// Recurring item does not exist or belongs to another user
    #[error("Recurring item not found: {id}")]
    RecurringItemNotFound {
        /// The item id that failed to resolve
        id: String,
    },

    /// Income record does not exist or belongs to another user
    #[error("Income not found: {id}")]
    IncomeNotFound {
        /// The record id that failed to resolve
        id: String,
    },

    /// Expense record does not exist or belongs to another user
    #[error("Expense not found: {id}")]
    ExpenseNotFound {
        /// The record id that failed to resolve
        id: String,
    },

    /// Underlying store failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration file or environment problem
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },
}

/// Convenience `Result` type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
