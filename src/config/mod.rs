/// Database configuration and connection management
pub mod database;

/// Expense-category configuration loading from config.toml
pub mod categories;
