//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod budget;
pub mod credit_card;
pub mod expense;
pub mod income;
pub mod recurring_item;

// Re-export specific types to avoid conflicts
pub use budget::{Column as BudgetColumn, Entity as Budget, Model as BudgetModel};
pub use credit_card::{
    CardType, Column as CreditCardColumn, Entity as CreditCard, Model as CreditCardModel,
};
pub use expense::{
    Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel, PaymentMethod,
};
pub use income::{Column as IncomeColumn, Entity as Income, Model as IncomeModel};
pub use recurring_item::{
    Column as RecurringItemColumn, Entity as RecurringItem, ItemType, Model as RecurringItemModel,
};
