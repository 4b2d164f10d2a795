//! Recording, listing and deleting a user's expenses and income.
//!
//! This module contains:
//! - The `Transaction` model and `NewTransaction` builder
//! - Database functions for storing and querying a user's transactions
//! - The pages and endpoints for managing transactions

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod transactions_page;

pub use core::{
    NewTransaction, Transaction, TransactionId, TransactionType, create_transaction,
    delete_transaction, get_categories, get_transaction, get_transactions,
};
pub(crate) use core::create_transaction_table;
pub use create_endpoint::create_transaction_endpoint;
pub use create_page::get_new_transaction_page;
pub use delete_endpoint::delete_transaction_endpoint;
pub use transactions_page::get_transactions_page;
