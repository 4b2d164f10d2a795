/*! Creates the application's database schema. */

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error, auth::create_user_table, budget::create_budget_limits_table,
    transaction::create_transaction_table,
};

/// Enable foreign keys and create the tables for users, transactions and budget limits.
///
/// Safe to call on a database that has already been initialized.
///
/// # Errors
///
/// Returns [Error::SqlError] if any table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    // Foreign keys are off by default and the pragma is a no-op inside a transaction.
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_transaction_table(&transaction)?;
    create_budget_limits_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
