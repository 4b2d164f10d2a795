//! Reads and writes everything stored for a user in one go.
//!
//! The dashboard reads a [UserData] snapshot before running the budget
//! aggregator, and bulk imports such as the test database seeder write a
//! [UserDataUpdate].

use rusqlite::Connection;

use crate::{
    Error,
    auth::UserID,
    budget::{BudgetLimits, get_budget_limits, save_budget_limits},
    transaction::{NewTransaction, Transaction, create_transaction, get_transactions},
};

/// A user's transactions and budget limits.
#[derive(Debug, Clone, PartialEq)]
pub struct UserData {
    /// Every transaction the user has recorded, in the order they were recorded.
    pub transactions: Vec<Transaction>,
    /// The user's budget limits, the defaults if they never set any.
    pub limits: BudgetLimits,
}

/// A partial update to a user's stored data.
///
/// Fields that are `None` leave the stored data untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserDataUpdate {
    /// Transactions to append to the user's list.
    pub transactions: Option<Vec<NewTransaction>>,
    /// Budget limits that replace the stored limits.
    pub limits: Option<BudgetLimits>,
}

/// Read the transactions and budget limits for `user_id`.
///
/// # Errors
///
/// Returns a:
/// - [Error::Aggregation] if a stored transaction has an unreadable date,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn read_user_data(user_id: UserID, connection: &Connection) -> Result<UserData, Error> {
    let transactions = get_transactions(user_id, connection)?;
    let limits = get_budget_limits(user_id, connection)?;

    Ok(UserData {
        transactions,
        limits,
    })
}

/// Merge `update` into the data stored for `user_id`.
///
/// New transactions are appended and new limits replace the old ones. Either
/// everything in `update` is stored or nothing is. Returns the transactions
/// that were created.
///
/// # Errors
///
/// Returns an [Error::SqlError] if any write fails, in which case no changes are kept.
pub fn write_user_data(
    user_id: UserID,
    update: UserDataUpdate,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let sql_transaction = connection.unchecked_transaction()?;

    if let Some(limits) = update.limits {
        save_budget_limits(user_id, &limits, &sql_transaction)?;
    }

    let created = update
        .transactions
        .unwrap_or_default()
        .into_iter()
        .map(|transaction| create_transaction(user_id, transaction, &sql_transaction))
        .collect::<Result<Vec<_>, _>>()?;

    sql_transaction.commit()?;

    tracing::debug!(
        "stored {} transactions for user {user_id}{}",
        created.len(),
        if update.limits.is_some() {
            " and replaced their budget limits"
        } else {
            ""
        }
    );

    Ok(created)
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        Error,
        auth::UserID,
        budget::{BudgetLimits, get_budget_limits},
        test_utils::get_test_connection_with_user,
        transaction::{Transaction, TransactionType, create_transaction, get_transactions},
    };

    use super::{UserDataUpdate, read_user_data, write_user_data};

    #[test]
    fn new_user_has_no_transactions_and_default_limits() {
        let (connection, user_id) = get_test_connection_with_user();

        let data = read_user_data(user_id, &connection).unwrap();

        assert!(data.transactions.is_empty());
        assert_eq!(data.limits, BudgetLimits::default());
    }

    #[test]
    fn transactions_are_appended() {
        let (connection, user_id) = get_test_connection_with_user();
        let existing = create_transaction(
            user_id,
            Transaction::build(
                TransactionType::Expense,
                5.0,
                datetime!(2025-04-01 12:00 UTC),
            ),
            &connection,
        )
        .unwrap();

        let created = write_user_data(
            user_id,
            UserDataUpdate {
                transactions: Some(vec![
                    Transaction::build(
                        TransactionType::Income,
                        50.0,
                        datetime!(2025-04-02 12:00 UTC),
                    )
                    .category("Salary"),
                ]),
                limits: None,
            },
            &connection,
        )
        .unwrap();

        let data = read_user_data(user_id, &connection).unwrap();
        assert_eq!(created.len(), 1);
        assert_eq!(data.transactions, vec![existing, created[0].clone()]);
        assert_eq!(data.limits, BudgetLimits::default());
    }

    #[test]
    fn limits_are_replaced_without_touching_transactions() {
        let (connection, user_id) = get_test_connection_with_user();
        let existing = create_transaction(
            user_id,
            Transaction::build(
                TransactionType::Expense,
                5.0,
                datetime!(2025-04-01 12:00 UTC),
            ),
            &connection,
        )
        .unwrap();
        let limits = BudgetLimits::new(10.0, 70.0, 300.0, 3650.0, 200.0, 2).unwrap();

        let created = write_user_data(
            user_id,
            UserDataUpdate {
                transactions: None,
                limits: Some(limits),
            },
            &connection,
        )
        .unwrap();

        assert!(created.is_empty());
        let data = read_user_data(user_id, &connection).unwrap();
        assert_eq!(data.transactions, vec![existing]);
        assert_eq!(data.limits, limits);
    }

    #[test]
    fn failed_write_keeps_nothing() {
        let (connection, user_id) = get_test_connection_with_user();
        let limits = BudgetLimits::new(1.0, 2.0, 3.0, 4.0, 5.0, 6).unwrap();
        let unknown_user = UserID::new(999);

        let result = write_user_data(
            unknown_user,
            UserDataUpdate {
                transactions: Some(vec![Transaction::build(
                    TransactionType::Expense,
                    1.0,
                    datetime!(2025-04-01 12:00 UTC),
                )]),
                limits: Some(limits),
            },
            &connection,
        );

        assert!(matches!(result, Err(Error::SqlError(_))));
        let row_count: i64 = connection
            .query_row("SELECT COUNT(*) FROM budget_limits", [], |row| row.get(0))
            .unwrap();
        assert_eq!(row_count, 0);
        assert!(get_transactions(unknown_user, &connection).unwrap().is_empty());
        assert_eq!(
            get_budget_limits(user_id, &connection).unwrap(),
            BudgetLimits::default()
        );
    }
}
