use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    alert::Alert,
    auth::UserID,
    transaction::{TransactionId, delete_transaction},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting one of the user's transactions, responds with an alert.
///
/// On success the response body only holds an out-of-band alert so that the
/// targeted table row is replaced with nothing.
pub async fn delete_transaction_endpoint(
    State(state): State<DeleteTransactionState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_transaction(user_id, transaction_id, &connection) {
        Ok(0) => {
            tracing::warn!("user {user_id} tried to delete missing transaction {transaction_id}");
            Error::DeleteMissingTransaction.into_alert_response()
        }
        // The status code has to be 200 OK or HTMX will not delete the table row.
        Ok(_) => {
            tracing::info!("user {user_id} deleted transaction {transaction_id}");
            Alert::SuccessSimple {
                message: "Transaction deleted".to_owned(),
            }
            .into_response()
        }
        Err(error) => {
            tracing::error!("could not delete transaction {transaction_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        Extension,
        extract::{Path, State},
        http::StatusCode,
    };
    use time::macros::datetime;

    use crate::{
        Error,
        test_utils::{get_test_connection_with_user, insert_test_user},
        transaction::{Transaction, TransactionType, create_transaction, get_transaction},
    };

    use super::{DeleteTransactionState, delete_transaction_endpoint};

    #[tokio::test]
    async fn deletes_transaction() {
        let (connection, user_id) = get_test_connection_with_user();
        let transaction = create_transaction(
            user_id,
            Transaction::build(
                TransactionType::Expense,
                1.23,
                datetime!(2025-10-26 00:00 UTC),
            ),
            &connection,
        )
        .unwrap();
        let state = DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Extension(user_id),
            Path(transaction.id),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_transaction(user_id, transaction.id, &connection),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn missing_transaction_is_not_found() {
        let (connection, user_id) = get_test_connection_with_user();
        let state = DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response =
            delete_transaction_endpoint(State(state), Extension(user_id), Path(42)).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn cannot_delete_another_users_transaction() {
        let (connection, user_id) = get_test_connection_with_user();
        let other_user = insert_test_user(&connection, "other@example.com");
        let theirs = create_transaction(
            other_user,
            Transaction::build(
                TransactionType::Expense,
                9.0,
                datetime!(2025-10-26 00:00 UTC),
            ),
            &connection,
        )
        .unwrap();
        let state = DeleteTransactionState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = delete_transaction_endpoint(
            State(state.clone()),
            Extension(user_id),
            Path(theirs.id),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let connection = state.db_connection.lock().unwrap();
        assert!(get_transaction(other_user, theirs.id, &connection).is_ok());
    }
}
