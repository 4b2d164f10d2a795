//! Defines the endpoint for recording a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime, Time};

use crate::{
    AppState, Error,
    auth::UserID,
    endpoints,
    relay::{StoreEvent, StoreEvents},
    timezone::get_local_offset,
    transaction::{Transaction, TransactionType, create_transaction},
};

/// The state needed to record a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// Where newly stored transactions are announced.
    pub store_events: StoreEvents,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            store_events: state.store_events.clone(),
        }
    }
}

/// The form data for recording a transaction.
#[derive(Debug, Serialize, Deserialize)]
pub struct TransactionForm {
    /// Whether money was spent or earned.
    pub type_: TransactionType,
    /// The value of the transaction in dollars.
    pub amount: f64,
    /// The local date when the transaction occurred.
    pub date: Date,
    /// A free-text label such as "Food".
    #[serde(default)]
    pub category: String,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: String,
}

/// A route handler for recording a transaction, redirects to the dashboard on success.
///
/// The date is stored as local midnight. Subscribers of the store events
/// are notified after the transaction has been stored.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let Some(local_timezone) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    if !form.amount.is_finite() || form.amount < 0.0 {
        tracing::warn!("rejected transaction with amount {}", form.amount);
        return Error::InvalidTransactionAmount(form.amount).into_alert_response();
    }

    let now_local_time = OffsetDateTime::now_utc().to_offset(local_timezone);

    if form.date > now_local_time.date() {
        tracing::warn!("rejected transaction dated {} in the future", form.date);
        return Error::FutureDate(form.date).into_alert_response();
    }

    let date = form
        .date
        .with_time(Time::MIDNIGHT)
        .assume_offset(local_timezone);
    let transaction = Transaction::build(form.type_, form.amount, date)
        .category(form.category.trim())
        .description(form.description.trim());

    let transaction = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_alert_response();
            }
        };

        match create_transaction(user_id, transaction, &connection) {
            Ok(transaction) => transaction,
            Err(error) => {
                tracing::error!("could not create transaction: {error}");
                return error.into_alert_response();
            }
        }
    };

    tracing::info!(
        "user {user_id} recorded {} {} of {:.2}",
        transaction.type_,
        transaction.id,
        transaction.amount
    );
    state.store_events.publish(StoreEvent::TransactionAdded {
        user_id,
        transaction,
    });

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
