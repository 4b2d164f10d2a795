//! Turns store events into alerts about large expenses.

use tokio::sync::mpsc;

use crate::{
    auth::UserID,
    html::format_currency,
    relay::{EventStream, StoreEvent},
    transaction::{TransactionId, TransactionType},
};

/// Expenses above this amount trigger an alert unless the server is configured otherwise.
pub const DEFAULT_HIGH_EXPENSE_THRESHOLD: f64 = 100.0;

/// A notice that a user recorded an unusually large expense.
#[derive(Debug, Clone, PartialEq)]
pub struct HighExpenseAlert {
    /// The user who recorded the expense.
    pub user_id: UserID,
    /// The expense that triggered the alert.
    pub transaction_id: TransactionId,
    /// The text shown to the user.
    pub message: String,
}

/// Build an alert if `event` added an expense strictly greater than `threshold`.
pub fn high_expense_alert(event: &StoreEvent, threshold: f64) -> Option<HighExpenseAlert> {
    let StoreEvent::TransactionAdded {
        user_id,
        transaction,
    } = event;

    if transaction.type_ != TransactionType::Expense || transaction.amount <= threshold {
        return None;
    }

    let label = [&transaction.description, &transaction.category]
        .into_iter()
        .map(|text| text.trim())
        .find(|text| !text.is_empty())
        .unwrap_or("Expense");

    Some(HighExpenseAlert {
        user_id: *user_id,
        transaction_id: transaction.id,
        message: format!(
            "High expense detected: {label} {}",
            format_currency(transaction.amount)
        ),
    })
}

/// Forward the high expense alerts for `user_id` from `events` to `sink`.
///
/// Runs until `sink` is closed or the event source shuts down. The
/// subscription is dropped when this returns.
pub async fn relay_alerts(
    user_id: UserID,
    mut events: EventStream,
    threshold: f64,
    sink: mpsc::Sender<HighExpenseAlert>,
) {
    tracing::debug!("relaying high expense alerts for user {user_id}");

    loop {
        let event = tokio::select! {
            _ = sink.closed() => break,
            event = events.next() => match event {
                Some(event) => event,
                None => break,
            },
        };

        let Some(alert) = high_expense_alert(&event, threshold) else {
            continue;
        };

        if alert.user_id != user_id {
            continue;
        }

        tracing::info!(
            "high expense alert for user {user_id}, transaction {}",
            alert.transaction_id
        );

        if sink.send(alert).await.is_err() {
            break;
        }
    }

    tracing::debug!("stopped relaying alerts for user {user_id}");
}
