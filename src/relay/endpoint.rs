//! The server-sent events endpoint that pushes high expense alerts to the browser.

use std::convert::Infallible;

use axum::{
    Extension,
    extract::{FromRef, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, stream};
use tokio::sync::mpsc;

use crate::{
    AppState,
    auth::UserID,
    relay::{StoreEvents, relay_alerts},
};

/// The name of the server-sent event carrying an alert message.
pub const HIGH_EXPENSE_ALERT_EVENT: &str = "highExpenseAlert";

/// Alerts waiting to be written to a slow client before the relay waits.
const ALERT_BUFFER_SIZE: usize = 8;

/// The state needed to stream alerts.
#[derive(Debug, Clone)]
pub struct AlertsState {
    /// Where new transactions are announced.
    pub store_events: StoreEvents,
    /// Expenses above this amount trigger an alert.
    pub alert_threshold: f64,
}

impl FromRef<AppState> for AlertsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            store_events: state.store_events.clone(),
            alert_threshold: state.alert_threshold,
        }
    }
}

/// Stream high expense alerts for the logged in user.
///
/// Each connection gets its own subscription and relay task, both of which
/// end when the client disconnects.
pub async fn get_alerts_stream(
    State(state): State<AlertsState>,
    Extension(user_id): Extension<UserID>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (sender, receiver) = mpsc::channel(ALERT_BUFFER_SIZE);
    tokio::spawn(relay_alerts(
        user_id,
        state.store_events.subscribe(),
        state.alert_threshold,
        sender,
    ));

    let alerts = stream::unfold(receiver, |mut receiver| async move {
        let alert = receiver.recv().await?;
        let event = Event::default()
            .event(HIGH_EXPENSE_ALERT_EVENT)
            .data(alert.message);

        Some((Ok(event), receiver))
    });

    Sse::new(alerts).keep_alive(KeepAlive::default())
}
