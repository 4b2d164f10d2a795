//! Pushes alerts to the browser when the store records a large expense.
//!
//! Store writes publish [StoreEvent]s on [StoreEvents]. Each browser that opens
//! the alerts stream gets its own [EventStream] and a [relay_alerts] task that
//! filters the events down to that user's [HighExpenseAlert]s.

mod endpoint;
mod events;
mod high_expense;

pub use endpoint::{AlertsState, HIGH_EXPENSE_ALERT_EVENT, get_alerts_stream};
pub use events::{EventStream, StoreEvent, StoreEvents};
pub use high_expense::{
    DEFAULT_HIGH_EXPENSE_THRESHOLD, HighExpenseAlert, high_expense_alert, relay_alerts,
};
