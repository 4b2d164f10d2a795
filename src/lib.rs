//! FinanceBot is a web app for tracking personal spending against a budget.
//!
//! The library serves HTML pages directly: a dashboard with period budgets and
//! spending charts, pages for recording transactions and setting budget
//! limits, and a server-sent events stream that alerts the user when a large
//! expense is recorded.
//!
//! The numbers on the dashboard come from the [budget] aggregator, a set of
//! pure functions over a user's transactions and budget limits.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod auth;
pub mod budget;
mod dashboard;
mod db;
mod endpoints;
mod error;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
pub mod relay;
mod routing;
mod timezone;
mod transaction;
mod user_data;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{PasswordHash, User, UserID, ValidatedPassword, create_user, get_user_by_email};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::logging_middleware;
pub use routing::build_router;
pub use transaction::{
    NewTransaction, Transaction, TransactionId, TransactionType, create_transaction,
    delete_transaction, get_categories, get_transaction, get_transactions,
};
pub use user_data::{UserData, UserDataUpdate, read_user_data, write_user_data};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("could not listen for ctrl+c: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
        },
    }

    // Open server-sent event streams never finish on their own, so cap the wait.
    handle.graceful_shutdown(Some(Duration::from_secs(1)));
}
