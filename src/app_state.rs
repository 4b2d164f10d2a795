//! The shared state handed to every request handler.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use rusqlite::Connection;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{Error, auth::DEFAULT_COOKIE_DURATION, db::initialize, relay::StoreEvents};

/// How many store events a slow subscriber may fall behind before it starts skipping events.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Everything the handlers share: the session key, the database and the store event channel.
///
/// Handlers take the parts they need through `FromRef` sub-states.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,

    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The database connection
    pub db_connection: Arc<Mutex<Connection>>,

    /// Where the store announces new transactions.
    pub store_events: StoreEvents,

    /// Expenses above this amount trigger a high expense alert.
    pub alert_threshold: f64,
}

impl AppState {
    /// Create the app state around `db_connection`, creating any missing tables first.
    ///
    /// `local_timezone` should be a canonical timezone name, e.g. "Pacific/Auckland".
    /// Budget periods start at midnight in that timezone.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the tables cannot be created.
    pub fn new(
        db_connection: Connection,
        cookie_secret: &str,
        local_timezone: &str,
        alert_threshold: f64,
    ) -> Result<Self, Error> {
        initialize(&db_connection)?;

        let connection = Arc::new(Mutex::new(db_connection));

        Ok(Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            local_timezone: local_timezone.to_owned(),
            db_connection: connection,
            store_events: StoreEvents::new(EVENT_CHANNEL_CAPACITY),
            alert_threshold,
        })
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Derive the key that signs and encrypts session cookies from `secret`.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}
