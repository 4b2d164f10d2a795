#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_input, assert_form_input_with_value, assert_form_submit_button,
    assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{assert_content_type, assert_hx_redirect};

use std::str::FromStr;

use email_address::EmailAddress;
use rusqlite::Connection;

use crate::{
    auth::{PasswordHash, UserID, create_user},
    db::initialize,
};

/// Create an initialized in-memory database with one registered user.
pub(crate) fn get_test_connection_with_user() -> (Connection, UserID) {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");
    let user_id = insert_test_user(&connection, "test@example.com");

    (connection, user_id)
}

/// Register a user with a throwaway password hash.
pub(crate) fn insert_test_user(connection: &Connection, email: &str) -> UserID {
    create_user(
        &EmailAddress::from_str(email).expect("Invalid test e-mail"),
        PasswordHash::new_unchecked("hunter2"),
        connection,
    )
    .expect("Could not create test user")
    .id
}
