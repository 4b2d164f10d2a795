//! Dismissable alert messages that HTMX swaps into the page's alert container.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// A success or error message shown to the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// The action succeeded.
    SuccessSimple { message: String },
    /// The action failed.
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert.
    ///
    /// Success alerts are swapped out-of-band into `#alert-container` so that
    /// the main swap target (e.g., a deleted table row) is left empty. Error
    /// alerts are expected to be targeted at the container with
    /// `hx-target-error`.
    pub fn into_html(self) -> Markup {
        let (is_error, message, details) = match self {
            Alert::SuccessSimple { message } => (false, message, String::new()),
            Alert::Error { message, details } => (true, message, details),
        };

        let style = if is_error {
            "flex p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 \
            dark:bg-gray-800 dark:text-red-400"
        } else {
            "flex p-4 mb-4 text-sm text-green-800 rounded-lg bg-green-50 \
            dark:bg-gray-800 dark:text-green-400"
        };

        let alert = html! {
            div role="alert" class=(style)
            {
                div class="grow"
                {
                    span class="font-medium" { (message) }

                    @if !details.is_empty() {
                        p { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Close"
                    class="ms-auto -mx-1.5 -my-1.5 rounded-lg p-1.5 inline-flex items-center justify-center h-8 w-8"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        };

        if is_error {
            alert
        } else {
            html! {
                div hx-swap-oob="innerHTML:#alert-container" { (alert) }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        // HTMX only swaps 2xx responses into the main target.
        (StatusCode::OK, Html(self.into_html().into_string())).into_response()
    }
}
