//! The page and endpoint for editing a user's budget limits and savings goal.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::UserID,
    budget::{BudgetLimits, get_budget_limits, save_budget_limits},
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, base, dollar_input_styles, loading_spinner,
    },
    navigation::NavBar,
};

/// The state needed to show and save budget limits.
#[derive(Debug, Clone)]
pub struct BudgetLimitsState {
    /// The database connection for managing budget limits.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetLimitsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The budget form as submitted by the browser.
#[derive(Debug, Serialize, Deserialize)]
pub struct BudgetLimitsForm {
    pub daily_limit: f64,
    pub weekly_limit: f64,
    pub monthly_limit: f64,
    pub annual_limit: f64,
    pub savings_goal: f64,
    pub reminder_days: u32,
}

/// Display the budget form filled in with the user's current limits.
pub async fn get_budget_page(
    State(state): State<BudgetLimitsState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let limits = get_budget_limits(user_id, &connection)
        .inspect_err(|error| tracing::error!("could not get budget limits: {error}"))?;

    Ok(budget_view(&limits).into_response())
}

/// Replace the user's budget limits and redirect to the dashboard.
///
/// Negative or non-finite amounts are rejected with an alert rather than
/// being coerced to zero.
pub async fn update_budget_endpoint(
    State(state): State<BudgetLimitsState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<BudgetLimitsForm>,
) -> Response {
    let limits = match BudgetLimits::new(
        form.daily_limit,
        form.weekly_limit,
        form.monthly_limit,
        form.annual_limit,
        form.savings_goal,
        form.reminder_days,
    ) {
        Ok(limits) => limits,
        Err(error) => {
            tracing::warn!("rejected budget limits for user {user_id}: {error}");
            return error.into_alert_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = save_budget_limits(user_id, &limits, &connection) {
        tracing::error!("could not save budget limits: {error}");
        return error.into_alert_response();
    }

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

fn amount_input(name: &str, label: &str, value: f64) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            div class="input-wrapper w-full"
            {
                input
                    type="number"
                    name=(name)
                    id=(name)
                    step="0.01"
                    min="0"
                    required
                    value=(format!("{value:.2}"))
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}

fn budget_view(limits: &BudgetLimits) -> Markup {
    let nav_bar = NavBar::new(endpoints::BUDGET_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold mb-4" { "Budget" }

            form
                hx-put=(endpoints::BUDGET_API)
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                class="w-full space-y-4 md:space-y-6"
            {
                (amount_input("daily_limit", "Daily limit", limits.daily_limit))
                (amount_input("weekly_limit", "Weekly limit", limits.weekly_limit))
                (amount_input("monthly_limit", "Monthly limit", limits.monthly_limit))
                (amount_input("annual_limit", "Annual limit", limits.annual_limit))
                (amount_input("savings_goal", "Savings goal", limits.savings_goal))

                div
                {
                    label for="reminder_days" class=(FORM_LABEL_STYLE) { "Reminder (days)" }

                    input
                        type="number"
                        name="reminder_days"
                        id="reminder_days"
                        step="1"
                        min="0"
                        required
                        value=(limits.reminder_days)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                p class="text-sm text-gray-500 dark:text-gray-400"
                {
                    "Set a limit to zero to stop tracking that period."
                }

                button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="inline htmx-indicator" id="indicator" { (loading_spinner()) }
                    "Save budget"
                }
            }
        }
    };

    let head_elements: [HeadElement; 1] = [dollar_input_styles()];

    base("Budget", &head_elements, &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use axum_extra::extract::Form;

    use crate::{
        budget::{BudgetLimits, get_budget_limits},
        endpoints,
        test_utils::{
            assert_form_input_with_value, assert_hx_endpoint, assert_hx_redirect,
            assert_valid_html, get_test_connection_with_user, must_get_form, parse_html_document,
        },
    };

    use super::{BudgetLimitsForm, BudgetLimitsState, get_budget_page, update_budget_endpoint};

    #[tokio::test]
    async fn budget_page_shows_current_limits() {
        let (connection, user_id) = get_test_connection_with_user();
        let state = BudgetLimitsState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_budget_page(State(state), Extension(user_id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::BUDGET_API, "hx-put");
        assert_form_input_with_value(&form, "daily_limit", "number", "20.00");
        assert_form_input_with_value(&form, "weekly_limit", "number", "25.00");
        assert_form_input_with_value(&form, "monthly_limit", "number", "100.00");
        assert_form_input_with_value(&form, "annual_limit", "number", "1000.00");
        assert_form_input_with_value(&form, "savings_goal", "number", "0.00");
        assert_form_input_with_value(&form, "reminder_days", "number", "0");
    }

    #[tokio::test]
    async fn saving_budget_redirects_to_dashboard() {
        let (connection, user_id) = get_test_connection_with_user();
        let state = BudgetLimitsState {
            db_connection: Arc::new(Mutex::new(connection)),
        };
        let form = BudgetLimitsForm {
            daily_limit: 30.0,
            weekly_limit: 150.0,
            monthly_limit: 600.0,
            annual_limit: 7200.0,
            savings_goal: 1000.0,
            reminder_days: 3,
        };

        let response =
            update_budget_endpoint(State(state.clone()), Extension(user_id), Form(form)).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, endpoints::DASHBOARD_VIEW);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_budget_limits(user_id, &connection).unwrap(),
            BudgetLimits::new(30.0, 150.0, 600.0, 7200.0, 1000.0, 3).unwrap()
        );
    }

    #[tokio::test]
    async fn negative_limit_is_rejected_and_not_saved() {
        let (connection, user_id) = get_test_connection_with_user();
        let state = BudgetLimitsState {
            db_connection: Arc::new(Mutex::new(connection)),
        };
        let form = BudgetLimitsForm {
            daily_limit: -5.0,
            weekly_limit: 25.0,
            monthly_limit: 100.0,
            annual_limit: 1000.0,
            savings_goal: 0.0,
            reminder_days: 0,
        };

        let response =
            update_budget_endpoint(State(state.clone()), Extension(user_id), Form(form)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let connection = state.db_connection.lock().unwrap();
        assert_eq!(
            get_budget_limits(user_id, &connection).unwrap(),
            BudgetLimits::default()
        );
    }

    #[test]
    fn form_with_text_amount_does_not_parse() {
        let result = serde_html_form::from_str::<BudgetLimitsForm>(
            "daily_limit=abc&weekly_limit=25&monthly_limit=100&annual_limit=1000\
            &savings_goal=0&reminder_days=0",
        );

        assert!(result.is_err());
    }
}
