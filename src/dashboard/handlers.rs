//! Dashboard HTTP handlers and view rendering.
//!
//! The dashboard reads one snapshot of the user's data, runs the budget
//! aggregator over it and renders the result. If the aggregator rejects the
//! data, an explicit "data unavailable" state is shown instead of zeros.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    auth::{UserID, get_user_by_id},
    budget::{BudgetLimits, BudgetOverview, percentage_of_limit, summarise},
    dashboard::{
        cards::{category_breakdown_view, period_cards_view, savings_goal_card},
        charts::{DashboardChart, category_chart, charts_script, charts_view, weekly_expenses_chart},
    },
    endpoints,
    html::{HeadElement, base, link},
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::{Transaction, TransactionType},
    user_data::read_user_data,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading the user's data.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display a page with an overview of the user's spending against their budget.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let (user, user_data) = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        let user = get_user_by_id(user_id, &connection)
            .inspect_err(|error| tracing::error!("could not get user {user_id}: {error}"))?;

        (user, read_user_data(user_id, &connection))
    };

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);
    let greeting = user.email.as_str();

    let user_data = match user_data {
        Ok(user_data) => user_data,
        Err(Error::Aggregation(error)) => {
            tracing::warn!("could not read data for user {user_id}: {error}");
            return Ok(data_unavailable_view(nav_bar, greeting).into_response());
        }
        Err(error) => {
            tracing::error!("could not read data for user {user_id}: {error}");
            return Err(error);
        }
    };

    let now = OffsetDateTime::now_utc().to_offset(local_timezone);
    let overview = match summarise(&user_data.transactions, &user_data.limits, now) {
        Ok(overview) => overview,
        Err(error) => {
            tracing::warn!("could not summarise data for user {user_id}: {error}");
            return Ok(data_unavailable_view(nav_bar, greeting).into_response());
        }
    };

    let saved = total_income(&user_data.transactions) - overview.category_breakdown.total();

    Ok(dashboard_view(
        nav_bar,
        greeting,
        &overview,
        &user_data.limits,
        saved,
        user_data.transactions.is_empty(),
    )
    .into_response())
}

fn total_income(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|transaction| transaction.type_ == TransactionType::Income)
        .map(|transaction| transaction.amount)
        .sum()
}

fn page_header(greeting: &str) -> Markup {
    html! {
        div class="w-full mb-4" {
            h2 class="text-2xl font-bold" { "Financial Summary" }
            p class="text-sm text-gray-600 dark:text-gray-400" { "Signed in as " (greeting) }
        }
    }
}

fn dashboard_view(
    nav_bar: NavBar<'_>,
    greeting: &str,
    overview: &BudgetOverview,
    limits: &BudgetLimits,
    saved: f64,
    is_empty: bool,
) -> Markup {
    let nav_bar = nav_bar.into_html();
    let savings_percentage = percentage_of_limit(saved.max(0.0), limits.savings_goal);

    let charts = if is_empty {
        Vec::new()
    } else {
        vec![
            DashboardChart {
                id: "weekly-expenses-chart",
                options: weekly_expenses_chart(&overview.weekly_expenses).to_string(),
            },
            DashboardChart {
                id: "category-chart",
                options: category_chart(&overview.category_breakdown).to_string(),
            },
        ]
    };

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            (page_header(greeting))

            (period_cards_view(&overview.period_summary, &overview.percentages, limits))

            div class="grid grid-cols-1 lg:grid-cols-2 gap-4 w-full"
            {
                (savings_goal_card(saved, savings_percentage, limits))
                (category_breakdown_view(&overview.category_breakdown))
            }

            @if is_empty {
                div id="no-transactions" class="flex flex-col items-center px-6 py-8"
                {
                    h3 class="text-xl font-bold" { "Nothing here yet..." }

                    p
                    {
                        "Charts will show up here once you "
                        (link(endpoints::NEW_TRANSACTION_VIEW, "add a transaction"))
                        "."
                    }
                }
            } @else {
                (charts_view(&charts))
            }
        }
    );

    let scripts = if charts.is_empty() {
        Vec::new()
    } else {
        vec![
            HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
            charts_script(&charts),
        ]
    };

    base("Dashboard", &scripts, &content)
}

fn data_unavailable_view(nav_bar: NavBar<'_>, greeting: &str) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-6 py-8 mx-auto max-w-screen-xl text-gray-900 dark:text-white"
        {
            (page_header(greeting))

            div id="data-unavailable" class="flex flex-col items-center py-8"
            {
                h3 class="text-xl font-bold" { "Data unavailable" }

                p
                {
                    "Some of your transactions could not be read, so your budget
                    cannot be shown right now. Check your "
                    (link(endpoints::TRANSACTIONS_VIEW, "transactions"))
                    " for invalid entries."
                }
            }
        }
    );

    base("Dashboard", &[], &content)
}
