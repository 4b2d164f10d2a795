//! Defines the route handler for the page that lists a user's transactions.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState, Error,
    auth::UserID,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_DELETE_STYLE, EXPENSE_BADGE_STYLE, INCOME_BADGE_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base,
        format_currency,
    },
    navigation::NavBar,
    timezone::get_local_offset,
    transaction::{Transaction, TransactionType, get_transactions},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Render the user's transactions, most recent first.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let mut transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_transactions(user_id, &connection)
            .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?
    };

    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    Ok(transactions_view(&transactions, local_timezone).into_response())
}

fn type_badge(type_: TransactionType) -> Markup {
    let (style, label) = match type_ {
        TransactionType::Expense => (EXPENSE_BADGE_STYLE, "Expense"),
        TransactionType::Income => (INCOME_BADGE_STYLE, "Income"),
    };

    html!( span class=(style) { (label) } )
}

fn signed_amount(transaction: &Transaction) -> f64 {
    match transaction.type_ {
        TransactionType::Expense => -transaction.amount,
        TransactionType::Income => transaction.amount,
    }
}

fn amount_class(amount: f64) -> &'static str {
    if amount < 0.0 {
        "text-red-700 dark:text-red-300"
    } else {
        "text-green-700 dark:text-green-300"
    }
}

fn transaction_row(transaction: &Transaction, local_timezone: UtcOffset) -> Markup {
    let date = transaction.date.to_offset(local_timezone).date();
    let amount = signed_amount(transaction);
    let delete_url = format_endpoint(endpoints::TRANSACTION, transaction.id);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE)
            {
                time datetime=(date) { (date) }
            }

            td class=(TABLE_CELL_STYLE) { (type_badge(transaction.type_)) }

            td class=(TABLE_CELL_STYLE) { (transaction.category) }

            td class=(TABLE_CELL_STYLE) { (transaction.description) }

            td class={ (TABLE_CELL_STYLE) " text-right " (amount_class(amount)) }
            {
                (format_currency(amount))
            }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    type="button"
                    class=(BUTTON_DELETE_STYLE)
                    hx-delete=(delete_url)
                    hx-confirm="Are you sure you want to delete this transaction? This cannot be undone."
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                    hx-target-error="#alert-container"
                {
                    "Delete"
                }
            }
        }
    }
}

fn transactions_view(transactions: &[Transaction], local_timezone: UtcOffset) -> Markup {
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html! {
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                header class="flex justify-between flex-wrap items-end"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                div class="w-full overflow-x-auto rounded bg-gray-50 dark:bg-gray-800"
                {
                    table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_row(transaction, local_timezone))
                            }

                            @if transactions.is_empty() {
                                tr class=(TABLE_ROW_STYLE)
                                {
                                    td colspan="6" class="px-6 py-4 text-center"
                                    {
                                        "No transactions yet. "
                                        a href=(endpoints::NEW_TRANSACTION_VIEW) class=(LINK_STYLE)
                                        {
                                            "Record your first one."
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base("Transactions", &[], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use scraper::{ElementRef, Html, Selector};
    use time::macros::datetime;

    use crate::{
        endpoints::{self, format_endpoint},
        test_utils::{assert_valid_html, get_test_connection_with_user, parse_html_document},
        transaction::{Transaction, TransactionType, create_transaction},
    };

    use super::{TransactionsViewState, get_transactions_page};

    #[track_caller]
    fn must_get_rows(html: &Html) -> Vec<ElementRef<'_>> {
        html.select(&Selector::parse("tbody tr[data-transaction-id]").unwrap())
            .collect()
    }

    #[tokio::test]
    async fn lists_transactions_most_recent_first() {
        let (connection, user_id) = get_test_connection_with_user();
        let older = create_transaction(
            user_id,
            Transaction::build(
                TransactionType::Expense,
                12.5,
                datetime!(2025-04-01 00:00 UTC),
            )
            .category("Food"),
            &connection,
        )
        .unwrap();
        let newer = create_transaction(
            user_id,
            Transaction::build(
                TransactionType::Income,
                100.0,
                datetime!(2025-04-08 00:00 UTC),
            )
            .description("Pay"),
            &connection,
        )
        .unwrap();
        let state = TransactionsViewState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_transactions_page(State(state), Extension(user_id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        let rows = must_get_rows(&html);
        assert_eq!(rows.len(), 2);
        let ids = rows
            .iter()
            .map(|row| row.value().attr("data-transaction-id").unwrap().to_owned())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![newer.id.to_string(), older.id.to_string()]);

        let first_row_text = rows[0].text().collect::<String>();
        assert!(first_row_text.contains("2025-04-08"));
        assert!(first_row_text.contains("$100.00"));
        let second_row_text = rows[1].text().collect::<String>();
        assert!(second_row_text.contains("-$12.50"));

        let delete_button = rows[1]
            .select(&Selector::parse("button").unwrap())
            .next()
            .unwrap();
        assert_eq!(
            delete_button.value().attr("hx-delete"),
            Some(format_endpoint(endpoints::TRANSACTION, older.id).as_str())
        );
    }

    #[tokio::test]
    async fn shows_empty_state() {
        let (connection, user_id) = get_test_connection_with_user();
        let state = TransactionsViewState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_transactions_page(State(state), Extension(user_id))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        assert!(must_get_rows(&html).is_empty());
        let empty_cell = html
            .select(&Selector::parse("td[colspan='6']").unwrap())
            .next()
            .expect("No empty state found");
        assert!(empty_cell.text().collect::<String>().contains("No transactions yet"));
    }

    #[tokio::test]
    async fn dates_are_shown_in_local_time() {
        let (connection, user_id) = get_test_connection_with_user();
        create_transaction(
            user_id,
            Transaction::build(
                TransactionType::Expense,
                1.0,
                datetime!(2025-04-08 20:00 UTC),
            ),
            &connection,
        )
        .unwrap();
        let state = TransactionsViewState {
            db_connection: Arc::new(Mutex::new(connection)),
            local_timezone: "Pacific/Auckland".to_owned(),
        };

        let response = get_transactions_page(State(state), Extension(user_id))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let rows = must_get_rows(&html);
        let date = rows[0]
            .select(&Selector::parse("time").unwrap())
            .next()
            .unwrap();
        assert_eq!(date.value().attr("datetime"), Some("2025-04-09"));
    }
}
