//! Card components for the budget overview.
//!
//! Provides card-based views showing:
//! - Spending against the limit for each budget period
//! - Progress towards the savings goal
//! - All-time spending per category

use maud::{Markup, html};

use crate::{
    budget::{BudgetLimits, CategoryBreakdown, PeriodExpenseSummary, PeriodPercentages},
    endpoints,
    html::{LINK_STYLE, format_currency},
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md flex flex-col justify-between";

/// One budget period as shown on a card.
struct PeriodCard<'a> {
    title: &'a str,
    spent: f64,
    limit: f64,
    percentage: f64,
}

/// Formats a percentage with one decimal place, avoiding "-0.0%".
fn format_percentage(value: f64) -> String {
    if value.abs() < 0.05 {
        "0.0".to_owned()
    } else {
        format!("{value:.1}")
    }
}

/// Renders a card for each budget period.
pub(super) fn period_cards_view(
    summary: &PeriodExpenseSummary,
    percentages: &PeriodPercentages,
    limits: &BudgetLimits,
) -> Markup {
    let cards = [
        PeriodCard {
            title: "Today",
            spent: summary.day,
            limit: limits.daily_limit,
            percentage: percentages.day,
        },
        PeriodCard {
            title: "This week",
            spent: summary.week,
            limit: limits.weekly_limit,
            percentage: percentages.week,
        },
        PeriodCard {
            title: "This month",
            spent: summary.month,
            limit: limits.monthly_limit,
            percentage: percentages.month,
        },
        PeriodCard {
            title: "This year",
            spent: summary.year,
            limit: limits.annual_limit,
            percentage: percentages.year,
        },
    ];

    html! {
        section id="period-cards" class="w-full mx-auto mb-4" {
            div class="flex justify-between items-baseline mb-4" {
                h3 class="text-xl font-semibold" { "Budget" }
                a href=(endpoints::BUDGET_VIEW) class=(LINK_STYLE) { "Edit limits" }
            }

            div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4" {
                @for card in &cards {
                    (period_card(card))
                }
            }
        }
    }
}

fn period_card(card: &PeriodCard) -> Markup {
    html! {
        div class=(CARD_STYLE) data-period=(card.title)
        {
            div {
                h4 class="text-lg font-semibold mb-3" { (card.title) }

                div class="text-3xl font-bold mb-1" { (format_currency(card.spent)) }

                @if card.limit > 0.0 {
                    div class="text-sm text-gray-600 dark:text-gray-400 mb-2" {
                        (format_percentage(card.percentage)) "% of " (format_currency(card.limit))
                    }
                    (progress_bar(card.percentage))
                } @else {
                    div class="text-sm text-gray-600 dark:text-gray-400 mb-2" {
                        "No limit set"
                    }
                }
            }
        }
    }
}

/// Renders progress towards the savings goal.
///
/// `saved` is the user's all-time income minus expenses.
pub(super) fn savings_goal_card(saved: f64, percentage: f64, limits: &BudgetLimits) -> Markup {
    html! {
        section id="savings-goal" class="w-full mx-auto mb-4" {
            div class=(CARD_STYLE) {
                h4 class="text-lg font-semibold mb-3" { "Savings Goal" }

                @if limits.savings_goal > 0.0 {
                    div class="text-3xl font-bold mb-1" { (format_currency(saved)) }
                    div class="text-sm text-gray-600 dark:text-gray-400 mb-2" {
                        (format_percentage(percentage)) "% of " (format_currency(limits.savings_goal))
                    }
                    (progress_bar(percentage))
                } @else {
                    p class="text-sm text-gray-600 dark:text-gray-400" {
                        "No savings goal set. "
                        a href=(endpoints::BUDGET_VIEW) class=(LINK_STYLE) { "Set one" }
                    }
                }

                @if limits.reminder_days > 0 {
                    p class="text-sm text-gray-600 dark:text-gray-400" {
                        "Reminder every " (limits.reminder_days) " days"
                    }
                }
            }
        }
    }
}

/// Renders the all-time expense total for each category with a grand total.
pub(super) fn category_breakdown_view(category_breakdown: &CategoryBreakdown) -> Markup {
    html! {
        section id="category-breakdown" class="w-full mx-auto mb-4" {
            div class=(CARD_STYLE) {
                h4 class="text-lg font-semibold mb-1" { "Expense Details" }
                p class="text-sm text-gray-600 dark:text-gray-400 mb-4" { "By category" }

                ul class="space-y-3" {
                    @for (category, total) in category_breakdown.iter() {
                        li class="flex justify-between items-center" data-category=(category) {
                            span class="text-gray-600 dark:text-gray-300" { (category) }
                            span class="font-semibold" { (format_currency(total)) }
                        }
                    }
                }

                div
                    id="category-total"
                    class="flex justify-between items-center mt-4 pt-4 border-t border-gray-200 dark:border-gray-700"
                {
                    span class="font-semibold" { "Total" }
                    span class="font-bold" { (format_currency(category_breakdown.total())) }
                }
            }
        }
    }
}

/// Renders a horizontal progress bar for a percentage between 0 and 100.
fn progress_bar(percentage: f64) -> Markup {
    let clamped = percentage.clamp(0.0, 100.0);

    // Ensure minimum 3% width so rounded corners are visible
    let display_percentage = if clamped > 0.0 && clamped < 3.0 {
        3.0
    } else {
        clamped
    };

    let bar_colour = if clamped >= 100.0 {
        "bg-red-600 dark:bg-red-500"
    } else {
        "bg-blue-600 dark:bg-blue-500"
    };

    html! {
        div
            class="w-full bg-gray-200 dark:bg-gray-700 rounded-full h-2.5 mb-2"
            role="progressbar"
            aria-valuenow=(format_percentage(clamped))
            aria-valuemin="0"
            aria-valuemax="100"
        {
            @if clamped > 0.0 {
                div
                    class={ (bar_colour) " h-2.5 rounded-full transition-all" }
                    style=(format!("width: {display_percentage:.1}%"))
                {}
            }
        }
    }
}
