//! Chart generation and rendering for the dashboard.
//!
//! This module creates interactive ECharts visualizations for the budget overview:
//! - **Weekly Expenses Chart**: expenses for each day of the current week
//! - **Category Chart**: all-time expenses split by category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Pie, bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    budget::{CategoryBreakdown, WeeklyExpenses},
    html::HeadElement,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn weekly_expenses_chart(weekly_expenses: &WeeklyExpenses) -> Chart {
    Chart::new()
        .title(Title::new().text("Daily Expenses").subtext("This week"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(WeeklyExpenses::LABELS.to_vec()),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            bar::Bar::new()
                .name("Expenses")
                .data(weekly_expenses.by_weekday().to_vec()),
        )
}

pub(super) fn category_chart(category_breakdown: &CategoryBreakdown) -> Chart {
    let data = category_breakdown
        .iter()
        .map(|(category, total)| (total, category))
        .collect::<Vec<_>>();

    Chart::new()
        .title(Title::new().text("Expenses by Category").subtext("All time"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("1%"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["40%", "65%"])
                .data(data),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        budget::{WeeklyExpenses, compute_category_breakdown},
        transaction::{Transaction, TransactionType},
    };

    use super::{DashboardChart, category_chart, charts_script, weekly_expenses_chart};

    #[test]
    fn weekly_chart_has_a_bar_per_weekday() {
        let weekly = WeeklyExpenses([0.0, 1.5, 0.0, 12.0, 0.0, 0.0, 0.0]);

        let options = weekly_expenses_chart(&weekly).to_string();

        assert!(options.contains(r#""Sun""#), "{options}");
        assert!(options.contains(r#""Sat""#), "{options}");
        assert!(options.contains("12.0"), "{options}");
    }

    #[test]
    fn category_chart_names_each_category() {
        let transactions = ["Food", "food", "Rent"]
            .into_iter()
            .enumerate()
            .map(|(id, category)| Transaction {
                id: id as i64,
                type_: TransactionType::Expense,
                amount: 10.0,
                category: category.to_owned(),
                description: String::new(),
                date: datetime!(2025-04-01 12:00 UTC),
            })
            .collect::<Vec<_>>();
        let breakdown = compute_category_breakdown(&transactions).unwrap();

        let options = category_chart(&breakdown).to_string();

        assert!(options.contains(r#""food""#), "{options}");
        assert!(options.contains(r#""rent""#), "{options}");
        assert!(!options.contains(r#""Food""#), "{options}");
    }

    #[test]
    fn script_initialises_every_chart() {
        let charts = [
            DashboardChart {
                id: "first-chart",
                options: "{}".to_owned(),
            },
            DashboardChart {
                id: "second-chart",
                options: "{}".to_owned(),
            },
        ];

        let crate::html::HeadElement::ScriptSource(script) = charts_script(&charts) else {
            panic!("expected an inline script");
        };

        assert!(script.0.contains(r#"getElementById("first-chart")"#));
        assert!(script.0.contains(r#"getElementById("second-chart")"#));
    }
}
