//! Budget limits and the aggregation of transactions into budget progress.

mod aggregator;
mod limits;
mod limits_page;

pub use aggregator::{
    AggregationError, BudgetOverview, BudgetStatus, CategoryBreakdown, PeriodExpenseSummary,
    PeriodPercentages, UNCATEGORIZED, WeeklyExpenses, apply_transaction,
    compute_category_breakdown, compute_period_expenses, compute_weekly_expenses,
    percentage_of_limit, summarise,
};
pub use limits::{BudgetLimits, get_budget_limits, save_budget_limits};
pub(crate) use limits::create_budget_limits_table;
pub(crate) use limits_page::{get_budget_page, update_budget_endpoint};
