//! Turns a user's transactions and budget limits into the figures shown on the dashboard.
//!
//! Every function in this module is a pure function of its arguments. "Now" is
//! always passed in by the caller so that period boundaries are reproducible.
//!
//! Periods are calendar dates, not instants. The current period is taken from
//! `now`'s date, and a transaction belongs to the calendar date it carries in
//! its own stored offset. An expense recorded on the 1st of the month still
//! counts towards that month after a daylight saving change.
//!
//! Periods are cumulative: an expense recorded today counts towards the day,
//! week (Sunday to Saturday), month and year totals at once.

use std::collections::HashMap;

use time::{Date, Duration, OffsetDateTime};

use crate::{
    budget::BudgetLimits,
    transaction::{Transaction, TransactionId, TransactionType},
};

/// The category used for expenses that were recorded without one.
pub const UNCATEGORIZED: &str = "uncategorized";

/// The reasons why transactions could not be aggregated.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum AggregationError {
    /// A transaction amount is negative, infinite or not a number.
    #[error("transaction {id} has the invalid amount {amount}")]
    InvalidAmount {
        /// The ID of the offending transaction.
        id: TransactionId,
        /// The rejected amount.
        amount: f64,
    },

    /// A transaction date could not be read as a timestamp.
    #[error("\"{0}\" is not a valid transaction date")]
    InvalidDate(String),
}

/// Total spending in each budget period up to now.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodExpenseSummary {
    /// Spent since midnight.
    pub day: f64,
    /// Spent since midnight on the most recent Sunday.
    pub week: f64,
    /// Spent since the first of the month.
    pub month: f64,
    /// Spent since the first of January.
    pub year: f64,
}

impl PeriodExpenseSummary {
    fn add(&mut self, period_starts: &PeriodStarts, date: Date, amount: f64) {
        if date >= period_starts.day {
            self.day += amount;
        }
        if date >= period_starts.week {
            self.week += amount;
        }
        if date >= period_starts.month {
            self.month += amount;
        }
        if date >= period_starts.year {
            self.year += amount;
        }
    }
}

/// How much of each period's limit has been spent, as a percentage between 0 and 100.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodPercentages {
    /// Percentage of the daily limit.
    pub day: f64,
    /// Percentage of the weekly limit.
    pub week: f64,
    /// Percentage of the monthly limit.
    pub month: f64,
    /// Percentage of the annual limit.
    pub year: f64,
}

impl PeriodPercentages {
    /// Compare each period's spending against the matching limit.
    pub fn new(summary: &PeriodExpenseSummary, limits: &BudgetLimits) -> Self {
        Self {
            day: percentage_of_limit(summary.day, limits.daily_limit),
            week: percentage_of_limit(summary.week, limits.weekly_limit),
            month: percentage_of_limit(summary.month, limits.monthly_limit),
            year: percentage_of_limit(summary.year, limits.annual_limit),
        }
    }
}

/// All-time spending per category, in the order each category was first seen.
///
/// Categories are compared case-insensitively and stored lower-cased.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryBreakdown {
    totals: Vec<(String, f64)>,
    index: HashMap<String, usize>,
}

impl CategoryBreakdown {
    fn add(&mut self, category: &str, amount: f64) {
        let category = normalize_category(category);

        match self.index.get(&category) {
            Some(&position) => self.totals[position].1 += amount,
            None => {
                self.index.insert(category.clone(), self.totals.len());
                self.totals.push((category, amount));
            }
        }
    }

    /// The total for `category`, matched case-insensitively.
    pub fn get(&self, category: &str) -> Option<f64> {
        self.index
            .get(&normalize_category(category))
            .map(|&position| self.totals[position].1)
    }

    /// The categories and their totals in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals
            .iter()
            .map(|(category, total)| (category.as_str(), *total))
    }

    /// The number of distinct categories.
    pub fn len(&self) -> usize {
        self.totals.len()
    }

    /// Whether no expenses have been recorded.
    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// The sum over all categories.
    pub fn total(&self) -> f64 {
        self.totals.iter().map(|(_, total)| total).sum()
    }
}

/// Spending for each day of the current week, indexed from Sunday (0) to Saturday (6).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeeklyExpenses(pub [f64; 7]);

impl WeeklyExpenses {
    /// Short weekday names in the same order as the totals.
    pub const LABELS: [&'static str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

    /// The daily totals, Sunday first.
    pub fn by_weekday(&self) -> &[f64; 7] {
        &self.0
    }
}

/// The period totals after adding a transaction and how they compare to the limits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetStatus {
    /// The updated period totals.
    pub summary: PeriodExpenseSummary,
    /// The updated percentages of each limit.
    pub percentages: PeriodPercentages,
}

/// Everything the dashboard shows, computed from one snapshot of a user's data.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetOverview {
    /// Spending per period.
    pub period_summary: PeriodExpenseSummary,
    /// Spending per category.
    pub category_breakdown: CategoryBreakdown,
    /// Spending per period as a percentage of the limits.
    pub percentages: PeriodPercentages,
    /// Spending per day of the current week.
    pub weekly_expenses: WeeklyExpenses,
}

/// The first calendar date of each budget period containing `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PeriodStarts {
    day: Date,
    week: Date,
    month: Date,
    year: Date,
}

impl PeriodStarts {
    fn anchored_at(now: OffsetDateTime) -> Self {
        let today = now.date();
        let days_since_sunday = today.weekday().number_days_from_sunday();

        Self {
            day: today,
            week: today.saturating_sub(Duration::days(days_since_sunday.into())),
            month: today.saturating_sub(Duration::days(i64::from(today.day()) - 1)),
            year: today.saturating_sub(Duration::days(i64::from(today.ordinal()) - 1)),
        }
    }
}

fn normalize_category(category: &str) -> String {
    let category = category.trim();

    if category.is_empty() {
        UNCATEGORIZED.to_owned()
    } else {
        category.to_lowercase()
    }
}

/// Returns the amount of `transaction` if it is an expense, or `None` for income.
///
/// Both kinds of transaction must have a finite, non-negative amount.
fn expense_amount(transaction: &Transaction) -> Result<Option<f64>, AggregationError> {
    if !transaction.amount.is_finite() || transaction.amount < 0.0 {
        return Err(AggregationError::InvalidAmount {
            id: transaction.id,
            amount: transaction.amount,
        });
    }

    Ok(match transaction.type_ {
        TransactionType::Expense => Some(transaction.amount),
        TransactionType::Income => None,
    })
}

/// Sum the expenses in `transactions` into day, week, month and year totals relative to `now`.
///
/// Income is ignored. An empty list yields all zeros.
///
/// # Errors
///
/// Returns [AggregationError::InvalidAmount] if any transaction has a negative
/// or non-finite amount.
pub fn compute_period_expenses(
    transactions: &[Transaction],
    now: OffsetDateTime,
) -> Result<PeriodExpenseSummary, AggregationError> {
    let period_starts = PeriodStarts::anchored_at(now);

    transactions
        .iter()
        .try_fold(PeriodExpenseSummary::default(), |mut summary, transaction| {
            if let Some(amount) = expense_amount(transaction)? {
                summary.add(&period_starts, transaction.date.date(), amount);
            }

            Ok(summary)
        })
}

/// Sum all expenses in `transactions` by category, regardless of date.
///
/// Categories are lower-cased, and blank categories are counted under [UNCATEGORIZED].
///
/// # Errors
///
/// Returns [AggregationError::InvalidAmount] if any transaction has a negative
/// or non-finite amount.
pub fn compute_category_breakdown(
    transactions: &[Transaction],
) -> Result<CategoryBreakdown, AggregationError> {
    transactions
        .iter()
        .try_fold(CategoryBreakdown::default(), |mut breakdown, transaction| {
            if let Some(amount) = expense_amount(transaction)? {
                breakdown.add(&transaction.category, amount);
            }

            Ok(breakdown)
        })
}

/// Sum the expenses dated between the start of the current week and `now` by weekday.
///
/// # Errors
///
/// Returns [AggregationError::InvalidAmount] if any transaction has a negative
/// or non-finite amount.
pub fn compute_weekly_expenses(
    transactions: &[Transaction],
    now: OffsetDateTime,
) -> Result<WeeklyExpenses, AggregationError> {
    let week_start = PeriodStarts::anchored_at(now).week;

    transactions
        .iter()
        .try_fold(WeeklyExpenses::default(), |mut weekly, transaction| {
            let Some(amount) = expense_amount(transaction)? else {
                return Ok(weekly);
            };

            let date = transaction.date.date();

            if date >= week_start && transaction.date <= now {
                let weekday = date.weekday().number_days_from_sunday();
                weekly.0[usize::from(weekday)] += amount;
            }

            Ok(weekly)
        })
}

/// How much of `limit` has been used by `amount`, as a percentage rounded to one decimal place.
///
/// The result is capped at 100. A limit of zero (or less) means no limit has
/// been set and always gives 0.
pub fn percentage_of_limit(amount: f64, limit: f64) -> f64 {
    if limit.is_nan() || limit <= 0.0 {
        return 0.0;
    }

    let percentage = amount / limit * 100.0;
    if percentage.is_nan() {
        return 0.0;
    }

    (percentage.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

/// Add a newly recorded transaction to an existing period summary.
///
/// The returned summary is the same as calling [compute_period_expenses] on
/// the transactions behind `summary` plus `transaction`, so the dashboard can
/// be updated without reloading every transaction.
///
/// # Errors
///
/// Returns [AggregationError::InvalidAmount] if `transaction` has a negative
/// or non-finite amount.
pub fn apply_transaction(
    summary: &PeriodExpenseSummary,
    limits: &BudgetLimits,
    transaction: &Transaction,
    now: OffsetDateTime,
) -> Result<BudgetStatus, AggregationError> {
    let mut summary = *summary;

    if let Some(amount) = expense_amount(transaction)? {
        summary.add(
            &PeriodStarts::anchored_at(now),
            transaction.date.date(),
            amount,
        );
    }

    Ok(BudgetStatus {
        percentages: PeriodPercentages::new(&summary, limits),
        summary,
    })
}

/// Compute everything the dashboard needs from a user's transactions and limits.
///
/// # Errors
///
/// Returns [AggregationError::InvalidAmount] if any transaction has a negative
/// or non-finite amount.
pub fn summarise(
    transactions: &[Transaction],
    limits: &BudgetLimits,
    now: OffsetDateTime,
) -> Result<BudgetOverview, AggregationError> {
    let period_summary = compute_period_expenses(transactions, now)?;

    Ok(BudgetOverview {
        percentages: PeriodPercentages::new(&period_summary, limits),
        category_breakdown: compute_category_breakdown(transactions)?,
        weekly_expenses: compute_weekly_expenses(transactions, now)?,
        period_summary,
    })
}

#[cfg(test)]
mod tests {
    use time::{Duration, OffsetDateTime, macros::datetime};

    use crate::{
        budget::BudgetLimits,
        transaction::{Transaction, TransactionType},
    };

    use super::{
        AggregationError, PeriodExpenseSummary, UNCATEGORIZED, apply_transaction,
        compute_category_breakdown, compute_period_expenses, compute_weekly_expenses,
        percentage_of_limit, summarise,
    };

    // A Wednesday.
    const NOW: OffsetDateTime = datetime!(2025-04-09 15:00 UTC);

    fn expense(id: i64, amount: f64, category: &str, date: OffsetDateTime) -> Transaction {
        Transaction {
            id,
            type_: TransactionType::Expense,
            amount,
            category: category.to_owned(),
            description: String::new(),
            date,
        }
    }

    fn income(id: i64, amount: f64, date: OffsetDateTime) -> Transaction {
        Transaction {
            id,
            type_: TransactionType::Income,
            amount,
            category: "salary".to_owned(),
            description: String::new(),
            date,
        }
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            expense(1, 10.0, "Food", datetime!(2025-04-09 09:00 UTC)),
            expense(2, 7.5, "Transport", datetime!(2025-04-07 18:00 UTC)),
            income(3, 500.0, datetime!(2025-04-08 12:00 UTC)),
            expense(4, 30.0, "food", datetime!(2025-04-01 12:00 UTC)),
            expense(5, 102.5, "Rent", datetime!(2025-02-01 12:00 UTC)),
            expense(6, 999.0, "Holiday", datetime!(2024-12-31 23:59 UTC)),
        ]
    }

    #[test]
    fn single_expense_today_counts_towards_every_period() {
        let transactions = [expense(1, 10.0, "Food", datetime!(2025-04-09 00:00 UTC))];

        let got = compute_period_expenses(&transactions, NOW).unwrap();

        assert_eq!(
            got,
            PeriodExpenseSummary {
                day: 10.0,
                week: 10.0,
                month: 10.0,
                year: 10.0
            }
        );
    }

    #[test]
    fn income_is_ignored() {
        let transactions = [income(1, 50.0, NOW)];

        let summary = compute_period_expenses(&transactions, NOW).unwrap();
        let breakdown = compute_category_breakdown(&transactions).unwrap();

        assert_eq!(summary, PeriodExpenseSummary::default());
        assert!(breakdown.is_empty());
    }

    #[test]
    fn empty_transactions_give_zero_totals() {
        assert_eq!(
            compute_period_expenses(&[], NOW).unwrap(),
            PeriodExpenseSummary::default()
        );
        assert!(compute_category_breakdown(&[]).unwrap().is_empty());
    }

    #[test]
    fn buckets_are_cumulative() {
        let got = compute_period_expenses(&sample_transactions(), NOW).unwrap();

        assert_eq!(got.day, 10.0);
        assert_eq!(got.week, 17.5);
        assert_eq!(got.month, 47.5);
        assert_eq!(got.year, 150.0);
        assert!(got.day <= got.week && got.week <= got.month && got.month <= got.year);
    }

    #[test]
    fn week_starts_on_sunday() {
        let saturday = expense(1, 5.0, "", datetime!(2025-04-05 23:59 UTC));
        let sunday = expense(2, 3.0, "", datetime!(2025-04-06 00:00 UTC));

        let got = compute_period_expenses(&[saturday, sunday], NOW).unwrap();

        assert_eq!(got.week, 3.0);
    }

    #[test]
    fn today_follows_the_offset_of_now() {
        // 2025-04-09 02:00 in UTC+12 is still 2025-04-08 in UTC.
        let now = datetime!(2025-04-09 02:00 +12);
        let transactions = [
            expense(1, 8.0, "Food", datetime!(2025-04-09 00:00 +12)),
            expense(2, 3.0, "Food", datetime!(2025-04-08 00:00 +12)),
        ];

        let got = compute_period_expenses(&transactions, now).unwrap();

        assert_eq!(got.day, 8.0);
        assert_eq!(got.week, 11.0);
    }

    #[test]
    fn expenses_keep_their_period_across_a_daylight_saving_change() {
        // Recorded at local midnight under NZDT, viewed after the switch to NZST.
        let now = datetime!(2025-04-09 12:00 +12);
        let first_of_month = expense(1, 40.0, "Rent", datetime!(2025-04-01 00:00 +13));
        let last_sunday = expense(2, 6.0, "", datetime!(2025-04-06 00:00 +13));
        let transactions = [first_of_month, last_sunday];

        let got = compute_period_expenses(&transactions, now).unwrap();
        let weekly = compute_weekly_expenses(&transactions, now).unwrap();
        let status = apply_transaction(
            &PeriodExpenseSummary::default(),
            &BudgetLimits::default(),
            &transactions[0],
            now,
        )
        .unwrap();

        assert_eq!(got.day, 0.0);
        assert_eq!(got.week, 6.0);
        assert_eq!(got.month, 46.0);
        assert_eq!(got.year, 46.0);
        assert_eq!(weekly.by_weekday()[0], 6.0);
        assert_eq!(status.summary.month, 40.0);
        assert_eq!(status.summary.year, 40.0);
    }

    #[test]
    fn week_spanning_two_months() {
        // Tuesday 1 April, the week started on Sunday 30 March.
        let now = datetime!(2025-04-01 12:00 UTC);
        let transactions = [
            expense(1, 4.0, "", datetime!(2025-03-31 12:00 UTC)),
            expense(2, 6.0, "", datetime!(2025-04-01 08:00 UTC)),
        ];

        let got = compute_period_expenses(&transactions, now).unwrap();

        assert_eq!(got.week, 10.0);
        assert_eq!(got.month, 6.0);
    }

    #[test]
    fn recomputing_gives_the_same_result() {
        let transactions = sample_transactions();

        let first = compute_period_expenses(&transactions, NOW).unwrap();
        let second = compute_period_expenses(&transactions, NOW).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn applying_a_transaction_matches_recomputing() {
        let mut transactions = sample_transactions();
        let limits = BudgetLimits::default();
        let summary = compute_period_expenses(&transactions, NOW).unwrap();
        let new_transaction = expense(7, 12.25, "Coffee", NOW - Duration::hours(1));

        let status = apply_transaction(&summary, &limits, &new_transaction, NOW).unwrap();
        transactions.push(new_transaction);
        let want = compute_period_expenses(&transactions, NOW).unwrap();

        assert_eq!(status.summary, want);
    }

    #[test]
    fn applying_any_transaction_matches_recomputing_and_never_shrinks_a_total() {
        let transactions = sample_transactions();
        let limits = BudgetLimits::default();
        let before = compute_period_expenses(&transactions, NOW).unwrap();
        let candidates = [
            expense(10, 4.0, "", datetime!(2024-12-31 12:00 UTC)),
            expense(11, 4.0, "", datetime!(2025-01-01 00:00 UTC)),
            expense(12, 4.0, "", datetime!(2025-04-01 00:00 UTC)),
            expense(13, 4.0, "", datetime!(2025-04-06 00:00 UTC)),
            expense(14, 4.0, "", datetime!(2025-04-09 00:00 UTC)),
            income(15, 4.0, NOW),
            expense(16, 4.0, "", NOW + Duration::days(1)),
        ];

        for candidate in candidates {
            let status = apply_transaction(&before, &limits, &candidate, NOW).unwrap();
            let mut all = transactions.clone();
            all.push(candidate.clone());
            let want = compute_period_expenses(&all, NOW).unwrap();
            let got = status.summary;

            assert_eq!(got, want, "transaction {}", candidate.id);
            assert!(
                got.day >= before.day
                    && got.week >= before.week
                    && got.month >= before.month
                    && got.year >= before.year,
                "transaction {} shrank a total: {got:?}",
                candidate.id
            );
            assert!(
                got.day <= got.week && got.week <= got.month && got.month <= got.year,
                "transaction {} broke period nesting: {got:?}",
                candidate.id
            );
        }
    }

    #[test]
    fn applying_an_expense_updates_percentages() {
        let limits = BudgetLimits::default();
        let summary = compute_period_expenses(&[], NOW).unwrap();

        let status =
            apply_transaction(&summary, &limits, &expense(1, 10.0, "Food", NOW), NOW).unwrap();

        assert_eq!(status.summary.day, 10.0);
        assert_eq!(status.percentages.day, 50.0);
        assert_eq!(status.percentages.week, 40.0);
        assert_eq!(status.percentages.month, 10.0);
        assert_eq!(status.percentages.year, 1.0);
    }

    #[test]
    fn applying_income_only_refreshes_percentages() {
        let limits = BudgetLimits::default();
        let summary = PeriodExpenseSummary {
            day: 5.0,
            week: 5.0,
            month: 5.0,
            year: 5.0,
        };

        let status = apply_transaction(&summary, &limits, &income(1, 80.0, NOW), NOW).unwrap();

        assert_eq!(status.summary, summary);
        assert_eq!(status.percentages.day, 25.0);
    }

    #[test]
    fn percentage_of_limit_examples() {
        assert_eq!(percentage_of_limit(10.0, 20.0), 50.0);
        assert_eq!(percentage_of_limit(30.0, 20.0), 100.0);
        assert_eq!(percentage_of_limit(5.0, 0.0), 0.0);
        assert_eq!(percentage_of_limit(1.0, 3.0), 33.3);
        assert_eq!(percentage_of_limit(0.0, 25.0), 0.0);
    }

    #[test]
    fn percentage_of_limit_stays_within_bounds() {
        for amount in [0.0, 0.01, 1.0, 19.99, 20.0, 1e9, f64::INFINITY] {
            for limit in [0.0, 0.5, 20.0, 1000.0] {
                let percentage = percentage_of_limit(amount, limit);
                assert!(
                    (0.0..=100.0).contains(&percentage),
                    "percentage_of_limit({amount}, {limit}) = {percentage}"
                );
            }
        }
    }

    #[test]
    fn zero_limit_never_divides() {
        for amount in [0.0, 1.0, 1e12] {
            assert_eq!(percentage_of_limit(amount, 0.0), 0.0);
        }
    }

    #[test]
    fn categories_are_case_folded_in_first_occurrence_order() {
        let transactions = [
            expense(1, 10.0, "Food", NOW),
            expense(2, 5.0, "food", NOW),
            expense(3, 7.0, "Transport", NOW),
        ];

        let breakdown = compute_category_breakdown(&transactions).unwrap();

        assert_eq!(
            breakdown.iter().collect::<Vec<_>>(),
            vec![("food", 15.0), ("transport", 7.0)]
        );
        assert_eq!(breakdown.get("FOOD"), Some(15.0));
    }

    #[test]
    fn blank_categories_are_uncategorized() {
        let transactions = [expense(1, 2.0, "", NOW), expense(2, 3.0, "   ", NOW)];

        let breakdown = compute_category_breakdown(&transactions).unwrap();

        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown.get(UNCATEGORIZED), Some(5.0));
    }

    #[test]
    fn category_totals_add_up_to_all_expenses() {
        let transactions = sample_transactions();
        let all_expenses: f64 = transactions
            .iter()
            .filter(|transaction| transaction.type_ == TransactionType::Expense)
            .map(|transaction| transaction.amount)
            .sum();

        let breakdown = compute_category_breakdown(&transactions).unwrap();

        assert!((breakdown.total() - all_expenses).abs() < 1e-9);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let transactions = [expense(3, -5.0, "Food", NOW)];

        let want = AggregationError::InvalidAmount {
            id: 3,
            amount: -5.0,
        };
        assert_eq!(
            compute_period_expenses(&transactions, NOW),
            Err(want.clone())
        );
        assert_eq!(compute_category_breakdown(&transactions), Err(want));
    }

    #[test]
    fn non_finite_amount_is_rejected() {
        let transactions = [expense(1, 1.0, "Food", NOW), expense(2, f64::NAN, "Food", NOW)];

        let got = summarise(&transactions, &BudgetLimits::default(), NOW);

        assert!(matches!(
            got,
            Err(AggregationError::InvalidAmount { id: 2, .. })
        ));
    }

    #[test]
    fn weekly_expenses_are_indexed_from_sunday() {
        let weekly = compute_weekly_expenses(&sample_transactions(), NOW).unwrap();

        // Monday 7 April and Wednesday 9 April.
        assert_eq!(weekly.by_weekday(), &[0.0, 7.5, 0.0, 10.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn weekly_expenses_exclude_the_future() {
        let later_today = expense(1, 3.0, "", NOW + Duration::hours(1));

        let weekly = compute_weekly_expenses(&[later_today], NOW).unwrap();

        assert_eq!(weekly.by_weekday().iter().sum::<f64>(), 0.0);
    }

    #[test]
    fn summarise_combines_all_figures() {
        let transactions = sample_transactions();
        let limits = BudgetLimits::default();

        let overview = summarise(&transactions, &limits, NOW).unwrap();

        assert_eq!(
            overview.period_summary,
            compute_period_expenses(&transactions, NOW).unwrap()
        );
        assert_eq!(overview.percentages.day, 50.0);
        assert_eq!(overview.percentages.week, 70.0);
        assert_eq!(overview.percentages.month, 47.5);
        assert_eq!(overview.percentages.year, 15.0);
        assert_eq!(overview.category_breakdown.len(), 4);
        assert_eq!(overview.weekly_expenses.by_weekday()[3], 10.0);
    }
}
