//! A user's spending limits for each budget period and their savings goal.

use rusqlite::{Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use crate::{Error, auth::UserID};

/// Spending limits per period plus a savings goal.
///
/// A limit of zero means no limit has been set for that period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetLimits {
    /// The most the user wants to spend in a day.
    pub daily_limit: f64,
    /// The most the user wants to spend in a week.
    pub weekly_limit: f64,
    /// The most the user wants to spend in a month.
    pub monthly_limit: f64,
    /// The most the user wants to spend in a year.
    pub annual_limit: f64,
    /// How much the user wants to save.
    pub savings_goal: f64,
    /// How many days before the savings deadline to remind the user.
    pub reminder_days: u32,
}

impl Default for BudgetLimits {
    fn default() -> Self {
        Self {
            daily_limit: 20.0,
            weekly_limit: 25.0,
            monthly_limit: 100.0,
            annual_limit: 1000.0,
            savings_goal: 0.0,
            reminder_days: 0,
        }
    }
}

impl BudgetLimits {
    /// Create budget limits, checking that every amount is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns [Error::InvalidBudgetLimit] naming the first invalid field.
    pub fn new(
        daily_limit: f64,
        weekly_limit: f64,
        monthly_limit: f64,
        annual_limit: f64,
        savings_goal: f64,
        reminder_days: u32,
    ) -> Result<Self, Error> {
        Ok(Self {
            daily_limit: validate_amount("daily limit", daily_limit)?,
            weekly_limit: validate_amount("weekly limit", weekly_limit)?,
            monthly_limit: validate_amount("monthly limit", monthly_limit)?,
            annual_limit: validate_amount("annual limit", annual_limit)?,
            savings_goal: validate_amount("savings goal", savings_goal)?,
            reminder_days,
        })
    }
}

fn validate_amount(name: &'static str, value: f64) -> Result<f64, Error> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidBudgetLimit { name, value })
    }
}

/// Create the budget limits table, one row per user.
pub fn create_budget_limits_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget_limits (
                user_id INTEGER PRIMARY KEY,
                daily_limit REAL NOT NULL DEFAULT 20,
                weekly_limit REAL NOT NULL DEFAULT 25,
                monthly_limit REAL NOT NULL DEFAULT 100,
                annual_limit REAL NOT NULL DEFAULT 1000,
                savings_goal REAL NOT NULL DEFAULT 0,
                reminder_days INTEGER NOT NULL DEFAULT 0,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    Ok(())
}

/// Get the budget limits for `user_id`, storing the defaults if the user has none yet.
///
/// # Errors
///
/// Returns [Error::SqlError] if the query fails, e.g. if `user_id` does not
/// belong to a registered user.
pub fn get_budget_limits(user_id: UserID, connection: &Connection) -> Result<BudgetLimits, Error> {
    let stored = connection
        .prepare(
            "SELECT daily_limit, weekly_limit, monthly_limit, annual_limit, savings_goal, reminder_days
            FROM budget_limits WHERE user_id = :user_id",
        )?
        .query_row(&[(":user_id", &user_id.as_i64())], map_budget_limits_row)
        .optional()?;

    match stored {
        Some(limits) => Ok(limits),
        None => {
            tracing::debug!("No budget limits for user {user_id}, storing defaults");
            let limits = BudgetLimits::default();
            save_budget_limits(user_id, &limits, connection)?;
            Ok(limits)
        }
    }
}

/// Replace the budget limits for `user_id` with `limits`.
///
/// # Errors
///
/// Returns [Error::SqlError] if the query fails.
pub fn save_budget_limits(
    user_id: UserID,
    limits: &BudgetLimits,
    connection: &Connection,
) -> Result<(), Error> {
    connection.execute(
        "INSERT INTO budget_limits
            (user_id, daily_limit, weekly_limit, monthly_limit, annual_limit, savings_goal, reminder_days)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        ON CONFLICT(user_id) DO UPDATE SET
            daily_limit = excluded.daily_limit,
            weekly_limit = excluded.weekly_limit,
            monthly_limit = excluded.monthly_limit,
            annual_limit = excluded.annual_limit,
            savings_goal = excluded.savings_goal,
            reminder_days = excluded.reminder_days",
        (
            user_id.as_i64(),
            limits.daily_limit,
            limits.weekly_limit,
            limits.monthly_limit,
            limits.annual_limit,
            limits.savings_goal,
            limits.reminder_days,
        ),
    )?;

    Ok(())
}

fn map_budget_limits_row(row: &Row) -> Result<BudgetLimits, rusqlite::Error> {
    Ok(BudgetLimits {
        daily_limit: row.get(0)?,
        weekly_limit: row.get(1)?,
        monthly_limit: row.get(2)?,
        annual_limit: row.get(3)?,
        savings_goal: row.get(4)?,
        reminder_days: row.get(5)?,
    })
}
