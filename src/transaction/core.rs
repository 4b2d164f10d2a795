//! Defines the core data models and database queries for transactions.

use std::fmt::Display;

use rusqlite::{
    Connection, Row,
    types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{Error, auth::UserID, budget::AggregationError};

/// The ID of a transaction in the database.
pub type TransactionId = i64;

// ============================================================================
// MODELS
// ============================================================================

/// Whether money was spent or earned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money was spent.
    Expense,
    /// Money was earned.
    Income,
}

impl TransactionType {
    /// The lowercase name used in forms and in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Expense => "expense",
            TransactionType::Income => "income",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "expense" => Ok(TransactionType::Expense),
            "income" => Ok(TransactionType::Income),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type \"{other}\"").into(),
            )),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are never changed after they are recorded, only deleted.
/// To create a new `Transaction`, use [Transaction::build].
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether money was spent or earned.
    pub type_: TransactionType,
    /// How much money was spent or earned, never negative.
    pub amount: f64,
    /// A free-text label such as "Food", stored as entered.
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: OffsetDateTime,
}

impl Transaction {
    /// Start building a transaction that has not been stored yet.
    pub fn build(type_: TransactionType, amount: f64, date: OffsetDateTime) -> NewTransaction {
        NewTransaction {
            type_,
            amount,
            category: String::new(),
            description: String::new(),
            date,
        }
    }
}

/// A transaction that has not been assigned an ID yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// Whether money was spent or earned.
    pub type_: TransactionType,
    /// How much money was spent or earned.
    pub amount: f64,
    /// A free-text label such as "Food".
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened.
    pub date: OffsetDateTime,
}

impl NewTransaction {
    /// Set the category.
    pub fn category(mut self, category: &str) -> Self {
        category.clone_into(&mut self.category);
        self
    }

    /// Set the description.
    pub fn description(mut self, description: &str) -> Self {
        description.clone_into(&mut self.description);
        self
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table.
///
/// IDs are never reused, even after the transaction with the largest ID is deleted.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                type TEXT NOT NULL CHECK (type IN ('expense', 'income')),
                amount REAL NOT NULL,
                category TEXT NOT NULL DEFAULT '',
                description TEXT NOT NULL DEFAULT '',
                date TEXT NOT NULL,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_user_id ON \"transaction\"(user_id)",
        (),
    )?;

    Ok(())
}

/// Store `transaction` for `user_id` and return it with its new ID.
///
/// # Errors
///
/// Returns a:
/// - [Error::InvalidDateFormat] if the date cannot be written as RFC 3339,
/// - or [Error::SqlError] if there is some other SQL error, e.g. `user_id` is not a registered user.
pub fn create_transaction(
    user_id: UserID,
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let date = format_date(transaction.date)?;

    let id = connection
        .prepare(
            "INSERT INTO \"transaction\" (user_id, type, amount, category, description, date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id",
        )?
        .query_row(
            (
                user_id.as_i64(),
                transaction.type_,
                transaction.amount,
                &transaction.category,
                &transaction.description,
                date,
            ),
            |row| row.get(0),
        )?;

    Ok(Transaction {
        id,
        type_: transaction.type_,
        amount: transaction.amount,
        category: transaction.category,
        description: transaction.description,
        date: transaction.date,
    })
}

/// Get the transaction `id` if it belongs to `user_id`.
///
/// # Errors
///
/// Returns a:
/// - [Error::NotFound] if there is no such transaction for the user,
/// - [Error::Aggregation] if the stored date is not a valid timestamp,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(
    user_id: UserID,
    id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let row = connection
        .prepare(
            "SELECT id, type, amount, category, description, date FROM \"transaction\"
            WHERE id = :id AND user_id = :user_id",
        )?
        .query_row(
            &[(":id", &id), (":user_id", &user_id.as_i64())],
            map_transaction_row,
        )?;

    Ok(Transaction::try_from(row)?)
}

/// Get every transaction belonging to `user_id` in the order they were recorded.
///
/// # Errors
///
/// Returns a:
/// - [Error::Aggregation] if a stored date is not a valid timestamp,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_transactions(user_id: UserID, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, type, amount, category, description, date FROM \"transaction\"
            WHERE user_id = :user_id ORDER BY id ASC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_transaction_row)?
        .map(|row| -> Result<Transaction, Error> { Ok(Transaction::try_from(row?)?) })
        .collect()
}

/// Get the distinct, non-blank categories `user_id` has used, in the order they were first used.
///
/// # Errors
///
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_categories(user_id: UserID, connection: &Connection) -> Result<Vec<String>, Error> {
    connection
        .prepare(
            "SELECT category FROM \"transaction\"
            WHERE user_id = :user_id AND TRIM(category) != ''
            GROUP BY category ORDER BY MIN(id) ASC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], |row| row.get(0))?
        .map(|category| category.map_err(Error::from))
        .collect()
}

/// The number of rows changed by a query.
pub type RowsAffected = usize;

/// Delete the transaction `id` if it belongs to `user_id`.
///
/// Returns the number of rows deleted, which is zero if there was no such transaction.
///
/// # Errors
///
/// Returns [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(
    user_id: UserID,
    id: TransactionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = :id AND user_id = :user_id",
            &[(":id", &id), (":user_id", &user_id.as_i64())],
        )
        .map_err(Error::from)
}

pub(crate) fn format_date(date: OffsetDateTime) -> Result<String, Error> {
    date.format(&Rfc3339).map_err(|error| {
        tracing::error!("could not format {date} as RFC 3339: {error}");
        Error::InvalidDateFormat(date.to_string())
    })
}

/// A transaction as stored, before its date has been parsed.
pub(crate) struct TransactionRow {
    id: TransactionId,
    type_: TransactionType,
    amount: f64,
    category: String,
    description: String,
    date: String,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = AggregationError;

    fn try_from(row: TransactionRow) -> Result<Self, Self::Error> {
        let date = OffsetDateTime::parse(&row.date, &Rfc3339).map_err(|error| {
            tracing::warn!("transaction {} has an unreadable date: {error}", row.id);
            AggregationError::InvalidDate(row.date.clone())
        })?;

        Ok(Transaction {
            id: row.id,
            type_: row.type_,
            amount: row.amount,
            category: row.category,
            description: row.description,
            date,
        })
    }
}

/// Map a database row to a [TransactionRow].
///
/// Expects the columns id, type, amount, category, description and date in that order.
pub(crate) fn map_transaction_row(row: &Row) -> Result<TransactionRow, rusqlite::Error> {
    Ok(TransactionRow {
        id: row.get(0)?,
        type_: row.get(1)?,
        amount: row.get(2)?,
        category: row.get(3)?,
        description: row.get(4)?,
        date: row.get(5)?,
    })
}
