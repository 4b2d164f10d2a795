use std::{error::Error, path::Path, process::exit, str::FromStr};

use clap::Parser;
use email_address::EmailAddress;
use rusqlite::Connection;
use time::{Duration, OffsetDateTime};

use financebot::{
    NewTransaction, PasswordHash, Transaction, TransactionType, UserDataUpdate, ValidatedPassword,
    budget::BudgetLimits, create_user, initialize_db, write_user_data,
};

/// A utility for creating a test database for FinanceBot.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// The e-mail address of the test user.
    #[arg(long, default_value = "test@example.com")]
    email: String,

    /// The password of the test user.
    #[arg(long, default_value = "test")]
    password: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test user {}...", args.email);

    let password_hash = PasswordHash::new(
        ValidatedPassword::new_unchecked(&args.password),
        PasswordHash::DEFAULT_COST,
    )?;
    let user = create_user(&EmailAddress::from_str(&args.email)?, password_hash, &conn)?;

    println!("Adding transactions and budget limits...");

    let update = UserDataUpdate {
        transactions: Some(sample_transactions(OffsetDateTime::now_utc())),
        limits: Some(BudgetLimits::new(50.0, 300.0, 1200.0, 14_000.0, 5000.0, 7)?),
    };
    let created = write_user_data(user.id, update, &conn)?;

    println!("Created {} transactions.", created.len());
    println!("Success!");

    Ok(())
}

/// About two months of income and everyday expenses leading up to `now`.
fn sample_transactions(now: OffsetDateTime) -> Vec<NewTransaction> {
    const EXPENSES: [(&str, &str, f64); 6] = [
        ("Food", "Groceries", 84.20),
        ("Transport", "Bus pass top up", 20.0),
        ("Food", "Lunch", 14.50),
        ("Entertainment", "Movie tickets", 32.0),
        ("Utilities", "Power bill", 142.87),
        ("", "Cash withdrawal", 40.0),
    ];

    let mut transactions = Vec::new();

    for week in 0..8 {
        let pay_day = now - Duration::weeks(week);
        transactions.push(
            Transaction::build(TransactionType::Income, 1250.0, pay_day)
                .category("Salary")
                .description("Weekly pay"),
        );

        for (day, (category, description, amount)) in EXPENSES.iter().enumerate() {
            let date = pay_day - Duration::days(day as i64);
            transactions.push(
                Transaction::build(TransactionType::Expense, *amount, date)
                    .category(category)
                    .description(description),
            );
        }
    }

    transactions
}
