pub mod budgets;
pub mod categories;
pub mod demo;
pub mod init;
pub mod report;
pub mod status;
pub mod transactions;
pub mod users;

use clap::{Args, Parser, Subcommand};
use rusqlite::Connection;

use crate::db::open_in;
use crate::error::{FinanceError, Result};
use crate::models::{Pagination, User};
use crate::settings::{get_data_dir, load_settings};
use crate::users::require_by_email;

pub(crate) fn open_db() -> Result<Connection> {
    let dir = get_data_dir();
    std::fs::create_dir_all(&dir)?;
    open_in(&dir)
}

/// Resolve the user a command acts on: `--user` wins over the active user.
pub(crate) fn current_user(conn: &Connection, user: Option<&str>) -> Result<User> {
    let settings = load_settings();
    let email = user
        .map(str::to_string)
        .or(settings.active_user)
        .ok_or(FinanceError::NoActiveUser)?;
    require_by_email(conn, &email)
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Parser)]
#[command(name = "fintrack", about = "Personal finance tracker: transactions, budgets and monthly reports.")]
pub struct Cli {
    /// Act as this user (email) instead of the active one
    #[arg(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Clone, Copy)]
pub struct PageArgs {
    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,
    /// Rows per page (max 100)
    #[arg(long)]
    pub limit: Option<u32>,
}

impl PageArgs {
    pub fn pagination(&self) -> Result<Pagination> {
        Pagination::new(self.page, self.limit)
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and initialize the database.
    Init {
        /// Path for fintrack data (default: ~/Documents/fintrack)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Manage users and the active user.
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Record and browse transactions.
    Transactions {
        #[command(subcommand)]
        command: TransactionsCommands,
    },
    /// Manage monthly budgets.
    Budgets {
        #[command(subcommand)]
        command: BudgetsCommands,
    },
    /// Generate reports.
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Load a sample user with categories, transactions and budgets.
    Demo,
    /// Show the database location and row counts.
    Status,
}

#[derive(Subcommand)]
pub enum UsersCommands {
    /// Add a user.
    Add {
        email: String,
        #[arg(long)]
        name: String,
        /// Preferred reporting currency: ARS or USD
        #[arg(long)]
        currency: Option<String>,
    },
    /// List all users.
    List,
    /// Make a user the active one.
    Use { email: String },
    /// Set the active user's reporting currency (ARS, USD, or none).
    Currency { currency: String },
}

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// Add a category.
    Add {
        name: String,
        /// income or expense
        #[arg(long = "type")]
        category_type: String,
        /// Display color, #RRGGBB
        #[arg(long)]
        color: String,
        #[arg(long)]
        icon: Option<String>,
    },
    /// List categories.
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        json: bool,
    },
    /// Update a category.
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "type")]
        category_type: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        icon: Option<String>,
    },
    /// Delete a category.
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum TransactionsCommands {
    /// Record a transaction.
    Add {
        amount: f64,
        /// Category ID (shown in `fintrack categories list`)
        #[arg(long)]
        category: i64,
        /// income or expense
        #[arg(long = "type")]
        txn_type: String,
        /// ARS or USD
        #[arg(long)]
        currency: String,
        /// YYYY-MM-DD, YYYY-MM-DDTHH:MM[:SS] or RFC 3339
        #[arg(long)]
        date: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List transactions, newest first.
    List {
        /// Start date (inclusive)
        #[arg(long = "from")]
        date_from: Option<String>,
        /// End date (inclusive)
        #[arg(long = "to")]
        date_to: Option<String>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long = "type")]
        txn_type: Option<String>,
        #[arg(long = "min")]
        amount_min: Option<f64>,
        #[arg(long = "max")]
        amount_max: Option<f64>,
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        json: bool,
    },
    /// Update a transaction.
    Update {
        id: i64,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long = "type")]
        txn_type: Option<String>,
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a transaction.
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum BudgetsCommands {
    /// Set a spending limit for a category in a month.
    Add {
        /// Category ID
        category: i64,
        amount: f64,
        /// YYYY-MM
        #[arg(long)]
        month: String,
        /// ARS or USD
        #[arg(long)]
        currency: String,
    },
    /// List budgets, newest month first.
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        json: bool,
    },
    /// Update a budget.
    Update {
        id: i64,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long)]
        amount: Option<f64>,
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        currency: Option<String>,
    },
    /// Delete a budget.
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expenses, balance and savings rate for a month.
    Summary {
        /// YYYY-MM (default: current month)
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Totals and counts per category for a month.
    Categories {
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Month-by-month income, expenses and savings for a year.
    Trend {
        /// YYYY (default: current year)
        #[arg(long)]
        year: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Spending against each budget for a month.
    Budgets {
        #[arg(long)]
        month: Option<String>,
        #[arg(long)]
        json: bool,
    },
}
