use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::{money, percent};
use crate::models::TransactionType;
use crate::period::{Month, Year};
use crate::reports::{self, Trend};

use super::{current_user, open_db, print_json};

fn month_or_current(month: Option<&str>) -> Result<Month> {
    month.map(Month::parse).unwrap_or_else(|| Ok(Month::current()))
}

fn year_or_current(year: Option<&str>) -> Result<Year> {
    year.map(Year::parse).unwrap_or_else(|| Ok(Year::current()))
}

pub fn summary(user: Option<&str>, month: Option<&str>, json: bool) -> Result<()> {
    let month = month_or_current(month)?;
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let data = reports::financial_summary(&conn, owner.id, &month)?;
    if json {
        return print_json(&data);
    }

    let c = data.currency;
    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![Cell::new("Income".green().bold()), Cell::new(money(data.total_income, c))]);
    table.add_row(vec![Cell::new("Expenses".red().bold()), Cell::new(money(data.total_expenses, c))]);
    let balance_label = if data.balance >= 0.0 {
        "Balance".green().bold()
    } else {
        "Balance".red().bold()
    };
    table.add_row(vec![Cell::new(balance_label), Cell::new(money(data.balance, c))]);
    table.add_row(vec![Cell::new("Savings rate"), Cell::new(percent(data.savings_rate))]);
    println!("Financial Summary {month}\n{table}");
    Ok(())
}

pub fn categories(user: Option<&str>, month: Option<&str>, json: bool) -> Result<()> {
    let month = month_or_current(month)?;
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let rows = reports::transactions_by_category(&conn, owner.id, &month)?;
    if json {
        return print_json(&rows);
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Type", "Total", "Count"]);
    for row in &rows {
        let kind = match row.txn_type {
            TransactionType::Income => row.txn_type.as_str().green(),
            TransactionType::Expense => row.txn_type.as_str().red(),
        };
        let name = match &row.category_icon {
            Some(icon) => format!("{icon} {}", row.category_name),
            None => row.category_name.clone(),
        };
        table.add_row(vec![
            Cell::new(name),
            Cell::new(kind),
            // rows mix currencies, so no currency label here
            Cell::new(format!("{:.2}", row.total_amount)),
            Cell::new(row.transaction_count),
        ]);
    }
    println!("By Category {month}\n{table}");
    Ok(())
}

pub fn trend(user: Option<&str>, year: Option<&str>, json: bool) -> Result<()> {
    let year = year_or_current(year)?;
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let months = reports::monthly_trend(&conn, owner.id, &year)?;
    if json {
        return print_json(&months);
    }

    let mut table = Table::new();
    table.set_header(vec!["Month", "Income", "Expenses", "Savings"]);
    for m in &months {
        let savings = if m.savings >= 0.0 {
            money(m.savings, m.currency).green()
        } else {
            money(m.savings, m.currency).red()
        };
        table.add_row(vec![
            Cell::new(&m.month),
            Cell::new(money(m.income, m.currency)),
            Cell::new(money(m.expenses, m.currency)),
            Cell::new(savings),
        ]);
    }
    println!("Monthly Trend {year}\n{table}");
    Ok(())
}

pub fn budgets(user: Option<&str>, month: Option<&str>, json: bool) -> Result<()> {
    let month = month_or_current(month)?;
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let progress = reports::budget_progress(&conn, owner.id, &month)?;
    if json {
        return print_json(&progress);
    }
    if progress.is_empty() {
        println!("No budgets for {month}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Category", "Limit", "Spent", "Used", "Trend"]);
    for p in &progress {
        let trend = match p.trend {
            Trend::Up => p.trend.as_str().red(),
            Trend::Stable => p.trend.as_str().yellow(),
            Trend::Down => p.trend.as_str().green(),
        };
        table.add_row(vec![
            Cell::new(&p.category_name),
            Cell::new(money(p.limit, p.currency)),
            Cell::new(money(p.spent, p.currency)),
            Cell::new(percent(p.percentage)),
            Cell::new(trend),
        ]);
    }
    println!("Budget Progress {month}\n{table}");
    Ok(())
}
