use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::fmt::money;
use crate::models::{Currency, TransactionType};
use crate::period::{format_timestamp, parse_instant};
use crate::transactions::{self, NewTransaction, TransactionChanges, TransactionFilter};

use super::{current_user, open_db, print_json, PageArgs};

/// Date part of a stored timestamp; short values are shown as stored.
fn day_of(date: &str) -> &str {
    date.get(..10).unwrap_or(date)
}

pub struct AddArgs<'a> {
    pub amount: f64,
    pub category: i64,
    pub txn_type: &'a str,
    pub currency: &'a str,
    pub date: &'a str,
    pub description: &'a str,
}

pub fn add(user: Option<&str>, args: &AddArgs<'_>) -> Result<()> {
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let txn = transactions::create_transaction(
        &conn,
        owner.id,
        &NewTransaction {
            amount: args.amount,
            category_id: args.category,
            description: args.description,
            date: args.date,
            txn_type: args.txn_type.parse()?,
            currency: args.currency.parse()?,
        },
    )?;
    println!(
        "Added {} {} on {} (ID {})",
        txn.txn_type,
        money(txn.amount, txn.currency),
        day_of(&txn.date),
        txn.id
    );
    Ok(())
}

pub struct ListArgs {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub category: Option<i64>,
    pub txn_type: Option<String>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
    pub page: PageArgs,
    pub json: bool,
}

/// `--to` given as a bare date covers that whole day.
fn end_of_day(s: &str) -> Result<String> {
    let ts = parse_instant(s)?;
    if s.trim().len() == 10 {
        let end = ts.date().and_hms_milli_opt(23, 59, 59, 999).unwrap_or(ts);
        return Ok(format_timestamp(&end));
    }
    Ok(format_timestamp(&ts))
}

fn build_filter(user_id: i64, args: &ListArgs) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        date_from: args
            .date_from
            .as_deref()
            .map(|d| parse_instant(d).map(|ts| format_timestamp(&ts)))
            .transpose()?,
        date_to: args.date_to.as_deref().map(end_of_day).transpose()?,
        category_id: args.category,
        txn_type: args.txn_type.as_deref().map(str::parse::<TransactionType>).transpose()?,
        amount_min: args.amount_min,
        amount_max: args.amount_max,
        ..TransactionFilter::for_user(user_id)
    })
}

pub fn list(user: Option<&str>, args: &ListArgs) -> Result<()> {
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let filter = build_filter(owner.id, args)?;
    let result = transactions::list_transactions(&conn, &filter, args.page.pagination()?)?;
    if args.json {
        return print_json(&result);
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Type", "Amount", "Category", "Description"]);
    for txn in &result.data {
        let amount = match txn.txn_type {
            TransactionType::Income => money(txn.amount, txn.currency).green(),
            TransactionType::Expense => money(txn.amount, txn.currency).red(),
        };
        table.add_row(vec![
            Cell::new(txn.id),
            Cell::new(day_of(&txn.date)),
            Cell::new(txn.txn_type),
            Cell::new(amount),
            Cell::new(txn.category_id),
            Cell::new(&txn.description),
        ]);
    }
    println!("Transactions\n{table}");
    println!("Page {} of {} ({} total)", result.page, result.total_pages.max(1), result.total);
    Ok(())
}

pub struct UpdateArgs {
    pub amount: Option<f64>,
    pub category: Option<i64>,
    pub txn_type: Option<String>,
    pub currency: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

pub fn update(user: Option<&str>, id: i64, args: &UpdateArgs) -> Result<()> {
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let changes = TransactionChanges {
        amount: args.amount,
        category_id: args.category,
        description: args.description.as_deref(),
        date: args.date.as_deref(),
        txn_type: args.txn_type.as_deref().map(str::parse::<TransactionType>).transpose()?,
        currency: args.currency.as_deref().map(str::parse::<Currency>).transpose()?,
    };
    let txn = transactions::update_transaction(&conn, owner.id, id, &changes)?;
    println!("Updated transaction {id}: {} {}", txn.txn_type, money(txn.amount, txn.currency));
    Ok(())
}

pub fn delete(user: Option<&str>, id: i64) -> Result<()> {
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    transactions::delete_transaction(&conn, owner.id, id)?;
    println!("Deleted transaction {id}");
    Ok(())
}
