use comfy_table::{Cell, Table};

use crate::budgets::{self, BudgetChanges, NewBudget};
use crate::error::Result;
use crate::fmt::money;
use crate::models::Currency;

use super::{current_user, open_db, print_json, PageArgs};

pub fn add(user: Option<&str>, category: i64, amount: f64, month: &str, currency: &str) -> Result<()> {
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let budget = budgets::create_budget(
        &conn,
        owner.id,
        &NewBudget {
            category_id: category,
            amount,
            month,
            currency: currency.parse()?,
        },
    )?;
    println!(
        "Added budget {}: category {} limited to {} in {}",
        budget.id,
        budget.category_id,
        money(budget.amount, budget.currency),
        budget.month
    );
    Ok(())
}

pub fn list(user: Option<&str>, page: PageArgs, json: bool) -> Result<()> {
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let result = budgets::list_budgets(&conn, owner.id, page.pagination()?)?;
    if json {
        return print_json(&result);
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Month", "Category", "Limit"]);
    for budget in &result.data {
        table.add_row(vec![
            Cell::new(budget.id),
            Cell::new(&budget.month),
            Cell::new(budget.category_id),
            Cell::new(money(budget.amount, budget.currency)),
        ]);
    }
    println!("Budgets\n{table}");
    println!("Page {} of {} ({} total)", result.page, result.total_pages.max(1), result.total);
    Ok(())
}

pub fn update(
    user: Option<&str>,
    id: i64,
    category: Option<i64>,
    amount: Option<f64>,
    month: Option<&str>,
    currency: Option<&str>,
) -> Result<()> {
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let changes = BudgetChanges {
        category_id: category,
        amount,
        month,
        currency: currency.map(str::parse::<Currency>).transpose()?,
    };
    let budget = budgets::update_budget(&conn, owner.id, id, &changes)?;
    println!("Updated budget {id}: {} in {}", money(budget.amount, budget.currency), budget.month);
    Ok(())
}

pub fn delete(user: Option<&str>, id: i64) -> Result<()> {
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    budgets::delete_budget(&conn, owner.id, id)?;
    println!("Deleted budget {id}");
    Ok(())
}
