use rusqlite::{Connection, OptionalExtension, Row};

use crate::categories::require_category;
use crate::error::{FinanceError, Result};
use crate::models::{Budget, Currency, Page, Pagination};
use crate::period::Month;
use crate::transactions::validate_amount;

const COLUMNS: &str = "id, category_id, amount, month, currency, user_id";

fn map_budget(row: &Row<'_>) -> rusqlite::Result<Budget> {
    Ok(Budget {
        id: row.get(0)?,
        category_id: row.get(1)?,
        amount: row.get(2)?,
        month: row.get(3)?,
        currency: row.get(4)?,
        user_id: row.get(5)?,
    })
}

pub struct NewBudget<'a> {
    pub category_id: i64,
    pub amount: f64,
    pub month: &'a str,
    pub currency: Currency,
}

#[derive(Default)]
pub struct BudgetChanges<'a> {
    pub category_id: Option<i64>,
    pub amount: Option<f64>,
    pub month: Option<&'a str>,
    pub currency: Option<Currency>,
}

/// At most one budget per (user, category, month).
fn ensure_unique(conn: &Connection, user_id: i64, category_id: i64, month: &str, except: Option<i64>) -> Result<()> {
    let clash: Option<i64> = conn
        .query_row(
            "SELECT id FROM budgets WHERE user_id = ?1 AND category_id = ?2 AND month = ?3 AND id != ?4",
            rusqlite::params![user_id, category_id, month, except.unwrap_or(-1)],
            |r| r.get(0),
        )
        .optional()?;
    match clash {
        Some(_) => Err(FinanceError::DuplicateBudget {
            category_id,
            month: month.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn create_budget(conn: &Connection, user_id: i64, new: &NewBudget<'_>) -> Result<Budget> {
    validate_amount(new.amount)?;
    let month = Month::parse(new.month)?.to_string();
    require_category(conn, user_id, new.category_id)?;
    ensure_unique(conn, user_id, new.category_id, &month, None)?;
    conn.execute(
        "INSERT INTO budgets (category_id, amount, month, currency, user_id) VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![new.category_id, new.amount, month, new.currency, user_id],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(user_id, budget_id = id, month = %month, "created budget");
    require_budget(conn, user_id, id)
}

pub fn find_budget(conn: &Connection, user_id: i64, id: i64) -> Result<Option<Budget>> {
    let sql = format!("SELECT {COLUMNS} FROM budgets WHERE id = ?1 AND user_id = ?2");
    Ok(conn.query_row(&sql, [id, user_id], map_budget).optional()?)
}

pub fn require_budget(conn: &Connection, user_id: i64, id: i64) -> Result<Budget> {
    find_budget(conn, user_id, id)?.ok_or(FinanceError::NotFound { entity: "Budget", id })
}

pub fn update_budget(conn: &Connection, user_id: i64, id: i64, changes: &BudgetChanges<'_>) -> Result<Budget> {
    let mut budget = require_budget(conn, user_id, id)?;
    if let Some(amount) = changes.amount {
        validate_amount(amount)?;
        budget.amount = amount;
    }
    if let Some(month) = changes.month {
        budget.month = Month::parse(month)?.to_string();
    }
    if let Some(category_id) = changes.category_id {
        require_category(conn, user_id, category_id)?;
        budget.category_id = category_id;
    }
    if let Some(currency) = changes.currency {
        budget.currency = currency;
    }
    ensure_unique(conn, user_id, budget.category_id, &budget.month, Some(id))?;
    conn.execute(
        "UPDATE budgets SET category_id = ?1, amount = ?2, month = ?3, currency = ?4 WHERE id = ?5 AND user_id = ?6",
        rusqlite::params![budget.category_id, budget.amount, budget.month, budget.currency, id, user_id],
    )?;
    tracing::info!(user_id, budget_id = id, "updated budget");
    Ok(budget)
}

pub fn delete_budget(conn: &Connection, user_id: i64, id: i64) -> Result<()> {
    require_budget(conn, user_id, id)?;
    conn.execute("DELETE FROM budgets WHERE id = ?1 AND user_id = ?2", [id, user_id])?;
    tracing::info!(user_id, budget_id = id, "deleted budget");
    Ok(())
}

/// All budgets, newest month first.
pub fn list_budgets(conn: &Connection, user_id: i64, pagination: Pagination) -> Result<Page<Budget>> {
    let total: i64 = conn.query_row("SELECT count(*) FROM budgets WHERE user_id = ?1", [user_id], |r| r.get(0))?;
    let sql = format!(
        "SELECT {COLUMNS} FROM budgets WHERE user_id = ?1 ORDER BY month DESC, id LIMIT ?2 OFFSET ?3"
    );
    let mut stmt = conn.prepare(&sql)?;
    let data = stmt
        .query_map(
            rusqlite::params![user_id, pagination.limit, pagination.offset()],
            map_budget,
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(pagination.wrap(data, total))
}

pub fn budgets_for_month(conn: &Connection, user_id: i64, month: &Month) -> Result<Vec<Budget>> {
    let sql = format!("SELECT {COLUMNS} FROM budgets WHERE user_id = ?1 AND month = ?2 ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(rusqlite::params![user_id, month.to_string()], map_budget)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}
