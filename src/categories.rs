use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::error::{FinanceError, Result};
use crate::models::{Category, Page, Pagination, TransactionType};

const COLUMNS: &str = "id, name, category_type, color, icon, user_id";

fn color_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color regex"))
}

fn validate_color(color: &str) -> Result<()> {
    if color_re().is_match(color) {
        Ok(())
    } else {
        Err(FinanceError::Validation(format!("color '{color}' is not #RRGGBB")))
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(FinanceError::Validation("category name is required".to_string()));
    }
    if name.chars().count() > 100 {
        return Err(FinanceError::Validation("category name is longer than 100 characters".to_string()));
    }
    Ok(())
}

fn map_category(row: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        category_type: row.get(2)?,
        color: row.get(3)?,
        icon: row.get(4)?,
        user_id: row.get(5)?,
    })
}

pub struct NewCategory<'a> {
    pub name: &'a str,
    pub category_type: TransactionType,
    pub color: &'a str,
    pub icon: Option<&'a str>,
}

#[derive(Default)]
pub struct CategoryChanges<'a> {
    pub name: Option<&'a str>,
    pub category_type: Option<TransactionType>,
    pub color: Option<&'a str>,
    pub icon: Option<&'a str>,
}

pub fn create_category(conn: &Connection, user_id: i64, new: &NewCategory<'_>) -> Result<Category> {
    validate_name(new.name)?;
    validate_color(new.color)?;
    conn.execute(
        "INSERT INTO categories (name, category_type, color, icon, user_id) VALUES (?1, ?2, ?3, ?4, ?5)",
        rusqlite::params![new.name.trim(), new.category_type, new.color, new.icon, user_id],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(user_id, category_id = id, name = new.name, "created category");
    require_category(conn, user_id, id)
}

pub fn find_category(conn: &Connection, user_id: i64, id: i64) -> Result<Option<Category>> {
    let sql = format!("SELECT {COLUMNS} FROM categories WHERE id = ?1 AND user_id = ?2");
    Ok(conn.query_row(&sql, [id, user_id], map_category).optional()?)
}

pub fn require_category(conn: &Connection, user_id: i64, id: i64) -> Result<Category> {
    find_category(conn, user_id, id)?.ok_or(FinanceError::NotFound { entity: "Category", id })
}

pub fn update_category(conn: &Connection, user_id: i64, id: i64, changes: &CategoryChanges<'_>) -> Result<Category> {
    let mut category = require_category(conn, user_id, id)?;
    if let Some(name) = changes.name {
        validate_name(name)?;
        category.name = name.trim().to_string();
    }
    if let Some(color) = changes.color {
        validate_color(color)?;
        category.color = color.to_string();
    }
    if let Some(category_type) = changes.category_type {
        category.category_type = category_type;
    }
    if let Some(icon) = changes.icon {
        // an empty icon clears it
        category.icon = Some(icon.trim()).filter(|i| !i.is_empty()).map(str::to_string);
    }
    conn.execute(
        "UPDATE categories SET name = ?1, category_type = ?2, color = ?3, icon = ?4 WHERE id = ?5 AND user_id = ?6",
        rusqlite::params![category.name, category.category_type, category.color, category.icon, id, user_id],
    )?;
    tracing::info!(user_id, category_id = id, "updated category");
    Ok(category)
}

/// Delete a category. Transactions and budgets that reference it are kept and
/// show up as "Unknown" in reports.
pub fn delete_category(conn: &Connection, user_id: i64, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM categories WHERE id = ?1 AND user_id = ?2", [id, user_id])?;
    if changed == 0 {
        return Err(FinanceError::NotFound { entity: "Category", id });
    }
    tracing::info!(user_id, category_id = id, "deleted category");
    Ok(())
}

pub fn list_categories(conn: &Connection, user_id: i64, pagination: Pagination) -> Result<Page<Category>> {
    let total: i64 = conn.query_row("SELECT count(*) FROM categories WHERE user_id = ?1", [user_id], |r| r.get(0))?;
    let sql = format!("SELECT {COLUMNS} FROM categories WHERE user_id = ?1 ORDER BY name, id LIMIT ?2 OFFSET ?3");
    let mut stmt = conn.prepare(&sql)?;
    let data = stmt
        .query_map(
            rusqlite::params![user_id, pagination.limit, pagination.offset()],
            map_category,
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(pagination.wrap(data, total))
}

/// Display lookup by id set, limited to the user's own categories. Ids that
/// do not resolve are simply absent.
pub fn categories_by_ids(conn: &Connection, user_id: i64, ids: &[i64]) -> Result<HashMap<i64, Category>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let placeholders: Vec<String> = (2..=ids.len() + 1).map(|i| format!("?{i}")).collect();
    let sql = format!(
        "SELECT {COLUMNS} FROM categories WHERE user_id = ?1 AND id IN ({})",
        placeholders.join(", ")
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(
            rusqlite::params_from_iter(std::iter::once(&user_id).chain(ids.iter())),
            map_category,
        )?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows.into_iter().map(|c| (c.id, c)).collect())
}
