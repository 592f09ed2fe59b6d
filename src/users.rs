use rusqlite::{Connection, OptionalExtension, Row};

use crate::error::{FinanceError, Result};
use crate::models::{Currency, User};

fn map_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        currency: row.get(3)?,
    })
}

pub fn add_user(conn: &Connection, email: &str, name: &str, currency: Option<Currency>) -> Result<User> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(FinanceError::Validation(format!("invalid email '{email}'")));
    }
    if find_by_email(conn, email)?.is_some() {
        return Err(FinanceError::Validation(format!("user '{email}' already exists")));
    }
    conn.execute(
        "INSERT INTO users (email, name, currency) VALUES (?1, ?2, ?3)",
        rusqlite::params![email, name.trim(), currency],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(user_id = id, email, "created user");
    Ok(User {
        id,
        email: email.to_string(),
        name: name.trim().to_string(),
        currency,
    })
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare("SELECT id, email, name, currency FROM users ORDER BY email")?;
    let users = stmt
        .query_map([], map_user)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(users)
}

pub fn find_by_email(conn: &Connection, email: &str) -> Result<Option<User>> {
    let user = conn
        .query_row(
            "SELECT id, email, name, currency FROM users WHERE email = ?1",
            [email.trim()],
            map_user,
        )
        .optional()?;
    Ok(user)
}

pub fn require_by_email(conn: &Connection, email: &str) -> Result<User> {
    find_by_email(conn, email)?.ok_or_else(|| FinanceError::UnknownUser(email.to_string()))
}

/// The user's preferred reporting currency, if one has been set.
pub fn user_currency(conn: &Connection, user_id: i64) -> Result<Option<Currency>> {
    let currency: Option<Option<Currency>> = conn
        .query_row("SELECT currency FROM users WHERE id = ?1", [user_id], |r| r.get(0))
        .optional()?;
    Ok(currency.flatten())
}

pub fn set_currency(conn: &Connection, user_id: i64, currency: Option<Currency>) -> Result<()> {
    let changed = conn.execute(
        "UPDATE users SET currency = ?1 WHERE id = ?2",
        rusqlite::params![currency, user_id],
    )?;
    if changed == 0 {
        return Err(FinanceError::NotFound { entity: "User", id: user_id });
    }
    tracing::info!(user_id, currency = ?currency, "updated currency preference");
    Ok(())
}
