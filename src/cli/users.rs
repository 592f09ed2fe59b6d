use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::models::Currency;
use crate::settings::{load_settings, save_settings};
use crate::users;

use super::{current_user, open_db};

fn parse_currency_opt(currency: Option<&str>) -> Result<Option<Currency>> {
    match currency {
        None => Ok(None),
        Some(c) if c.eq_ignore_ascii_case("none") => Ok(None),
        Some(c) => Ok(Some(c.parse()?)),
    }
}

pub fn add(email: &str, name: &str, currency: Option<&str>) -> Result<()> {
    let conn = open_db()?;
    let user = users::add_user(&conn, email, name, parse_currency_opt(currency)?)?;

    let mut settings = load_settings();
    if settings.active_user.is_none() {
        settings.active_user = Some(user.email.clone());
        save_settings(&settings)?;
        println!("Added user: {} (now active)", user.email);
    } else {
        println!("Added user: {}", user.email);
    }
    Ok(())
}

pub fn list() -> Result<()> {
    let conn = open_db()?;
    let active = load_settings().active_user;
    let mut table = Table::new();
    table.set_header(vec!["ID", "Email", "Name", "Currency", "Active"]);
    for user in users::list_users(&conn)? {
        let is_active = active.as_deref() == Some(user.email.as_str());
        table.add_row(vec![
            Cell::new(user.id),
            Cell::new(&user.email),
            Cell::new(&user.name),
            Cell::new(user.currency.map(|c| c.as_str()).unwrap_or("(default)")),
            Cell::new(if is_active { "*" } else { "" }),
        ]);
    }
    println!("Users\n{table}");
    Ok(())
}

pub fn use_user(email: &str) -> Result<()> {
    let conn = open_db()?;
    let user = users::require_by_email(&conn, email)?;
    let mut settings = load_settings();
    settings.active_user = Some(user.email.clone());
    save_settings(&settings)?;
    println!("Active user: {}", user.email);
    Ok(())
}

pub fn set_currency(user: Option<&str>, currency: &str) -> Result<()> {
    let conn = open_db()?;
    let user = current_user(&conn, user)?;
    let currency = parse_currency_opt(Some(currency))?;
    users::set_currency(&conn, user.id, currency)?;
    match currency {
        Some(c) => println!("Reporting currency for {}: {c}", user.email),
        None => println!("Cleared reporting currency for {}", user.email),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency_opt() {
        assert_eq!(parse_currency_opt(None).unwrap(), None);
        assert_eq!(parse_currency_opt(Some("none")).unwrap(), None);
        assert_eq!(parse_currency_opt(Some("usd")).unwrap(), Some(Currency::Usd));
        assert!(parse_currency_opt(Some("EUR")).is_err());
    }
}
