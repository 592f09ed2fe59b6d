use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::categories::{self, CategoryChanges, NewCategory};
use crate::error::Result;
use crate::models::TransactionType;

use super::{current_user, open_db, print_json, PageArgs};

pub fn add(user: Option<&str>, name: &str, category_type: &str, color: &str, icon: Option<&str>) -> Result<()> {
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let category = categories::create_category(
        &conn,
        owner.id,
        &NewCategory {
            name,
            category_type: category_type.parse()?,
            color,
            icon,
        },
    )?;
    println!("Added category {}: {}", category.id, category.name);
    Ok(())
}

pub fn list(user: Option<&str>, page: PageArgs, json: bool) -> Result<()> {
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let result = categories::list_categories(&conn, owner.id, page.pagination()?)?;
    if json {
        return print_json(&result);
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Type", "Color", "Icon"]);
    for cat in &result.data {
        let kind = match cat.category_type {
            TransactionType::Income => cat.category_type.as_str().green(),
            TransactionType::Expense => cat.category_type.as_str().red(),
        };
        table.add_row(vec![
            Cell::new(cat.id),
            Cell::new(&cat.name),
            Cell::new(kind),
            Cell::new(&cat.color),
            Cell::new(cat.icon.as_deref().unwrap_or("")),
        ]);
    }
    println!("Categories\n{table}");
    println!("Page {} of {} ({} total)", result.page, result.total_pages.max(1), result.total);
    Ok(())
}

pub fn update(
    user: Option<&str>,
    id: i64,
    name: Option<&str>,
    category_type: Option<&str>,
    color: Option<&str>,
    icon: Option<&str>,
) -> Result<()> {
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    let changes = CategoryChanges {
        name,
        category_type: category_type.map(str::parse::<TransactionType>).transpose()?,
        color,
        icon,
    };
    let category = categories::update_category(&conn, owner.id, id, &changes)?;
    println!("Updated category {id}: {}", category.name);
    Ok(())
}

pub fn delete(user: Option<&str>, id: i64) -> Result<()> {
    let conn = open_db()?;
    let owner = current_user(&conn, user)?;
    categories::delete_category(&conn, owner.id, id)?;
    println!("Deleted category {id}");
    Ok(())
}
