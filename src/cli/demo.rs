use chrono::{Datelike, Local, NaiveDate};
use rusqlite::Connection;

use crate::budgets::{create_budget, NewBudget};
use crate::categories::{create_category, NewCategory};
use crate::error::Result;
use crate::models::{Currency, TransactionType};
use crate::settings::{load_settings, save_settings};
use crate::transactions::{create_transaction, NewTransaction};
use crate::users::{add_user, find_by_email};

use super::open_db;

const DEMO_EMAIL: &str = "demo@fintrack.local";
const DEMO_MONTHS: u32 = 6;

struct DemoCategory {
    name: &'static str,
    kind: TransactionType,
    color: &'static str,
    icon: &'static str,
    /// Monthly base amount; zero means no recurring transaction.
    base: f64,
    day: u32,
    /// Monthly budget for expense categories; zero means none.
    budget: f64,
}

const CATEGORIES: &[DemoCategory] = &[
    DemoCategory { name: "Sueldo", kind: TransactionType::Income, color: "#22c55e", icon: "💼", base: 8500.0, day: 1, budget: 0.0 },
    DemoCategory { name: "Freelance", kind: TransactionType::Income, color: "#3b82f6", icon: "💰", base: 0.0, day: 20, budget: 0.0 },
    DemoCategory { name: "Alimentación", kind: TransactionType::Expense, color: "#ef4444", icon: "🛒", base: 850.0, day: 8, budget: 1200.0 },
    DemoCategory { name: "Transporte", kind: TransactionType::Expense, color: "#f97316", icon: "🚗", base: 320.0, day: 11, budget: 500.0 },
    DemoCategory { name: "Entretenimiento", kind: TransactionType::Expense, color: "#eab308", icon: "🎮", base: 180.0, day: 16, budget: 300.0 },
    DemoCategory { name: "Servicios", kind: TransactionType::Expense, color: "#22c55e", icon: "🏠", base: 450.0, day: 5, budget: 600.0 },
    DemoCategory { name: "Salud", kind: TransactionType::Expense, color: "#3b82f6", icon: "❤️", base: 75.0, day: 23, budget: 0.0 },
    DemoCategory { name: "Otros", kind: TransactionType::Expense, color: "#8b5cf6", icon: "⚪", base: 125.0, day: 27, budget: 0.0 },
];

/// Freelance income lands every other month.
const FREELANCE_AMOUNT: f64 = 1200.0;

fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next.and_then(|d| d.pred_opt()).map(|d| d.day()).unwrap_or(28);
    day.min(last)
}

/// Deterministic +/- 10% variation per month and category.
fn vary(base: f64, month_idx: usize, cat_idx: usize) -> f64 {
    let step = ((month_idx * 3 + cat_idx) % 5) as f64 - 2.0;
    ((base * (1.0 + step * 0.05)) * 100.0).round() / 100.0
}

pub(crate) fn insert_demo_data(conn: &Connection, today: NaiveDate) -> Result<(usize, usize)> {
    let user = add_user(conn, DEMO_EMAIL, "Demo", Some(Currency::Ars))?;

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for cat in CATEGORIES {
        let created = create_category(
            conn,
            user.id,
            &NewCategory {
                name: cat.name,
                category_type: cat.kind,
                color: cat.color,
                icon: Some(cat.icon),
            },
        )?;
        category_ids.push(created.id);
    }

    let mut txn_count = 0usize;
    for i in 0..DEMO_MONTHS {
        let target = today - chrono::Months::new(DEMO_MONTHS - 1 - i);
        let (year, month) = (target.year(), target.month());
        let idx = i as usize;

        for (cat_idx, cat) in CATEGORIES.iter().enumerate() {
            let amount = match (cat.name, cat.base) {
                ("Freelance", _) if idx % 2 == 1 => FREELANCE_AMOUNT,
                (_, base) if base > 0.0 && cat.kind == TransactionType::Income => base,
                (_, base) if base > 0.0 => vary(base, idx, cat_idx),
                _ => continue,
            };
            let date = format!("{year:04}-{month:02}-{:02}", clamp_day(year, month, cat.day));
            create_transaction(
                conn,
                user.id,
                &NewTransaction {
                    amount,
                    category_id: category_ids[cat_idx],
                    description: cat.name,
                    date: &date,
                    txn_type: cat.kind,
                    currency: Currency::Ars,
                },
            )?;
            txn_count += 1;
        }
    }

    let current_month = format!("{:04}-{:02}", today.year(), today.month());
    let mut budget_count = 0usize;
    for (cat_idx, cat) in CATEGORIES.iter().enumerate() {
        if cat.budget <= 0.0 {
            continue;
        }
        create_budget(
            conn,
            user.id,
            &NewBudget {
                category_id: category_ids[cat_idx],
                amount: cat.budget,
                month: &current_month,
                currency: Currency::Ars,
            },
        )?;
        budget_count += 1;
    }

    Ok((txn_count, budget_count))
}

pub fn run() -> Result<()> {
    let conn = open_db()?;

    if find_by_email(&conn, DEMO_EMAIL)?.is_some() {
        println!("Demo data already loaded (user '{DEMO_EMAIL}' exists).");
        return Ok(());
    }

    let (txn_count, budget_count) = insert_demo_data(&conn, Local::now().date_naive())?;

    let mut settings = load_settings();
    settings.active_user = Some(DEMO_EMAIL.to_string());
    save_settings(&settings)?;

    println!("Demo data loaded!");
    println!("  User:         {DEMO_EMAIL} (now active)");
    println!("  Categories:   {}", CATEGORIES.len());
    println!("  Transactions: {txn_count}");
    println!("  Budgets:      {budget_count}");
    println!();
    println!("Try these next:");
    println!("  fintrack report summary");
    println!("  fintrack report categories");
    println!("  fintrack report trend");
    println!("  fintrack report budgets");

    Ok(())
}
