use std::collections::BTreeMap;

use rusqlite::Connection;
use serde::Serialize;

use crate::budgets::budgets_for_month;
use crate::categories::categories_by_ids;
use crate::error::Result;
use crate::models::{Category, Currency, TransactionType, DEFAULT_CURRENCY};
use crate::period::{month_key, Month, Year};
use crate::transactions::{amounts_by_date, group_by_category, sum_amount, TransactionFilter};
use crate::users::user_currency;

/// Display name for a category id that no longer resolves.
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";
/// Neutral gray used for unresolved categories.
pub const UNKNOWN_CATEGORY_COLOR: &str = "#6b7280";
/// Budget use above this percentage trends `up`.
pub const TREND_UP_THRESHOLD: f64 = 80.0;
/// Budget use below this percentage trends `down`.
pub const TREND_DOWN_THRESHOLD: f64 = 50.0;

/// Round to two decimal places, halves toward positive infinity.
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

fn resolve_currency(conn: &Connection, user_id: i64) -> Result<Currency> {
    Ok(user_currency(conn, user_id)?.unwrap_or(DEFAULT_CURRENCY))
}

struct CategoryDisplay {
    name: String,
    color: String,
    icon: Option<String>,
}

impl CategoryDisplay {
    fn from_lookup(category: Option<&Category>) -> Self {
        match category {
            Some(c) => Self {
                name: c.name.clone(),
                color: c.color.clone(),
                icon: c.icon.clone(),
            },
            None => Self {
                name: UNKNOWN_CATEGORY_NAME.to_string(),
                color: UNKNOWN_CATEGORY_COLOR.to_string(),
                icon: None,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Financial summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub savings_rate: f64,
    pub currency: Currency,
}

/// Income, expenses, balance and savings rate for one month, in the user's
/// preferred currency. Rows in other currencies are ignored.
pub fn financial_summary(conn: &Connection, user_id: i64, month: &Month) -> Result<FinancialSummary> {
    tracing::debug!(user_id, month = %month, "financial summary");
    let currency = resolve_currency(conn, user_id)?;
    let (start, end) = month.bounds();
    let window = TransactionFilter::for_user(user_id)
        .between(start, end)
        .in_currency(currency);

    let total_income = sum_amount(conn, &window.clone().of_type(TransactionType::Income))?;
    let total_expenses = sum_amount(conn, &window.of_type(TransactionType::Expense))?;
    let balance = total_income - total_expenses;
    let savings_rate = if total_income > 0.0 {
        round2(balance / total_income * 100.0)
    } else {
        0.0
    };

    Ok(FinancialSummary {
        total_income,
        total_expenses,
        balance,
        savings_rate,
        currency,
    })
}

// ---------------------------------------------------------------------------
// Totals by category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub category_id: i64,
    pub category_name: String,
    pub category_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_icon: Option<String>,
    pub total_amount: f64,
    pub transaction_count: i64,
    #[serde(rename = "type")]
    pub txn_type: TransactionType,
}

/// One row per (category, type) with activity in the month, across all
/// currencies. Ordered by category id, then type.
pub fn transactions_by_category(conn: &Connection, user_id: i64, month: &Month) -> Result<Vec<CategorySummary>> {
    tracing::debug!(user_id, month = %month, "totals by category");
    let (start, end) = month.bounds();
    let groups = group_by_category(conn, &TransactionFilter::for_user(user_id).between(start, end))?;

    let mut ids: Vec<i64> = groups.iter().map(|g| g.category_id).collect();
    ids.dedup();
    let categories = categories_by_ids(conn, user_id, &ids)?;

    Ok(groups
        .into_iter()
        .map(|g| {
            let display = CategoryDisplay::from_lookup(categories.get(&g.category_id));
            CategorySummary {
                category_id: g.category_id,
                category_name: display.name,
                category_color: display.color,
                category_icon: display.icon,
                total_amount: g.total,
                transaction_count: g.count,
                txn_type: g.txn_type,
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Monthly trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub month: String,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
    pub currency: Currency,
}

/// Income and expenses per month of `year` in the user's currency. Months
/// without transactions are omitted; output is in calendar order.
pub fn monthly_trend(conn: &Connection, user_id: i64, year: &Year) -> Result<Vec<MonthlyTrend>> {
    tracing::debug!(user_id, year = %year, "monthly trend");
    let currency = resolve_currency(conn, user_id)?;
    let (start, end) = year.bounds();
    let rows = amounts_by_date(
        conn,
        &TransactionFilter::for_user(user_id)
            .from_until(start, end)
            .in_currency(currency),
    )?;

    let mut months: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for (date, txn_type, amount) in rows {
        let entry = months.entry(month_key(&date)?).or_insert((0.0, 0.0));
        match txn_type {
            TransactionType::Income => entry.0 += amount,
            TransactionType::Expense => entry.1 += amount,
        }
    }

    Ok(months
        .into_iter()
        .map(|(month, (income, expenses))| MonthlyTrend {
            month,
            income,
            expenses,
            savings: income - expenses,
            currency,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Budget progress
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Fixed thresholds: strictly above 80 is `up`, strictly below 50 is
    /// `down`, anything else `stable`.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > TREND_UP_THRESHOLD {
            Trend::Up
        } else if percentage < TREND_DOWN_THRESHOLD {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProgress {
    pub budget_id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub category_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_icon: Option<String>,
    pub limit: f64,
    pub spent: f64,
    pub percentage: f64,
    pub currency: Currency,
    pub trend: Trend,
}

/// Spending against every budget the user set for `month`. Spent is the sum
/// of the category's expenses in the budget's own currency.
pub fn budget_progress(conn: &Connection, user_id: i64, month: &Month) -> Result<Vec<BudgetProgress>> {
    tracing::debug!(user_id, month = %month, "budget progress");
    let budgets = budgets_for_month(conn, user_id, month)?;
    if budgets.is_empty() {
        return Ok(Vec::new());
    }

    let mut ids: Vec<i64> = budgets.iter().map(|b| b.category_id).collect();
    ids.sort_unstable();
    ids.dedup();
    let categories = categories_by_ids(conn, user_id, &ids)?;

    let (start, end) = month.bounds();
    let window = TransactionFilter::for_user(user_id)
        .between(start, end)
        .of_type(TransactionType::Expense);

    let mut progress = Vec::with_capacity(budgets.len());
    for budget in budgets {
        let spent = sum_amount(
            conn,
            &window
                .clone()
                .in_category(budget.category_id)
                .in_currency(budget.currency),
        )?;
        let percentage = if budget.amount > 0.0 {
            round2(spent / budget.amount * 100.0)
        } else {
            0.0
        };
        let display = CategoryDisplay::from_lookup(categories.get(&budget.category_id));
        progress.push(BudgetProgress {
            budget_id: budget.id,
            category_id: budget.category_id,
            category_name: display.name,
            category_color: display.color,
            category_icon: display.icon,
            limit: budget.amount,
            spent,
            percentage,
            currency: budget.currency,
            trend: Trend::from_percentage(percentage),
        });
    }
    Ok(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{add_budget, add_category, add_txn, add_user, test_db};

    fn month(s: &str) -> Month {
        Month::parse(s).unwrap()
    }

    fn seed_january(conn: &Connection, user: i64) -> (i64, i64) {
        let salary = add_category(conn, user, "Sueldo", "income");
        let food = add_category(conn, user, "Alimentación", "expense");
        add_txn(conn, user, salary, "2024-01-01T09:00:00.000", 8500.0, "income", "ARS");
        add_txn(conn, user, food, "2024-01-03T00:00:00.000", 4000.0, "expense", "ARS");
        add_txn(conn, user, food, "2024-01-31T23:59:59.999", 2200.0, "expense", "ARS");
        (salary, food)
    }

    #[test]
    fn test_round2_half_up() {
        assert_eq!(round2(27.0588), 27.06);
        assert_eq!(round2(70.8333), 70.83);
        assert_eq!(round2(33.3333), 33.33);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round2(-0.125), -0.12);
    }

    #[test]
    fn test_summary_negative_rate_rounds_half_up() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        let salary = add_category(&conn, user, "Sueldo", "income");
        let food = add_category(&conn, user, "Alimentación", "expense");
        add_txn(&conn, user, salary, "2024-01-01T09:00:00.000", 800.0, "income", "ARS");
        add_txn(&conn, user, food, "2024-01-05T00:00:00.000", 801.0, "expense", "ARS");
        let summary = financial_summary(&conn, user, &month("2024-01")).unwrap();
        assert_eq!(summary.balance, -1.0);
        assert_eq!(summary.savings_rate, -0.12);
    }

    #[test]
    fn test_summary_example() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        seed_january(&conn, user);
        let summary = financial_summary(&conn, user, &month("2024-01")).unwrap();
        assert_eq!(
            summary,
            FinancialSummary {
                total_income: 8500.0,
                total_expenses: 6200.0,
                balance: 2300.0,
                savings_rate: 27.06,
                currency: Currency::Ars,
            }
        );
    }

    #[test]
    fn test_summary_empty_month_is_all_zero() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        seed_january(&conn, user);
        let summary = financial_summary(&conn, user, &month("2024-03")).unwrap();
        assert_eq!(summary.total_income, 0.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.balance, 0.0);
        assert_eq!(summary.savings_rate, 0.0);
    }

    #[test]
    fn test_summary_uses_preferred_currency_only() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", Some("USD"));
        let (salary, food) = seed_january(&conn, user);
        add_txn(&conn, user, salary, "2024-01-10T00:00:00.000", 1000.0, "income", "USD");
        add_txn(&conn, user, food, "2024-01-11T00:00:00.000", 1200.0, "expense", "USD");
        let summary = financial_summary(&conn, user, &month("2024-01")).unwrap();
        assert_eq!(summary.currency, Currency::Usd);
        assert_eq!(summary.total_income, 1000.0);
        assert_eq!(summary.total_expenses, 1200.0);
        assert_eq!(summary.balance, -200.0);
        assert_eq!(summary.savings_rate, -20.0);
    }

    #[test]
    fn test_summary_excludes_other_users_and_neighbouring_months() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        let other = add_user(&conn, "o@example.com", None);
        let (salary, _) = seed_january(&conn, user);
        add_txn(&conn, other, salary, "2024-01-15T00:00:00.000", 999.0, "income", "ARS");
        add_txn(&conn, user, salary, "2023-12-31T23:59:59.999", 1.0, "income", "ARS");
        add_txn(&conn, user, salary, "2024-02-01T00:00:00.000", 1.0, "income", "ARS");
        let summary = financial_summary(&conn, user, &month("2024-01")).unwrap();
        assert_eq!(summary.total_income, 8500.0);
    }

    #[test]
    fn test_summary_expenses_without_income_has_zero_rate() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        let food = add_category(&conn, user, "Alimentación", "expense");
        add_txn(&conn, user, food, "2024-01-03T00:00:00.000", 300.0, "expense", "ARS");
        let summary = financial_summary(&conn, user, &month("2024-01")).unwrap();
        assert_eq!(summary.balance, -300.0);
        assert_eq!(summary.savings_rate, 0.0);
    }

    #[test]
    fn test_by_category_example() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        let food = add_category(&conn, user, "Alimentación", "expense");
        for (day, amount) in [(2, 100.0), (5, 250.0), (9, 300.0), (14, 120.0), (28, 80.0)] {
            add_txn(&conn, user, food, &format!("2024-01-{day:02}T12:00:00.000"), amount, "expense", "ARS");
        }
        let rows = transactions_by_category(&conn, user, &month("2024-01")).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category_id, food);
        assert_eq!(rows[0].category_name, "Alimentación");
        assert_eq!(rows[0].total_amount, 850.0);
        assert_eq!(rows[0].transaction_count, 5);
        assert_eq!(rows[0].txn_type, TransactionType::Expense);
    }

    #[test]
    fn test_by_category_totals_match_window_and_ignore_currency() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        let (salary, food) = seed_january(&conn, user);
        add_txn(&conn, user, food, "2024-01-12T00:00:00.000", 40.0, "expense", "USD");
        add_txn(&conn, user, salary, "2024-01-20T00:00:00.000", 500.0, "expense", "ARS");
        add_txn(&conn, user, food, "2024-02-01T00:00:00.000", 1.0, "expense", "ARS");

        let rows = transactions_by_category(&conn, user, &month("2024-01")).unwrap();
        let expense_total: f64 = rows
            .iter()
            .filter(|r| r.txn_type == TransactionType::Expense)
            .map(|r| r.total_amount)
            .sum();
        let income_total: f64 = rows
            .iter()
            .filter(|r| r.txn_type == TransactionType::Income)
            .map(|r| r.total_amount)
            .sum();
        assert_eq!(expense_total, 4000.0 + 2200.0 + 40.0 + 500.0);
        assert_eq!(income_total, 8500.0);
        // salary category has both an income and an expense group
        assert_eq!(rows.iter().filter(|r| r.category_id == salary).count(), 2);
    }

    #[test]
    fn test_by_category_unknown_fallback() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        add_txn(&conn, user, 404, "2024-01-10T00:00:00.000", 75.0, "expense", "ARS");
        let rows = transactions_by_category(&conn, user, &month("2024-01")).unwrap();
        assert_eq!(rows[0].category_name, UNKNOWN_CATEGORY_NAME);
        assert_eq!(rows[0].category_color, UNKNOWN_CATEGORY_COLOR);
        assert!(rows[0].category_icon.is_none());
    }

    #[test]
    fn test_by_category_never_shows_another_users_category() {
        let (_dir, conn) = test_db();
        let owner = add_user(&conn, "a@example.com", None);
        let user = add_user(&conn, "u@example.com", None);
        let private = add_category(&conn, owner, "A-private", "expense");
        add_txn(&conn, user, private, "2024-01-10T00:00:00.000", 75.0, "expense", "ARS");
        let rows = transactions_by_category(&conn, user, &month("2024-01")).unwrap();
        assert_eq!(rows[0].category_name, UNKNOWN_CATEGORY_NAME);
        assert_eq!(rows[0].category_color, UNKNOWN_CATEGORY_COLOR);
    }

    #[test]
    fn test_trend_only_months_with_activity() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        let salary = add_category(&conn, user, "Sueldo", "income");
        let food = add_category(&conn, user, "Alimentación", "expense");
        add_txn(&conn, user, food, "2024-07-04T00:00:00.000", 300.0, "expense", "ARS");
        add_txn(&conn, user, salary, "2024-03-01T00:00:00.000", 1000.0, "income", "ARS");
        add_txn(&conn, user, food, "2024-03-15T00:00:00.000", 400.0, "expense", "ARS");
        add_txn(&conn, user, salary, "2023-12-31T23:59:59.999", 5.0, "income", "ARS");
        add_txn(&conn, user, salary, "2025-01-01T00:00:00.000", 5.0, "income", "ARS");
        add_txn(&conn, user, salary, "2024-05-01T00:00:00.000", 5.0, "income", "USD");

        let trend = monthly_trend(&conn, user, &Year::parse("2024").unwrap()).unwrap();
        assert_eq!(
            trend,
            vec![
                MonthlyTrend {
                    month: "2024-03".to_string(),
                    income: 1000.0,
                    expenses: 400.0,
                    savings: 600.0,
                    currency: Currency::Ars,
                },
                MonthlyTrend {
                    month: "2024-07".to_string(),
                    income: 0.0,
                    expenses: 300.0,
                    savings: -300.0,
                    currency: Currency::Ars,
                },
            ]
        );
    }

    #[test]
    fn test_trend_months_strictly_increasing_and_in_year() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        let food = add_category(&conn, user, "Alimentación", "expense");
        for m in [12, 1, 6, 10, 2, 11] {
            add_txn(&conn, user, food, &format!("2024-{m:02}-10T00:00:00.000"), 10.0, "expense", "ARS");
        }
        let trend = monthly_trend(&conn, user, &Year::parse("2024").unwrap()).unwrap();
        assert_eq!(trend.len(), 6);
        assert!(trend.windows(2).all(|w| w[0].month < w[1].month));
        assert!(trend.iter().all(|t| t.month.as_str() >= "2024-01" && t.month.as_str() <= "2024-12"));
    }

    #[test]
    fn test_trend_thresholds() {
        assert_eq!(Trend::from_percentage(70.83), Trend::Stable);
        assert_eq!(Trend::from_percentage(90.0), Trend::Up);
        assert_eq!(Trend::from_percentage(33.33), Trend::Down);
        assert_eq!(Trend::from_percentage(80.0), Trend::Stable);
        assert_eq!(Trend::from_percentage(50.0), Trend::Stable);
        assert_eq!(Trend::from_percentage(0.0), Trend::Down);
    }

    #[test]
    fn test_budget_progress_examples() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        let food = add_category(&conn, user, "Alimentación", "expense");
        let transport = add_category(&conn, user, "Transporte", "expense");
        let fun = add_category(&conn, user, "Entretenimiento", "expense");
        add_budget(&conn, user, food, "2024-01", 1200.0, "ARS");
        add_budget(&conn, user, transport, "2024-01", 500.0, "ARS");
        add_budget(&conn, user, fun, "2024-01", 300.0, "ARS");
        add_txn(&conn, user, food, "2024-01-05T00:00:00.000", 850.0, "expense", "ARS");
        add_txn(&conn, user, transport, "2024-01-06T00:00:00.000", 450.0, "expense", "ARS");
        add_txn(&conn, user, fun, "2024-01-07T00:00:00.000", 100.0, "expense", "ARS");
        // ignored: other currency, income type, other month
        add_txn(&conn, user, food, "2024-01-08T00:00:00.000", 999.0, "expense", "USD");
        add_txn(&conn, user, food, "2024-01-08T00:00:00.000", 999.0, "income", "ARS");
        add_txn(&conn, user, food, "2024-02-01T00:00:00.000", 999.0, "expense", "ARS");

        let progress = budget_progress(&conn, user, &month("2024-01")).unwrap();
        assert_eq!(progress.len(), 3);
        let summary: Vec<(f64, f64, Trend)> = progress.iter().map(|p| (p.spent, p.percentage, p.trend)).collect();
        assert_eq!(
            summary,
            vec![(850.0, 70.83, Trend::Stable), (450.0, 90.0, Trend::Up), (100.0, 33.33, Trend::Down)]
        );
        assert_eq!(progress[0].category_name, "Alimentación");
        assert_eq!(progress[0].limit, 1200.0);
    }

    #[test]
    fn test_budget_progress_zero_limit() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        let food = add_category(&conn, user, "Alimentación", "expense");
        add_budget(&conn, user, food, "2024-01", 0.0, "ARS");
        add_txn(&conn, user, food, "2024-01-05T00:00:00.000", 50.0, "expense", "ARS");
        let progress = budget_progress(&conn, user, &month("2024-01")).unwrap();
        assert_eq!(progress[0].spent, 50.0);
        assert_eq!(progress[0].percentage, 0.0);
        assert_eq!(progress[0].trend, Trend::Down);
    }

    #[test]
    fn test_budget_progress_uses_budget_currency() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        let food = add_category(&conn, user, "Alimentación", "expense");
        add_budget(&conn, user, food, "2024-01", 100.0, "USD");
        add_txn(&conn, user, food, "2024-01-05T00:00:00.000", 60.0, "expense", "USD");
        add_txn(&conn, user, food, "2024-01-05T00:00:00.000", 5000.0, "expense", "ARS");
        let progress = budget_progress(&conn, user, &month("2024-01")).unwrap();
        assert_eq!(progress[0].currency, Currency::Usd);
        assert_eq!(progress[0].spent, 60.0);
        assert_eq!(progress[0].percentage, 60.0);
    }

    #[test]
    fn test_budget_progress_no_budgets_is_empty() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        assert!(budget_progress(&conn, user, &month("2024-01")).unwrap().is_empty());
    }

    #[test]
    fn test_budget_progress_unknown_category() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        add_budget(&conn, user, 404, "2024-01", 100.0, "ARS");
        let progress = budget_progress(&conn, user, &month("2024-01")).unwrap();
        assert_eq!(progress[0].category_name, UNKNOWN_CATEGORY_NAME);
        assert_eq!(progress[0].category_color, UNKNOWN_CATEGORY_COLOR);
    }

    #[test]
    fn test_reports_are_idempotent() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "u@example.com", None);
        let (_, food) = seed_january(&conn, user);
        add_budget(&conn, user, food, "2024-01", 7000.0, "ARS");
        let m = month("2024-01");
        assert_eq!(financial_summary(&conn, user, &m).unwrap(), financial_summary(&conn, user, &m).unwrap());
        assert_eq!(
            transactions_by_category(&conn, user, &m).unwrap(),
            transactions_by_category(&conn, user, &m).unwrap()
        );
        assert_eq!(budget_progress(&conn, user, &m).unwrap(), budget_progress(&conn, user, &m).unwrap());
        let y = Year::parse("2024").unwrap();
        assert_eq!(monthly_trend(&conn, user, &y).unwrap(), monthly_trend(&conn, user, &y).unwrap());
    }

    #[test]
    fn test_serialized_field_names() {
        let summary = FinancialSummary {
            total_income: 1.0,
            total_expenses: 0.0,
            balance: 1.0,
            savings_rate: 100.0,
            currency: Currency::Ars,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalIncome"], 1.0);
        assert_eq!(json["savingsRate"], 100.0);
        assert_eq!(json["currency"], "ARS");
        assert_eq!(serde_json::to_value(Trend::Stable).unwrap(), "stable");
    }
}
