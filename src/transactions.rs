use rusqlite::types::ToSql;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::categories::require_category;
use crate::error::{FinanceError, Result};
use crate::models::{Currency, Page, Pagination, Transaction, TransactionType};
use crate::period::{format_timestamp, parse_instant};

const COLUMNS: &str = "id, amount, category_id, description, date, txn_type, currency, user_id";

fn map_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        category_id: row.get(2)?,
        description: row.get(3)?,
        date: row.get(4)?,
        txn_type: row.get(5)?,
        currency: row.get(6)?,
        user_id: row.get(7)?,
    })
}

pub(crate) fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(FinanceError::Validation(format!("amount must be a non-negative number, got {amount}")));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<()> {
    if description.chars().count() > 255 {
        return Err(FinanceError::Validation("description is longer than 255 characters".to_string()));
    }
    Ok(())
}

pub struct NewTransaction<'a> {
    pub amount: f64,
    pub category_id: i64,
    pub description: &'a str,
    pub date: &'a str,
    pub txn_type: TransactionType,
    pub currency: Currency,
}

#[derive(Default)]
pub struct TransactionChanges<'a> {
    pub amount: Option<f64>,
    pub category_id: Option<i64>,
    pub description: Option<&'a str>,
    pub date: Option<&'a str>,
    pub txn_type: Option<TransactionType>,
    pub currency: Option<Currency>,
}

/// Row filter shared by listings and aggregate queries.
///
/// Date bounds are stored-format timestamps. `date_from` is always inclusive;
/// `date_to` is inclusive unless `date_to_exclusive` is set.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub user_id: i64,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub date_to_exclusive: bool,
    pub category_id: Option<i64>,
    pub txn_type: Option<TransactionType>,
    pub currency: Option<Currency>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
}

impl TransactionFilter {
    pub fn for_user(user_id: i64) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    /// Inclusive `[start, end]` window.
    pub fn between(mut self, start: String, end: String) -> Self {
        self.date_from = Some(start);
        self.date_to = Some(end);
        self.date_to_exclusive = false;
        self
    }

    /// Half-open `[start, end)` window.
    pub fn from_until(mut self, start: String, end: String) -> Self {
        self.date_from = Some(start);
        self.date_to = Some(end);
        self.date_to_exclusive = true;
        self
    }

    pub fn of_type(mut self, txn_type: TransactionType) -> Self {
        self.txn_type = Some(txn_type);
        self
    }

    pub fn in_currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn in_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    fn where_clause(&self) -> (String, Vec<Box<dyn ToSql>>) {
        let mut clauses = vec!["t.user_id = ?1".to_string()];
        let mut params: Vec<Box<dyn ToSql>> = vec![Box::new(self.user_id)];

        let mut push = |sql: &str, value: Box<dyn ToSql>| {
            params.push(value);
            clauses.push(sql.replace('?', &format!("?{}", params.len())));
        };

        if let Some(from) = &self.date_from {
            push("t.date >= ?", Box::new(from.clone()));
        }
        if let Some(to) = &self.date_to {
            if self.date_to_exclusive {
                push("t.date < ?", Box::new(to.clone()));
            } else {
                push("t.date <= ?", Box::new(to.clone()));
            }
        }
        if let Some(category_id) = self.category_id {
            push("t.category_id = ?", Box::new(category_id));
        }
        if let Some(txn_type) = self.txn_type {
            push("t.txn_type = ?", Box::new(txn_type));
        }
        if let Some(currency) = self.currency {
            push("t.currency = ?", Box::new(currency));
        }
        if let Some(min) = self.amount_min {
            push("t.amount >= ?", Box::new(min));
        }
        if let Some(max) = self.amount_max {
            push("t.amount <= ?", Box::new(max));
        }

        (clauses.join(" AND "), params)
    }
}

fn param_refs(params: &[Box<dyn ToSql>]) -> Vec<&dyn ToSql> {
    params.iter().map(|p| p.as_ref()).collect()
}

pub fn create_transaction(conn: &Connection, user_id: i64, new: &NewTransaction<'_>) -> Result<Transaction> {
    validate_amount(new.amount)?;
    validate_description(new.description)?;
    require_category(conn, user_id, new.category_id)?;
    let date = format_timestamp(&parse_instant(new.date)?);
    conn.execute(
        "INSERT INTO transactions (amount, category_id, description, date, txn_type, currency, user_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            new.amount,
            new.category_id,
            new.description,
            date,
            new.txn_type,
            new.currency,
            user_id
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::info!(user_id, transaction_id = id, amount = new.amount, "created transaction");
    require_transaction(conn, user_id, id)
}

pub fn find_transaction(conn: &Connection, user_id: i64, id: i64) -> Result<Option<Transaction>> {
    let sql = format!("SELECT {COLUMNS} FROM transactions WHERE id = ?1 AND user_id = ?2");
    Ok(conn.query_row(&sql, [id, user_id], map_transaction).optional()?)
}

pub fn require_transaction(conn: &Connection, user_id: i64, id: i64) -> Result<Transaction> {
    find_transaction(conn, user_id, id)?.ok_or(FinanceError::NotFound { entity: "Transaction", id })
}

pub fn update_transaction(
    conn: &Connection,
    user_id: i64,
    id: i64,
    changes: &TransactionChanges<'_>,
) -> Result<Transaction> {
    let mut txn = require_transaction(conn, user_id, id)?;
    if let Some(amount) = changes.amount {
        validate_amount(amount)?;
        txn.amount = amount;
    }
    if let Some(description) = changes.description {
        validate_description(description)?;
        txn.description = description.to_string();
    }
    if let Some(date) = changes.date {
        txn.date = format_timestamp(&parse_instant(date)?);
    }
    if let Some(category_id) = changes.category_id {
        require_category(conn, user_id, category_id)?;
        txn.category_id = category_id;
    }
    if let Some(txn_type) = changes.txn_type {
        txn.txn_type = txn_type;
    }
    if let Some(currency) = changes.currency {
        txn.currency = currency;
    }
    conn.execute(
        "UPDATE transactions SET amount = ?1, category_id = ?2, description = ?3, date = ?4, \
         txn_type = ?5, currency = ?6 WHERE id = ?7 AND user_id = ?8",
        rusqlite::params![
            txn.amount,
            txn.category_id,
            txn.description,
            txn.date,
            txn.txn_type,
            txn.currency,
            id,
            user_id
        ],
    )?;
    tracing::info!(user_id, transaction_id = id, "updated transaction");
    Ok(txn)
}

pub fn delete_transaction(conn: &Connection, user_id: i64, id: i64) -> Result<()> {
    let changed = conn.execute("DELETE FROM transactions WHERE id = ?1 AND user_id = ?2", [id, user_id])?;
    if changed == 0 {
        return Err(FinanceError::NotFound { entity: "Transaction", id });
    }
    tracing::info!(user_id, transaction_id = id, "deleted transaction");
    Ok(())
}

/// Filtered listing, newest first.
pub fn list_transactions(
    conn: &Connection,
    filter: &TransactionFilter,
    pagination: Pagination,
) -> Result<Page<Transaction>> {
    let (clause, mut params) = filter.where_clause();
    let total: i64 = conn.query_row(
        &format!("SELECT count(*) FROM transactions t WHERE {clause}"),
        param_refs(&params).as_slice(),
        |r| r.get(0),
    )?;

    params.push(Box::new(pagination.limit));
    params.push(Box::new(pagination.offset()));
    let (limit_idx, offset_idx) = (params.len() - 1, params.len());
    let sql = format!(
        "SELECT {COLUMNS} FROM transactions t WHERE {clause} \
         ORDER BY t.date DESC, t.id DESC LIMIT ?{limit_idx} OFFSET ?{offset_idx}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let data = stmt
        .query_map(param_refs(&params).as_slice(), map_transaction)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(pagination.wrap(data, total))
}

/// `SUM(amount)` over matching rows; 0 when nothing matches.
pub fn sum_amount(conn: &Connection, filter: &TransactionFilter) -> Result<f64> {
    let (clause, params) = filter.where_clause();
    let sql = format!("SELECT COALESCE(SUM(t.amount), 0.0) FROM transactions t WHERE {clause}");
    let total: f64 = conn.query_row(&sql, param_refs(&params).as_slice(), |r| r.get(0))?;
    Ok(total)
}

pub struct CategoryGroup {
    pub category_id: i64,
    pub txn_type: TransactionType,
    pub total: f64,
    pub count: i64,
}

/// Sum and count of matching rows grouped by (category, type), ordered by
/// category id then type.
pub fn group_by_category(conn: &Connection, filter: &TransactionFilter) -> Result<Vec<CategoryGroup>> {
    let (clause, params) = filter.where_clause();
    let sql = format!(
        "SELECT t.category_id, t.txn_type, SUM(t.amount) as total, COUNT(*) as count \
         FROM transactions t WHERE {clause} \
         GROUP BY t.category_id, t.txn_type ORDER BY t.category_id, t.txn_type"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(param_refs(&params).as_slice(), |row| {
            Ok(CategoryGroup {
                category_id: row.get(0)?,
                txn_type: row.get(1)?,
                total: row.get(2)?,
                count: row.get(3)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// (date, type, amount) of every matching row, oldest first.
pub fn amounts_by_date(conn: &Connection, filter: &TransactionFilter) -> Result<Vec<(String, TransactionType, f64)>> {
    let (clause, params) = filter.where_clause();
    let sql = format!(
        "SELECT t.date, t.txn_type, t.amount FROM transactions t WHERE {clause} ORDER BY t.date, t.id"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(param_refs(&params).as_slice(), |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{add_category, add_txn, add_user, test_db};

    fn lunch<'a>(category_id: i64) -> NewTransaction<'a> {
        NewTransaction {
            amount: 150.5,
            category_id,
            description: "Compra de supermercado",
            date: "2024-01-15T10:30:00",
            txn_type: TransactionType::Expense,
            currency: Currency::Ars,
        }
    }

    #[test]
    fn test_create_normalizes_date() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "a@example.com", None);
        let cat = add_category(&conn, user, "Alimentación", "expense");
        let txn = create_transaction(&conn, user, &lunch(cat)).unwrap();
        assert_eq!(txn.date, "2024-01-15T10:30:00.000");
        assert_eq!(txn.amount, 150.5);
        assert_eq!(txn.txn_type, TransactionType::Expense);
    }

    #[test]
    fn test_create_rejects_negative_amount_and_bad_date() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "a@example.com", None);
        let cat = add_category(&conn, user, "Alimentación", "expense");
        let negative = NewTransaction { amount: -1.0, ..lunch(cat) };
        assert!(matches!(create_transaction(&conn, user, &negative), Err(FinanceError::Validation(_))));
        let nan = NewTransaction { amount: f64::NAN, ..lunch(cat) };
        assert!(create_transaction(&conn, user, &nan).is_err());
        let bad_date = NewTransaction { date: "yesterday", ..lunch(cat) };
        assert!(create_transaction(&conn, user, &bad_date).is_err());
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "a@example.com", None);
        let cat = add_category(&conn, user, "Alimentación", "expense");
        let txn = create_transaction(&conn, user, &lunch(cat)).unwrap();
        let updated = update_transaction(
            &conn,
            user,
            txn.id,
            &TransactionChanges {
                amount: Some(99.0),
                currency: Some(Currency::Usd),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated.amount, 99.0);
        assert_eq!(updated.currency, Currency::Usd);
        assert_eq!(updated.date, txn.date);
        assert_eq!(updated.description, txn.description);
        assert_eq!(require_transaction(&conn, user, txn.id).unwrap(), updated);
    }

    #[test]
    fn test_category_must_belong_to_user() {
        let (_dir, conn) = test_db();
        let owner = add_user(&conn, "a@example.com", None);
        let user = add_user(&conn, "b@example.com", None);
        let private = add_category(&conn, owner, "Privada", "expense");
        let mine = add_category(&conn, user, "Alimentación", "expense");

        for category_id in [private, 999] {
            let err = create_transaction(&conn, user, &lunch(category_id)).unwrap_err();
            assert!(matches!(err, FinanceError::NotFound { entity: "Category", id } if id == category_id));
        }

        let txn = create_transaction(&conn, user, &lunch(mine)).unwrap();
        let move_away = TransactionChanges {
            category_id: Some(private),
            ..Default::default()
        };
        assert!(matches!(
            update_transaction(&conn, user, txn.id, &move_away),
            Err(FinanceError::NotFound { entity: "Category", .. })
        ));
        assert_eq!(require_transaction(&conn, user, txn.id).unwrap().category_id, mine);
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "a@example.com", None);
        let err = delete_transaction(&conn, user, 7).unwrap_err();
        assert_eq!(err.to_string(), "Transaction with ID 7 not found");
    }

    #[test]
    fn test_list_filters_and_orders_newest_first() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "a@example.com", None);
        let food = add_category(&conn, user, "Alimentación", "expense");
        let salary = add_category(&conn, user, "Sueldo", "income");
        add_txn(&conn, user, food, "2024-01-05T00:00:00.000", 100.0, "expense", "ARS");
        add_txn(&conn, user, food, "2024-01-20T00:00:00.000", 300.0, "expense", "ARS");
        add_txn(&conn, user, salary, "2024-01-01T00:00:00.000", 8500.0, "income", "ARS");
        add_txn(&conn, user, food, "2024-02-02T00:00:00.000", 50.0, "expense", "ARS");

        let all = list_transactions(&conn, &TransactionFilter::for_user(user), Pagination::default()).unwrap();
        assert_eq!(all.total, 4);
        assert_eq!(all.data[0].date, "2024-02-02T00:00:00.000");

        let filter = TransactionFilter {
            amount_min: Some(100.0),
            amount_max: Some(1000.0),
            ..TransactionFilter::for_user(user).of_type(TransactionType::Expense)
        };
        let page = list_transactions(&conn, &filter, Pagination::default()).unwrap();
        let amounts: Vec<f64> = page.data.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![300.0, 100.0]);

        let january = TransactionFilter::for_user(user)
            .between("2024-01-01T00:00:00.000".into(), "2024-01-31T23:59:59.999".into())
            .in_category(food);
        assert_eq!(list_transactions(&conn, &january, Pagination::default()).unwrap().total, 2);
    }

    #[test]
    fn test_list_paginates() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "a@example.com", None);
        let food = add_category(&conn, user, "Alimentación", "expense");
        for day in 1..=12 {
            add_txn(&conn, user, food, &format!("2024-03-{day:02}T00:00:00.000"), 1.0, "expense", "ARS");
        }
        let page = list_transactions(&conn, &TransactionFilter::for_user(user), Pagination { page: 2, limit: 5 }).unwrap();
        assert_eq!(page.total, 12);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.data.len(), 5);
        assert_eq!(page.data[0].date, "2024-03-07T00:00:00.000");
    }

    #[test]
    fn test_sum_amount_empty_is_zero() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "a@example.com", None);
        assert_eq!(sum_amount(&conn, &TransactionFilter::for_user(user)).unwrap(), 0.0);
    }

    #[test]
    fn test_half_open_window_excludes_end() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "a@example.com", None);
        let food = add_category(&conn, user, "Alimentación", "expense");
        add_txn(&conn, user, food, "2024-12-31T23:59:59.999", 10.0, "expense", "ARS");
        add_txn(&conn, user, food, "2025-01-01T00:00:00.000", 20.0, "expense", "ARS");
        let filter = TransactionFilter::for_user(user)
            .from_until("2024-01-01T00:00:00.000".into(), "2025-01-01T00:00:00.000".into());
        assert_eq!(sum_amount(&conn, &filter).unwrap(), 10.0);
    }

    #[test]
    fn test_group_by_category_splits_types() {
        let (_dir, conn) = test_db();
        let user = add_user(&conn, "a@example.com", None);
        let misc = add_category(&conn, user, "Otros", "expense");
        add_txn(&conn, user, misc, "2024-01-05T00:00:00.000", 10.0, "expense", "ARS");
        add_txn(&conn, user, misc, "2024-01-06T00:00:00.000", 15.0, "expense", "USD");
        add_txn(&conn, user, misc, "2024-01-07T00:00:00.000", 40.0, "income", "ARS");
        let groups = group_by_category(&conn, &TransactionFilter::for_user(user)).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].txn_type, TransactionType::Expense);
        assert_eq!(groups[0].total, 25.0);
        assert_eq!(groups[0].count, 2);
        assert_eq!(groups[1].txn_type, TransactionType::Income);
        assert_eq!(groups[1].count, 1);
    }
}
