use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("A budget for category {category_id} in {month} already exists")]
    DuplicateBudget { category_id: i64, month: String },

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("No active user. Run `fintrack users use <email>` or pass --user")]
    NoActiveUser,

    #[error("Settings error: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, FinanceError>;
