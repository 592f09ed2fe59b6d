use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

use crate::error::{FinanceError, Result};

/// Storage format for instants. Fixed width, so text order is time order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

fn month_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})$").expect("valid month regex"))
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}$").expect("valid year regex"))
}

pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// A calendar month, parsed from `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn parse(s: &str) -> Result<Self> {
        let caps = month_re()
            .captures(s.trim())
            .ok_or_else(|| FinanceError::InvalidPeriod(format!("'{s}' is not YYYY-MM")))?;
        let year: i32 = caps[1]
            .parse()
            .map_err(|_| FinanceError::InvalidPeriod(format!("'{s}' has an invalid year")))?;
        let month: u32 = caps[2]
            .parse()
            .map_err(|_| FinanceError::InvalidPeriod(format!("'{s}' has an invalid month")))?;
        if !(1..=12).contains(&month) {
            return Err(FinanceError::InvalidPeriod(format!(
                "'{s}' has month {month:02}, expected 01-12"
            )));
        }
        Ok(Month { year, month })
    }

    pub fn current() -> Self {
        let today = Local::now().date_naive();
        Month {
            year: today.year(),
            month: today.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    fn last_day(&self) -> NaiveDate {
        let next = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        next.and_then(|d| d.pred_opt()).unwrap_or(NaiveDate::MAX)
    }

    /// First instant of the month.
    pub fn start(&self) -> NaiveDateTime {
        self.first_day().and_time(NaiveTime::MIN)
    }

    /// Last instant of the month: 23:59:59.999 on its last day.
    pub fn end(&self) -> NaiveDateTime {
        let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        self.last_day().and_time(end_of_day)
    }

    /// Inclusive `[start, end]` window in storage format.
    pub fn bounds(&self) -> (String, String) {
        (format_timestamp(&self.start()), format_timestamp(&self.end()))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A calendar year, parsed from `YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Year(i32);

impl Year {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if !year_re().is_match(s) {
            return Err(FinanceError::InvalidPeriod(format!("'{s}' is not YYYY")));
        }
        s.parse()
            .map(Year)
            .map_err(|_| FinanceError::InvalidPeriod(format!("'{s}' is not YYYY")))
    }

    pub fn current() -> Self {
        Year(Local::now().date_naive().year())
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Half-open `[Jan 1, next Jan 1)` window in storage format.
    pub fn bounds(&self) -> (String, String) {
        let start = NaiveDate::from_ymd_opt(self.0, 1, 1).unwrap_or(NaiveDate::MIN);
        let end = NaiveDate::from_ymd_opt(self.0 + 1, 1, 1).unwrap_or(NaiveDate::MAX);
        (
            format_timestamp(&start.and_time(NaiveTime::MIN)),
            format_timestamp(&end.and_time(NaiveTime::MIN)),
        )
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Parse a user-supplied transaction date into a local timestamp.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS[.fff]]` (also with a space
/// separator) and RFC 3339, which is converted to local time.
pub fn parse_instant(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(ts);
        }
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Local).naive_local());
    }
    Err(FinanceError::Validation(format!("invalid date '{s}'")))
}

/// Month key (`YYYY-MM`) of a stored timestamp.
pub fn month_key(stored: &str) -> Result<String> {
    let ts = NaiveDateTime::parse_from_str(stored, TIMESTAMP_FORMAT)
        .map_err(|_| FinanceError::Validation(format!("corrupt stored date '{stored}'")))?;
    Ok(format!("{:04}-{:02}", ts.year(), ts.month()))
}
