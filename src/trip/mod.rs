use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use crate::common::{Error, Result};

/// Column names of the trip table, in the order they are written to disk.
pub(crate) const COLUMNS: [&str; 5] = ["date", "district", "time", "amount", "payment_method"];

lazy_static! {
    static ref HH_MM: Regex = Regex::new(r"^\d{2}:\d{2}$").unwrap();
}

/// One logged taxi trip
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TripRecord {
    pub date: NaiveDate,
    pub district: String,
    /// Time of day the trip was entered, HH:MM
    pub time: String,
    /// Fare, never negative
    pub amount: i64,
    pub payment_method: String,
}

impl TripRecord {
    pub fn new(date: NaiveDate, district: &str, time: &str, amount: i64, payment_method: &str) -> TripRecord {
        TripRecord {
            date,
            district: district.trim().to_string(),
            time: time.trim().to_string(),
            amount,
            payment_method: payment_method.trim().to_string(),
        }
    }

    /// Checks the constraints every persisted record must satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.amount < 0 {
            return Err(Error::Validation(format!("amount must not be negative, got {}", self.amount)));
        }
        parse_time(&self.time)?;
        check_text("district", &self.district)?;
        check_text("payment method", &self.payment_method)
    }

    /// Value of a column as written to disk, None for an unknown column name.
    pub(crate) fn field(&self, column: &str) -> Option<String> {
        match column {
            "date" => Some(self.date.format("%Y-%m-%d").to_string()),
            "district" => Some(self.district.clone()),
            "time" => Some(self.time.clone()),
            "amount" => Some(self.amount.to_string()),
            "payment_method" => Some(self.payment_method.clone()),
            _ => None,
        }
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Hour of entry. None only for records that never went through `validate`.
    pub fn hour(&self) -> Option<u32> {
        parse_time(&self.time).ok().map(|t| t.hour())
    }
}

/// Required, and without surrounding whitespace since the table is read back trimmed.
fn check_text(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} is required", name)));
    }
    if value.trim() != value {
        return Err(Error::Validation(format!("{} '{}' has surrounding whitespace", name, value)));
    }
    Ok(())
}

/// Parse a strict HH:MM time of day, e.g. `09:05`. `9:05` and `25:99` are rejected.
pub(crate) fn parse_time(s: &str) -> Result<NaiveTime> {
    if !HH_MM.is_match(s) {
        return Err(Error::Validation(format!("time must be HH:MM, got '{}'", s)));
    }
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| Error::Validation(format!("'{}' is not a valid time of day", s)))
}
