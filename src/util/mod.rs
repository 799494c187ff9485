use std::ops::Range;
use chrono::NaiveDate;
use crate::common::{Error, Result};

pub(crate) fn day_of(date: NaiveDate) -> Result<Range<NaiveDate>> {
    let next_day = date.succ_opt()
        .ok_or_else(|| Error::Validation(format!("date {} is out of range", date)))?;
    Ok(date..next_day)
}

pub(crate) fn year_of(year: i32) -> Result<Range<NaiveDate>> {
    let first_day = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| Error::Validation(format!("year {} is out of range", year)))?;
    let first_day_next_year = NaiveDate::from_ymd_opt(year + 1, 1, 1)
        .ok_or_else(|| Error::Validation(format!("year {} is out of range", year)))?;
    Ok(first_day..first_day_next_year)
}

/// Date range of a calendar month, e.g. 2023-04 gives 2023-04-01..2023-05-01.
pub(crate) fn month_of(year: i32, month: u32) -> Result<Range<NaiveDate>> {
    if !(1..=12).contains(&month) {
        return Err(Error::Validation(format!("month must be between 1 and 12, got {}", month)));
    }

    let first_day = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::Validation(format!("year {} is out of range", year)))?;
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_month_year = if month == 12 { year + 1 } else { year };
    let first_day_next_month = NaiveDate::from_ymd_opt(next_month_year, next_month, 1)
        .ok_or_else(|| Error::Validation(format!("year {} is out of range", year)))?;

    Ok(first_day..first_day_next_month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_of() {
        let range = month_of(2023, 12).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let range = month_of(2024, 2).unwrap();
        assert!(range.contains(&NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!range.contains(&NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));

        assert!(month_of(2024, 13).is_err());
        assert!(month_of(2024, 0).is_err());
    }

    #[test]
    fn test_year_and_day_of() {
        let range = year_of(2024).unwrap();
        assert!(range.contains(&NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));
        assert!(!range.contains(&NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()));

        let day = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let range = day_of(day).unwrap();
        assert!(range.contains(&day));
        assert!(!range.contains(&day.succ_opt().unwrap()));
        assert!(day_of(NaiveDate::MAX).is_err());
    }
}
