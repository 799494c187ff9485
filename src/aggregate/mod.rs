use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::ops::Range;
use chrono::NaiveDate;
use crate::common::Result;
use crate::trip::TripRecord;
use crate::util::{day_of, month_of, year_of};

/// Period a report is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Daily(NaiveDate),
    Monthly { year: i32, month: u32 },
    Yearly(i32),
    Cumulative,
}

impl ReportMode {
    /// Rejects month numbers outside 1..=12
    pub fn monthly(year: i32, month: u32) -> Result<ReportMode> {
        month_of(year, month)?;
        Ok(ReportMode::Monthly { year, month })
    }

    /// Start date (inclusive) and end date (exclusive) of the period. None means no filter.
    fn date_range(&self) -> Result<Option<Range<NaiveDate>>> {
        Ok(match self {
            ReportMode::Daily(date) => Some(day_of(*date)?),
            ReportMode::Monthly { year, month } => Some(month_of(*year, *month)?),
            ReportMode::Yearly(year) => Some(year_of(*year)?),
            ReportMode::Cumulative => None,
        })
    }

    pub fn no_data_message(&self) -> &'static str {
        match self {
            ReportMode::Daily(_) => "No data for the selected date.",
            ReportMode::Monthly { .. } => "No data for the selected month.",
            ReportMode::Yearly(_) => "No data for the selected year.",
            ReportMode::Cumulative => "No data.",
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportMode::Daily(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            ReportMode::Monthly { year, month } => write!(f, "{:04}-{:02}", year, month),
            ReportMode::Yearly(year) => write!(f, "{}", year),
            ReportMode::Cumulative => write!(f, "all time"),
        }
    }
}

/// Trips of a period, highest fare first
#[derive(Debug, PartialEq)]
pub enum Report {
    NoData(ReportMode),
    Records(Vec<TripRecord>),
}

/// Totals are i128 so that any number of valid i64 fares can be summed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistrictTotal {
    pub district: String,
    pub amount: i128,
}

/// Fare totals per district of a period
#[derive(Debug, PartialEq)]
pub enum Summary {
    NoData(ReportMode),
    Districts(Vec<DistrictTotal>),
}

/// Records falling into the period of `mode`, in their original order.
pub fn filter(records: &[TripRecord], mode: &ReportMode) -> Result<Vec<TripRecord>> {
    let filtered = match mode.date_range()? {
        Some(range) => records.iter().filter(|r| range.contains(&r.date)).cloned().collect(),
        None => records.to_vec(),
    };
    Ok(filtered)
}

/// Sort by amount, highest first. Trips with equal amount keep their relative order.
pub fn sort_by_amount_desc(records: &mut [TripRecord]) {
    // sort_by is stable
    records.sort_by(|a, b| b.amount.cmp(&a.amount));
}

pub fn report(records: &[TripRecord], mode: ReportMode) -> Result<Report> {
    let mut filtered = filter(records, &mode)?;
    if filtered.is_empty() {
        return Ok(Report::NoData(mode));
    }

    sort_by_amount_desc(&mut filtered);
    Ok(Report::Records(filtered))
}

/// Sum amounts per district. Only districts present in `records` appear, largest total first,
/// ties in order of first appearance.
pub fn group_by_district(records: &[TripRecord]) -> Vec<DistrictTotal> {
    let mut totals: Vec<DistrictTotal> = vec![];
    let mut index: HashMap<&str, usize> = HashMap::new();

    for r in records {
        match index.get(r.district.as_str()) {
            Some(&i) => totals[i].amount += i128::from(r.amount),
            None => {
                index.insert(r.district.as_str(), totals.len());
                totals.push(DistrictTotal { district: r.district.clone(), amount: i128::from(r.amount) });
            }
        }
    }

    totals.sort_by(|a, b| b.amount.cmp(&a.amount));
    totals
}

pub fn summary(records: &[TripRecord], mode: ReportMode) -> Result<Summary> {
    let filtered = filter(records, &mode)?;
    if filtered.is_empty() {
        return Ok(Summary::NoData(mode));
    }
    Ok(Summary::Districts(group_by_district(&filtered)))
}

/// Distinct years having at least one trip, ascending.
pub fn available_years(records: &[TripRecord]) -> Vec<i32> {
    records.iter().map(|r| r.year()).collect::<BTreeSet<i32>>().into_iter().collect()
}

pub fn total(records: &[TripRecord]) -> i128 {
    records.iter().map(|r| i128::from(r.amount)).sum()
}
