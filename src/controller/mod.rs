mod render;

use std::fmt;
use comfy_table::Table;
use log::info;
use crate::aggregate::{self, Report, Summary};
use crate::common::Result;
use crate::config::Config;
use crate::parser;
use crate::parser::{GroupBy, Statement};
use crate::store::RecordStore;
use crate::trip::TripRecord;

/// What a command produced, ready to be printed
pub enum Output {
    Added(TripRecord),
    Table(Table),
    /// Nothing matched, not an error
    NoData(String),
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Output::Added(t) => write!(
                f,
                "Recorded {} {} {} {} {}",
                t.date.format("%Y-%m-%d"),
                t.time,
                t.district,
                render::format_amount(i128::from(t.amount)),
                t.payment_method
            ),
            Output::Table(table) => write!(f, "{table}"),
            Output::NoData(msg) => write!(f, "{msg}"),
        }
    }
}

/// Parse and execute one command against the store.
pub fn run_command<S: RecordStore + ?Sized>(store: &S, config: &Config, input: &str) -> Result<Output> {
    let statement = parser::parse(input)?;

    match statement {
        Statement::Add(trip) => {
            trip.validate()?;
            config.check(&trip)?;
            store.append(&trip)?;
            Ok(Output::Added(trip))
        }
        Statement::Report(mode, GroupBy::None) => {
            let trips = store.load_all()?;
            info!("Reporting {} over {} trips", mode, trips.len());
            match aggregate::report(&trips, mode)? {
                Report::NoData(mode) => Ok(Output::NoData(mode.no_data_message().to_string())),
                Report::Records(trips) => Ok(Output::Table(render::trips_table(&trips))),
            }
        }
        Statement::Report(mode, GroupBy::District) => {
            let trips = store.load_all()?;
            match aggregate::summary(&trips, mode)? {
                Summary::NoData(mode) => Ok(Output::NoData(mode.no_data_message().to_string())),
                Summary::Districts(totals) => Ok(Output::Table(render::district_chart(&totals))),
            }
        }
        Statement::Years => {
            let years = aggregate::available_years(&store.load_all()?);
            if years.is_empty() {
                Ok(Output::NoData("No data.".to_string()))
            } else {
                Ok(Output::Table(render::list_table("Year", &years)))
            }
        }
        Statement::Districts => Ok(Output::Table(render::list_table("District", &config.districts))),
        Statement::Payments => Ok(Output::Table(render::list_table("Payment", &config.payment_methods))),
    }
}

#[cfg(test)]
mod tests {
    use crate::common::Error;
    use crate::config::Config;
    use crate::controller::{run_command, Output};
    use crate::store::{MemoryStore, RecordStore};

    fn run(store: &MemoryStore, input: &str) -> String {
        run_command(store, &Config::default(), input).unwrap().to_string()
    }

    fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        for cmd in [
            "ADD 2024-01-05 港区 10:15 1200 現金",
            "ADD 2024-01-05 新宿区 11:40 3400 電子マネー",
            "ADD 2024-01-05 港区 18:05 800 現金",
            "ADD 2024-02-01 渋谷区 22:30 5000 クレジットカード",
        ] {
            run_command(&store, &Config::default(), cmd).unwrap();
        }
        store
    }

    #[test]
    fn test_add() {
        let store = MemoryStore::new();
        let output = run(&store, "ADD 2024-01-05 港区 10:15 1200 現金;");
        assert_eq!(output, "Recorded 2024-01-05 10:15 港区 1,200 現金");
        assert_eq!(store.load_all().unwrap().len(), 1);

        let result = run_command(&store, &Config::default(), "ADD 2024-01-05 港区 25:99 1200 現金");
        assert!(matches!(result, Err(Error::Validation(_))));
        let result = run_command(&store, &Config::default(), "ADD 2024-01-05 港区 10:00 -1 現金");
        assert!(matches!(result, Err(Error::Validation(_))));
        let result = run_command(&store, &Config::default(), "ADD 2024-01-05 港区 10:00 100 小切手");
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(store.load_all().unwrap().len(), 1);
    }

    #[test]
    fn test_daily_listing() {
        let store = seeded();
        let output = run(&store, "DAILY 2024-01-05");
        let shinjuku = output.find("新宿区").unwrap();
        let minato = output.find("1,200").unwrap();
        let smallest = output.find("800").unwrap();
        assert!(shinjuku < minato && minato < smallest);
        assert!(output.contains("5,400"));
        assert!(!output.contains("渋谷区"));

        assert_eq!(run(&store, "daily 2024-01-06"), "No data for the selected date.");
    }

    #[test]
    fn test_monthly_and_summary() {
        let store = seeded();
        assert_eq!(run(&store, "MONTHLY 2024-03"), "No data for the selected month.");

        let output = run(&store, "MONTHLY 2024-01 BY DISTRICT");
        assert!(output.contains("3,400"));
        assert!(output.contains("2,000"));
        assert!(!output.contains("渋谷区"));

        let result = run_command(&store, &Config::default(), "MONTHLY 2024-13");
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_large_amounts() {
        let store = MemoryStore::new();
        run(&store, &format!("ADD 2024-01-05 港区 10:15 {} 現金", i64::MAX));
        run(&store, "ADD 2024-01-05 港区 11:00 1 現金");

        let output = run(&store, "DAILY 2024-01-05");
        assert!(output.contains("9,223,372,036,854,775,808"));

        let output = run(&store, "CUMULATIVE BY DISTRICT");
        assert!(output.contains("9,223,372,036,854,775,808"));
    }

    #[test]
    fn test_years_and_lists() {
        let store = MemoryStore::new();
        assert_eq!(run(&store, "YEARS"), "No data.");
        assert_eq!(run(&store, "CUMULATIVE"), "No data.");

        let store = seeded();
        assert!(run(&store, "years").contains("2024"));
        assert!(run(&store, "districts").contains("江戸川区"));
        assert!(run(&store, "payments").contains("QRコード決済"));
        assert!(matches!(run_command(&store, &Config::default(), "YEARLY 2024").unwrap(), Output::Table(_)));
    }
}
