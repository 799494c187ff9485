mod csv_store;

use std::cell::RefCell;
use log::info;
use crate::common::Result;
use crate::trip::TripRecord;

pub use csv_store::CsvStore;

/// Storage of trip records. Append is the only mutation.
pub trait RecordStore {
    /// Create the table with a header row if it does not hold any record yet.
    /// Calling it again when data exists does nothing.
    fn ensure_initialized(&self) -> Result<()>;

    /// Validate and append one record. Nothing is written if validation fails.
    fn append(&self, record: &TripRecord) -> Result<()>;

    /// All records in insertion order. Empty if nothing was ever written.
    fn load_all(&self) -> Result<Vec<TripRecord>>;
}

/// Keeps trips in memory only
#[derive(Default)]
pub struct MemoryStore {
    records: RefCell<Vec<TripRecord>>,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl RecordStore for MemoryStore {
    fn ensure_initialized(&self) -> Result<()> {
        Ok(())
    }

    fn append(&self, record: &TripRecord) -> Result<()> {
        record.validate()?;
        self.records.borrow_mut().push(record.clone());
        info!("Trip of {} in {} recorded", record.amount, record.district);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<TripRecord>> {
        Ok(self.records.borrow().clone())
    }
}
