use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use fs2::FileExt;
use log::{debug, info};
use crate::common::{Error, Result};
use crate::store::RecordStore;
use crate::trip::{COLUMNS, TripRecord};

/// Trip table kept in a flat CSV file.
///
/// Every operation holds an advisory lock on a sidecar `<file>.lock` for its whole duration:
/// exclusive for writes, shared for reads.
pub struct CsvStore {
    path: PathBuf,
    lock_path: PathBuf,
}

/// Released when dropped
struct FileLock {
    file: File,
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

impl CsvStore {
    pub fn new<P: AsRef<Path>>(path: P) -> CsvStore {
        let path = path.as_ref().to_path_buf();
        let mut lock_path: OsString = path.clone().into_os_string();
        lock_path.push(".lock");
        CsvStore { path, lock_path: PathBuf::from(lock_path) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self, exclusive: bool) -> Result<FileLock> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().read(true).write(true).create(true).truncate(false).open(&self.lock_path)?;
        if exclusive {
            file.lock_exclusive()?;
        } else {
            file.lock_shared()?;
        }
        debug!("Acquired {} lock on {}", if exclusive { "exclusive" } else { "shared" }, self.lock_path.display());
        Ok(FileLock { file })
    }

    /// True when the file is missing, blank, or holds no record and a header other than ours.
    fn needs_header(&self) -> Result<bool> {
        if !self.path.exists() {
            return Ok(true);
        }

        let mut rdr = ReaderBuilder::new().has_headers(true).from_path(&self.path)?;
        let headers = rdr.headers()?.clone();
        if rdr.records().next().is_some() {
            return Ok(false);
        }
        Ok(!headers.iter().eq(COLUMNS.iter().copied()))
    }

    /// Caller must hold the exclusive lock
    fn initialize_locked(&self) -> Result<()> {
        if !self.needs_header()? {
            return Ok(());
        }

        info!("Initializing trip table at {}", self.path.display());
        let mut wtr = WriterBuilder::new().from_path(&self.path)?;
        wtr.write_record(COLUMNS)?;
        wtr.flush()?;
        Ok(())
    }

    fn read_headers(&self) -> Result<StringRecord> {
        let mut rdr = ReaderBuilder::new().has_headers(true).trim(Trim::All).from_path(&self.path)?;
        Ok(rdr.headers()?.clone())
    }

    /// Make sure a row appended at the end of the file starts on its own line.
    fn ends_with_newline(file: &mut File) -> Result<bool> {
        let len = file.metadata()?.len();
        if len == 0 {
            return Ok(true);
        }
        let mut last = [0u8; 1];
        file.seek(SeekFrom::Start(len - 1))?;
        file.read_exact(&mut last)?;
        Ok(last[0] == b'\n')
    }
}

impl RecordStore for CsvStore {
    fn ensure_initialized(&self) -> Result<()> {
        let _lock = self.lock(true)?;
        self.initialize_locked()
    }

    fn append(&self, record: &TripRecord) -> Result<()> {
        record.validate()?;

        let _lock = self.lock(true)?;
        self.initialize_locked()?;

        // Follow the column order of the existing header, which may differ from ours
        let headers = self.read_headers()?;
        check_columns(&headers)?;
        if headers.len() != COLUMNS.len() {
            return Err(Error::Schema(format!(
                "expected columns {}, found {}",
                COLUMNS.join(","),
                headers.iter().collect::<Vec<&str>>().join(",")
            )));
        }
        let row: Vec<String> = headers.iter().map(|h| record.field(h).unwrap_or_default()).collect();

        let mut file = OpenOptions::new().read(true).append(true).open(&self.path)?;
        if !Self::ends_with_newline(&mut file)? {
            file.write_all(b"\n")?;
        }

        let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);
        wtr.write_record(&row)?;
        let file = wtr.into_inner().map_err(|e| Error::Storage(e.to_string()))?;
        file.sync_all()?;

        info!("Trip of {} in {} recorded on {}", record.amount, record.district, record.date);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<TripRecord>> {
        if !self.path.exists() {
            return Ok(vec![]);
        }

        let _lock = self.lock(false)?;
        // Values are trimmed on the way in too, see `TripRecord::validate`
        let mut rdr = ReaderBuilder::new().has_headers(true).trim(Trim::All).from_path(&self.path)?;
        let headers = rdr.headers()?.clone();
        if headers.is_empty() {
            return Ok(vec![]);
        }
        check_columns(&headers)?;

        let mut records: Vec<TripRecord> = vec![];
        for (i, row) in rdr.deserialize::<TripRecord>().enumerate() {
            // 1-based, after the header row
            let line = i + 2;
            let record = row.map_err(|e| Error::Storage(format!("line {}: {}", line, e)))?;
            record.validate().map_err(|e| Error::Storage(format!("line {}: {}", line, e)))?;
            records.push(record);
        }

        debug!("Loaded {} trips from {}", records.len(), self.path.display());
        Ok(records)
    }
}

fn check_columns(headers: &StringRecord) -> Result<()> {
    for column in COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::Schema(format!("unable to locate '{}' column", column)));
        }
    }
    Ok(())
}
