//! CSV-backed record store with whole-file atomic rewrites.

use crate::traits::RecordStore;
use parking_lot::Mutex;
use plastrack_common::{
    parse_amount, RecordSet, Result, TrackerError, UsageRecord, RECORD_HEADERS,
};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

/// One persisted row before amount coercion.
#[derive(Debug, Deserialize)]
struct StoredRow {
    #[serde(rename = "Community")]
    community: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Plastic_Used_kg")]
    plastic_used_kg: String,
}

impl TryFrom<StoredRow> for UsageRecord {
    type Error = TrackerError;

    fn try_from(row: StoredRow) -> Result<Self> {
        let plastic_used_kg = parse_amount(&row.plastic_used_kg)?;
        Ok(Self {
            community: row.community,
            date: row.date,
            plastic_used_kg,
        })
    }
}

/// Record store persisted as a single CSV file.
#[derive(Debug)]
pub struct CsvRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl CsvRecordStore {
    /// Creates a store handle for the given file. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> PathBuf {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
    }

    /// Writes the full record set to a temporary file next to the store.
    fn write_temp(&self, records: &[UsageRecord]) -> Result<NamedTempFile> {
        let directory = self.directory();
        fs::create_dir_all(&directory)?;
        let temp = NamedTempFile::new_in(&directory)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(temp.as_file());
            writer
                .write_record(RECORD_HEADERS)
                .map_err(|e| TrackerError::storage_with_source("failed to write header", e))?;
            for record in records {
                writer
                    .serialize(record)
                    .map_err(|e| TrackerError::storage_with_source("failed to write record", e))?;
            }
            writer.flush()?;
        }
        temp.as_file().sync_all()?;

        Ok(temp)
    }

    /// Replaces the store with the given records.
    fn rewrite(&self, records: &[UsageRecord]) -> Result<()> {
        let temp = self.write_temp(records)?;
        temp.persist(&self.path).map_err(|e| {
            TrackerError::storage_with_source(
                format!("failed to replace {}", self.path.display()),
                e.error,
            )
        })?;
        Ok(())
    }

    fn read_records(&self) -> Result<RecordSet> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&self.path)
            .map_err(|e| {
                TrackerError::storage_with_source(format!("failed to open {}", self.path.display()), e)
            })?;

        let headers = reader
            .headers()
            .map_err(|e| TrackerError::storage_with_source("failed to read header", e))?;
        if headers.iter().map(str::trim).ne(RECORD_HEADERS) {
            return Err(TrackerError::storage(format!(
                "unexpected header in {}: {:?}",
                self.path.display(),
                headers.iter().collect::<Vec<_>>()
            )));
        }

        reader
            .deserialize::<StoredRow>()
            .map(|row| {
                let row =
                    row.map_err(|e| TrackerError::storage_with_source("malformed record row", e))?;
                UsageRecord::try_from(row)
            })
            .collect()
    }
}

impl RecordStore for CsvRecordStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn initialize(&self) -> Result<()> {
        let _guard = self.write_lock.lock();

        if self.path.exists() {
            debug!("Record store already present");
            return Ok(());
        }

        let temp = self.write_temp(&[])?;
        match temp.persist_noclobber(&self.path) {
            Ok(_) => {
                info!("Created empty record store");
                Ok(())
            }
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                debug!("Record store created concurrently");
                Ok(())
            }
            Err(e) => Err(TrackerError::storage_with_source(
                format!("failed to create {}", self.path.display()),
                e.error,
            )),
        }
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<RecordSet> {
        if !self.exists() {
            return Err(TrackerError::store_unavailable(&self.path));
        }

        let records = self.read_records()?;
        debug!(count = records.len(), "Loaded usage records");
        Ok(records)
    }

    #[instrument(skip(self, record), fields(path = %self.path.display(), community = %record.community))]
    fn append(&self, record: UsageRecord) -> Result<()> {
        let _guard = self.write_lock.lock();

        let mut records = self.load()?;
        records.push(record);
        self.rewrite(&records)?;

        info!(count = records.len(), "Appended usage record");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plastrack_common::test_utils::{create_temp_dir, init_test_logging, record_fixtures};

    fn store_in(dir: &tempfile::TempDir) -> CsvRecordStore {
        CsvRecordStore::new(dir.path().join("plastic_usage.csv"))
    }

    #[test]
    fn test_initialize_writes_header_only() {
        init_test_logging();
        let dir = create_temp_dir();
        let store = store_in(&dir);

        assert!(!store.exists());
        store.initialize().unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, "Community,Date,Plastic_Used_kg\n");
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_initialize_creates_parent_directories() {
        let dir = create_temp_dir();
        let store = CsvRecordStore::new(dir.path().join("nested/data/usage.csv"));

        store.initialize().unwrap();
        assert!(store.exists());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let dir = create_temp_dir();
        let store = store_in(&dir);
        store.initialize().unwrap();
        store
            .append(UsageRecord::new("Riverside", "2024-01-15", 12.5))
            .unwrap();

        store.initialize().unwrap();

        let records = store.load().unwrap();
        assert_eq!(records, vec![UsageRecord::new("Riverside", "2024-01-15", 12.5)]);
    }

    #[test]
    fn test_load_missing_store() {
        let dir = create_temp_dir();
        let store = store_in(&dir);

        let err = store.load().unwrap_err();
        assert!(matches!(err, TrackerError::StoreUnavailable { ref path } if path == store.path()));
    }

    #[test]
    fn test_append_requires_store() {
        let dir = create_temp_dir();
        let store = store_in(&dir);

        let err = store
            .append(UsageRecord::new("Riverside", "2024-01-15", 12.5))
            .unwrap_err();
        assert!(matches!(err, TrackerError::StoreUnavailable { .. }));
        assert!(!store.exists());
    }

    #[test]
    fn test_append_preserves_order_and_writes_decimal_text() {
        let dir = create_temp_dir();
        let store = store_in(&dir);
        store.initialize().unwrap();

        for record in record_fixtures::riverside_lakeside() {
            store.append(record).unwrap();
        }

        assert_eq!(store.load().unwrap(), record_fixtures::riverside_lakeside());

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            content,
            "Community,Date,Plastic_Used_kg\n\
             Riverside,2024-01-15,12.5\n\
             Riverside,2024-02-03,7.0\n\
             Lakeside,2024-01-20,5.0\n"
        );
    }

    #[test]
    fn test_duplicates_and_unvalidated_dates_are_kept() {
        let dir = create_temp_dir();
        let store = store_in(&dir);
        store.initialize().unwrap();

        let duplicate = UsageRecord::new("Riverside", "2024-01-15", 1.0);
        store.append(duplicate.clone()).unwrap();
        store.append(duplicate.clone()).unwrap();
        store.append(record_fixtures::malformed_date_record()).unwrap();

        let records = store.load().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], duplicate);
        assert_eq!(records[1], duplicate);
        assert_eq!(records[2].date, "not-a-date");
    }

    #[test]
    fn test_community_names_with_separators_survive() {
        let dir = create_temp_dir();
        let store = store_in(&dir);
        store.initialize().unwrap();

        let record = UsageRecord::new("Harbor, \"East\" Side", "2024-05-01", 0.75);
        store.append(record.clone()).unwrap();

        assert_eq!(store.load().unwrap(), vec![record]);
    }

    #[test]
    fn test_load_rejects_unparsable_amount() {
        let dir = create_temp_dir();
        let store = store_in(&dir);
        fs::write(
            store.path(),
            "Community,Date,Plastic_Used_kg\nRiverside,2024-01-15,lots\n",
        )
        .unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, TrackerError::InvalidNumber { ref value } if value == "lots"));
    }

    #[test]
    fn test_load_rejects_foreign_header() {
        let dir = create_temp_dir();
        let store = store_in(&dir);
        fs::write(store.path(), "name,when,amount\nRiverside,2024-01-15,1\n").unwrap();

        assert!(matches!(store.load().unwrap_err(), TrackerError::Storage { .. }));
    }

    #[test]
    fn test_rewrite_leaves_no_temporary_files() {
        let dir = create_temp_dir();
        let store = store_in(&dir);
        store.initialize().unwrap();
        store
            .append(UsageRecord::new("Lakeside", "2024-01-20", 5.0))
            .unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_location_names_the_file() {
        let store = CsvRecordStore::new("plastic_usage.csv");
        assert_eq!(store.location(), "plastic_usage.csv");
    }
}
