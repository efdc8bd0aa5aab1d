use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Column names of the promise table, in file order. The translator hands
/// this list to the model and the filter engine uses it to drop unknown keys.
pub const FIELDS: &[&str] = &[
    "city",
    "category",
    "promise_description",
    "due_date",
    "status",
    "latitude",
    "longitude",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromiseRecord {
    pub city: String,
    pub category: String,
    pub promise_description: String,
    pub due_date: NaiveDate,
    pub status: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PromiseRecord {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Status counts shown on the KPI cards.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct Kpis {
    pub total: usize,
    pub late: usize,
    pub due: usize,
    pub on_time: usize,
}

/// The promise table: loaded once at startup, read-only afterwards.
/// Records keep their file order; every downstream operation preserves it.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<PromiseRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<PromiseRecord>) -> Self {
        Self { records }
    }

    /// Load the store from a CSV file. Callers degrade a failure here to an
    /// empty store rather than aborting; only the credential check is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: PromiseRecord =
                row.with_context(|| format!("Malformed row in {}", path.display()))?;
            records.push(record);
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[PromiseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn kpis(&self) -> Kpis {
        let mut kpis = Kpis {
            total: self.records.len(),
            ..Default::default()
        };
        for record in &self.records {
            match record.status.as_str() {
                "late" => kpis.late += 1,
                "due" => kpis.due += 1,
                "on-time" => kpis.on_time += 1,
                _ => {}
            }
        }
        kpis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE_CSV: &str = "\
city,category,promise_description,due_date,status,latitude,longitude
Springfield,Infrastructure,Repave Main Street,2023-01-01,late,39.7817,-89.6501
Shelbyville,Education,Build a new library,2024-06-01,on-time,39.4061,-88.7903
Ogdenville,Transit,Extend the monorail,2024-09-15,due,,
";

    fn sample_store() -> RecordStore {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_CSV.as_bytes()).unwrap();
        RecordStore::load(file.path()).unwrap()
    }

    #[test]
    fn test_load_preserves_order() {
        let store = sample_store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.records()[0].city, "Springfield");
        assert_eq!(store.records()[1].city, "Shelbyville");
        assert_eq!(store.records()[2].city, "Ogdenville");
    }

    #[test]
    fn test_missing_coordinates_still_loaded() {
        let store = sample_store();
        let ogdenville = &store.records()[2];
        assert!(ogdenville.coordinates().is_none());
        assert_eq!(ogdenville.status, "due");
    }

    #[test]
    fn test_due_date_parsed() {
        let store = sample_store();
        assert_eq!(
            store.records()[0].due_date,
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_kpis() {
        let store = sample_store();
        let kpis = store.kpis();
        assert_eq!(kpis.total, 3);
        assert_eq!(kpis.late, 1);
        assert_eq!(kpis.due, 1);
        assert_eq!(kpis.on_time, 1);
    }

    #[test]
    fn test_kpis_empty_store() {
        let kpis = RecordStore::default().kpis();
        assert_eq!(kpis.total, 0);
        assert_eq!(kpis.late, 0);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(RecordStore::load(Path::new("/nonexistent/promises.csv")).is_err());
    }

    #[test]
    fn test_malformed_date_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"city,category,promise_description,due_date,status,latitude,longitude\n\
              Springfield,Infrastructure,Repave Main Street,not-a-date,late,1.0,2.0\n",
        )
        .unwrap();
        assert!(RecordStore::load(file.path()).is_err());
    }
}
