use std::path::Path;

use driftwatch_core::{DailyRecord, DriftError};
use tracing::info;

pub struct CsvImporter;

impl CsvImporter {
    /// Read the daily `day,week,amount` ledger from a CSV file.
    ///
    /// Rows are returned in file order (insertion order = time order). A
    /// malformed row aborts the import with the offending line number.
    pub fn import(path: &Path) -> Result<Vec<DailyRecord>, DriftError> {
        let file = std::fs::File::open(path).map_err(DriftError::Io)?;
        let mut reader = csv::Reader::from_reader(file);

        let mut records = Vec::new();
        for (row, result) in reader.deserialize::<DailyRecord>().enumerate() {
            let record =
                result.map_err(|e| DriftError::Csv(format!("row {}: {}", row + 1, e)))?;
            records.push(record);
        }

        info!(
            "Imported {} daily records from {}",
            records.len(),
            path.display()
        );
        Ok(records)
    }
}
