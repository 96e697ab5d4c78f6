use std::path::Path;

use driftwatch_core::DriftError;
use driftwatch_rules::{Rule, WeeklyReport};
use tracing::info;

pub struct CsvExporter;

impl CsvExporter {
    /// Write the result table as CSV: header `week,Rule1,…,Rule8`, one row
    /// per week, flags serialized as 0/1.
    pub fn export(path: &Path, report: &WeeklyReport) -> Result<(), DriftError> {
        let file = std::fs::File::create(path).map_err(DriftError::Io)?;
        let mut writer = csv::Writer::from_writer(file);

        let mut header = vec!["week".to_string()];
        header.extend(Rule::ALL.iter().map(|r| r.label().to_string()));
        writer
            .write_record(&header)
            .map_err(|e| DriftError::Csv(e.to_string()))?;

        for row in &report.rows {
            let mut record = vec![row.week.to_string()];
            record.extend(row.flags.iter().map(|&f| if f { "1" } else { "0" }.to_string()));
            writer
                .write_record(&record)
                .map_err(|e| DriftError::Csv(e.to_string()))?;
        }

        writer.flush()?;
        info!(
            "Results for {} weeks saved to {}",
            report.rows.len(),
            path.display()
        );
        Ok(())
    }
}
