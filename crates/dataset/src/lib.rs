//! Dataset acquisition and persistence: CSV import of the daily ledger,
//! train/test split, weekly aggregation, and CSV export of the result table.
//!
//! The rule engine itself performs no I/O; everything file-shaped lives
//! here, driven by explicit paths from the orchestration layer.

pub mod aggregate;
pub mod export;
pub mod import;
pub mod split;

pub use aggregate::weekly_means;
pub use export::CsvExporter;
pub use import::CsvImporter;
pub use split::train_test_split;
