//! Control-chart run rules for weekly-aggregated series.
//!
//! The eight classic pattern tests (outlier, shift, trend, alternation,
//! zone counts, stratification, spread) evaluated against a fixed training
//! baseline, producing one flag column per rule.

mod detectors;

pub mod engine;
pub mod report;

pub use engine::{check, Rule, RuleEngine, RuleError};
pub use report::{FlagMatrix, ReportRow, WeeklyReport};
