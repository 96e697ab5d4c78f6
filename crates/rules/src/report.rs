//! Flag matrix and the week-labelled result table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use driftwatch_core::{Baseline, WeeklyPoint};

use crate::engine::{Rule, RuleError};

/// The eight flag columns for one evaluated series, in fixed rule order.
#[derive(Debug, Clone, PartialEq)]
pub struct FlagMatrix {
    len: usize,
    columns: Vec<(Rule, Vec<bool>)>,
}

impl FlagMatrix {
    pub(crate) fn new(len: usize, columns: Vec<(Rule, Vec<bool>)>) -> Self {
        Self { len, columns }
    }

    /// Length of every flag column (= length of the evaluated series).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One rule's flag column.
    pub fn column(&self, rule: Rule) -> &[bool] {
        self.columns
            .iter()
            .find(|(r, _)| *r == rule)
            .map(|(_, flags)| flags.as_slice())
            .unwrap_or(&[])
    }

    /// Number of flagged indices for one rule.
    pub fn flagged(&self, rule: Rule) -> usize {
        self.column(rule).iter().filter(|&&f| f).count()
    }

    /// Total flags across all eight columns.
    pub fn total_flagged(&self) -> usize {
        Rule::ALL.iter().map(|&r| self.flagged(r)).sum()
    }

    /// The flags of all eight rules at one index, in rule order.
    pub fn row(&self, index: usize) -> [bool; 8] {
        let mut row = [false; 8];
        for (slot, &rule) in Rule::ALL.iter().enumerate() {
            row[slot] = self.column(rule).get(index).copied().unwrap_or(false);
        }
        row
    }
}

/// One result-table row: the week identity plus the eight rule flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub week: u32,
    pub flags: [bool; 8],
}

/// The full result table for one analysis run.
///
/// Carries the per-week identity alongside the flag columns (the identity is
/// appended to, never replaced) plus run metadata for log correlation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub baseline: Baseline,
    pub rows: Vec<ReportRow>,
}

impl WeeklyReport {
    /// Join the weekly points with their evaluated flag matrix.
    pub fn assemble(
        points: &[WeeklyPoint],
        matrix: &FlagMatrix,
        baseline: Baseline,
    ) -> Result<Self, RuleError> {
        if points.len() != matrix.len() {
            return Err(RuleError::LengthMismatch {
                matrix: matrix.len(),
                series: points.len(),
            });
        }

        let rows = points
            .iter()
            .enumerate()
            .map(|(i, p)| ReportRow {
                week: p.week,
                flags: matrix.row(i),
            })
            .collect();

        Ok(Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            baseline,
            rows,
        })
    }

    /// Number of weeks flagged by a given rule.
    pub fn flagged_weeks(&self, rule: Rule) -> usize {
        let slot = Rule::ALL.iter().position(|&r| r == rule).unwrap_or(0);
        self.rows.iter().filter(|r| r.flags[slot]).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RuleEngine;

    fn make_points(values: &[f64]) -> Vec<WeeklyPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &amount)| WeeklyPoint {
                week: 53 + i as u32,
                amount,
            })
            .collect()
    }

    #[test]
    fn assemble_carries_week_identity() {
        let baseline = Baseline {
            mean: 0.0,
            sigma: 1.0,
        };
        let values = vec![0.5; 12];
        let points = make_points(&values);
        let matrix = RuleEngine::evaluate_all(&values, &baseline).unwrap();

        let report = WeeklyReport::assemble(&points, &matrix, baseline).unwrap();
        assert_eq!(report.rows.len(), 12);
        assert_eq!(report.rows[0].week, 53);
        assert_eq!(report.rows[11].week, 64);
    }

    #[test]
    fn assemble_rejects_length_mismatch() {
        let baseline = Baseline {
            mean: 0.0,
            sigma: 1.0,
        };
        let values = vec![0.5; 12];
        let points = make_points(&values[..10]);
        let matrix = RuleEngine::evaluate_all(&values, &baseline).unwrap();

        let err = WeeklyReport::assemble(&points, &matrix, baseline).unwrap_err();
        assert_eq!(
            err,
            RuleError::LengthMismatch {
                matrix: 12,
                series: 10
            }
        );
    }

    #[test]
    fn report_counts_flagged_weeks() {
        let baseline = Baseline {
            mean: 0.0,
            sigma: 1.0,
        };
        // Ten points above the mean: rule 2 fires at indices 8 and 9.
        let values = vec![0.5; 10];
        let points = make_points(&values);
        let matrix = RuleEngine::evaluate_all(&values, &baseline).unwrap();
        let report = WeeklyReport::assemble(&points, &matrix, baseline).unwrap();

        assert_eq!(report.flagged_weeks(Rule::NineOneSide), 2);
        assert_eq!(report.flagged_weeks(Rule::SixTrend), 0);
    }

    #[test]
    fn matrix_row_matches_columns() {
        let baseline = Baseline {
            mean: 0.0,
            sigma: 1.0,
        };
        let values = vec![0.5; 10];
        let matrix = RuleEngine::evaluate_all(&values, &baseline).unwrap();

        let row = matrix.row(8);
        assert!(row[1]); // rule 2 fires at index 8
        assert!(!row[0]);
    }
}
