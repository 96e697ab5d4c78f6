use serde::{Deserialize, Serialize};

use crate::error::DriftError;

/// One row of the daily input ledger.
///
/// The `day` label is carried through import for traceability but dropped
/// before analysis; only `week` and `amount` reach the rule engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecord {
    pub day: String,
    pub week: u32,
    pub amount: f64,
}

/// One point of the weekly-aggregated measurement sequence.
///
/// Insertion order is time order; the sequence is immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPoint {
    pub week: u32,
    pub amount: f64,
}

/// Baseline statistics fitted once from the training prefix.
///
/// `sigma` is the sample standard deviation (n − 1 divisor). Both values are
/// fixed for the duration of an analysis run; the rules never recompute them
/// from the window under test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub mean: f64,
    pub sigma: f64,
}

impl Baseline {
    /// Fit mean and sample standard deviation from training values.
    ///
    /// Requires at least 2 values (the sample stddev is undefined below
    /// that) and rejects non-finite inputs.
    pub fn fit(values: &[f64]) -> Result<Self, DriftError> {
        if values.len() < 2 {
            return Err(DriftError::InsufficientData(format!(
                "baseline fit needs at least 2 values, got {}",
                values.len()
            )));
        }
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(DriftError::InvalidInput(format!(
                "non-finite training value at index {}",
                i
            )));
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);

        Ok(Self {
            mean,
            sigma: variance.sqrt(),
        })
    }
}
