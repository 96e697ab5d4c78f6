//! Rule evaluation engine.
//!
//! Stateless per-call: the caller supplies the weekly amounts and the
//! fitted baseline once; each rule is evaluated independently against the
//! shared read-only input and produces its own flag column. Rules never
//! depend on each other's outputs, so the engine fans the eight checks out
//! with rayon; evaluation order is irrelevant to the result.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use driftwatch_core::Baseline;

use crate::detectors;
use crate::report::FlagMatrix;

/// The eight control-chart rules, in their conventional numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    /// Rule 1: point on or beyond 3 sigma (outlier).
    BeyondThreeSigma,
    /// Rule 2: nine in a row on one side of the mean (shift).
    NineOneSide,
    /// Rule 3: six consecutive same-direction steps (trend).
    SixTrend,
    /// Rule 4: fourteen in a row alternating (bimodal).
    FourteenAlternating,
    /// Rule 5: two of three beyond 2 sigma, same side (shift).
    TwoOfThreeBeyondTwoSigma,
    /// Rule 6: four of five beyond 1 sigma, same side (shift or trend).
    FourOfFiveBeyondOneSigma,
    /// Rule 7: fifteen in a row within 1 sigma (stratification).
    FifteenWithinOneSigma,
    /// Rule 8: eight in a row beyond 1 sigma (bimodal spread).
    EightBeyondOneSigma,
}

impl Rule {
    /// All eight rules in fixed result-column order.
    pub const ALL: [Rule; 8] = [
        Rule::BeyondThreeSigma,
        Rule::NineOneSide,
        Rule::SixTrend,
        Rule::FourteenAlternating,
        Rule::TwoOfThreeBeyondTwoSigma,
        Rule::FourOfFiveBeyondOneSigma,
        Rule::FifteenWithinOneSigma,
        Rule::EightBeyondOneSigma,
    ];

    /// Conventional rule number, 1..=8.
    pub fn number(self) -> u8 {
        match self {
            Rule::BeyondThreeSigma => 1,
            Rule::NineOneSide => 2,
            Rule::SixTrend => 3,
            Rule::FourteenAlternating => 4,
            Rule::TwoOfThreeBeyondTwoSigma => 5,
            Rule::FourOfFiveBeyondOneSigma => 6,
            Rule::FifteenWithinOneSigma => 7,
            Rule::EightBeyondOneSigma => 8,
        }
    }

    /// Result-table column label.
    pub fn label(self) -> &'static str {
        match self {
            Rule::BeyondThreeSigma => "Rule1",
            Rule::NineOneSide => "Rule2",
            Rule::SixTrend => "Rule3",
            Rule::FourteenAlternating => "Rule4",
            Rule::TwoOfThreeBeyondTwoSigma => "Rule5",
            Rule::FourOfFiveBeyondOneSigma => "Rule6",
            Rule::FifteenWithinOneSigma => "Rule7",
            Rule::EightBeyondOneSigma => "Rule8",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    #[error("rule {rule}: invalid baseline (mean={mean}, sigma={sigma})")]
    InvalidBaseline { rule: u8, mean: f64, sigma: f64 },

    #[error("rule {rule}: non-finite value at index {index}")]
    NonFiniteValue { rule: u8, index: usize },

    #[error("flag matrix length {matrix} does not match series length {series}")]
    LengthMismatch { matrix: usize, series: usize },
}

/// Evaluate a single rule against the amounts and baseline.
///
/// Inputs shorter than the rule's minimum window are not an error: the
/// result is all-false. A non-finite value or an unusable baseline aborts
/// this rule's evaluation only, tagged with the rule number.
pub fn check(rule: Rule, values: &[f64], baseline: &Baseline) -> Result<Vec<bool>, RuleError> {
    if !baseline.mean.is_finite() || !baseline.sigma.is_finite() || baseline.sigma < 0.0 {
        return Err(RuleError::InvalidBaseline {
            rule: rule.number(),
            mean: baseline.mean,
            sigma: baseline.sigma,
        });
    }
    if let Some(index) = values.iter().position(|v| !v.is_finite()) {
        return Err(RuleError::NonFiniteValue {
            rule: rule.number(),
            index,
        });
    }

    let Baseline { mean, sigma } = *baseline;
    Ok(match rule {
        Rule::BeyondThreeSigma => detectors::check_rule1(values, mean, sigma),
        Rule::NineOneSide => detectors::check_rule2(values, mean),
        Rule::SixTrend => detectors::check_rule3(values),
        Rule::FourteenAlternating => detectors::check_rule4(values),
        Rule::TwoOfThreeBeyondTwoSigma => detectors::check_rule5(values, mean, sigma),
        Rule::FourOfFiveBeyondOneSigma => detectors::check_rule6(values, mean, sigma),
        Rule::FifteenWithinOneSigma => detectors::check_rule7(values, mean, sigma),
        Rule::EightBeyondOneSigma => detectors::check_rule8(values, mean, sigma),
    })
}

/// Stateless evaluator applying all eight rules to one series.
pub struct RuleEngine;

impl RuleEngine {
    /// Evaluate all eight rules in fixed column order.
    ///
    /// The rules run in parallel over the shared read-only input; the first
    /// failing rule aborts the evaluation.
    pub fn evaluate_all(values: &[f64], baseline: &Baseline) -> Result<FlagMatrix, RuleError> {
        let columns: Vec<(Rule, Vec<bool>)> = Rule::ALL
            .par_iter()
            .map(|&rule| check(rule, values, baseline).map(|flags| (rule, flags)))
            .collect::<Result<_, _>>()?;

        let matrix = FlagMatrix::new(values.len(), columns);

        debug!(
            points = values.len(),
            flagged = matrix.total_flagged(),
            "rule evaluation complete"
        );

        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASELINE: Baseline = Baseline {
        mean: 0.0,
        sigma: 1.0,
    };

    #[test]
    fn rule_numbers_are_stable() {
        let numbers: Vec<u8> = Rule::ALL.iter().map(|r| r.number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(Rule::ALL[0].label(), "Rule1");
        assert_eq!(Rule::ALL[7].label(), "Rule8");
    }

    #[test]
    fn check_preserves_length() {
        let values = vec![0.5; 20];
        for rule in Rule::ALL {
            let flags = check(rule, &values, &BASELINE).unwrap();
            assert_eq!(flags.len(), values.len());
        }
    }

    #[test]
    fn check_empty_input_is_all_false() {
        for rule in Rule::ALL {
            assert!(check(rule, &[], &BASELINE).unwrap().is_empty());
        }
    }

    #[test]
    fn check_rejects_negative_sigma() {
        let bad = Baseline {
            mean: 0.0,
            sigma: -1.0,
        };
        let err = check(Rule::SixTrend, &[1.0, 2.0], &bad).unwrap_err();
        assert_eq!(
            err,
            RuleError::InvalidBaseline {
                rule: 3,
                mean: 0.0,
                sigma: -1.0
            }
        );
    }

    #[test]
    fn check_rejects_non_finite_value() {
        let values = [1.0, f64::NAN, 3.0];
        let err = check(Rule::NineOneSide, &values, &BASELINE).unwrap_err();
        assert_eq!(err, RuleError::NonFiniteValue { rule: 2, index: 1 });
    }

    #[test]
    fn evaluate_all_returns_eight_columns() {
        let values = vec![0.5; 20];
        let matrix = RuleEngine::evaluate_all(&values, &BASELINE).unwrap();
        assert_eq!(matrix.len(), 20);
        for rule in Rule::ALL {
            assert_eq!(matrix.column(rule).len(), 20);
        }
    }

    #[test]
    fn evaluate_all_is_idempotent() {
        // A series that trips several rules at once.
        let mut values: Vec<f64> = (0..10).map(|i| i as f64 * 0.5).collect();
        values.extend(vec![3.5; 10]);
        values.push(0.0);

        let a = RuleEngine::evaluate_all(&values, &BASELINE).unwrap();
        let b = RuleEngine::evaluate_all(&values, &BASELINE).unwrap();
        for rule in Rule::ALL {
            assert_eq!(a.column(rule), b.column(rule));
        }
    }

    #[test]
    fn evaluate_all_rules_are_independent() {
        // Serial per-rule checks must agree with the parallel fan-out.
        let values: Vec<f64> = (0..30).map(|i| ((i * 7) % 5) as f64 - 2.0).collect();
        let matrix = RuleEngine::evaluate_all(&values, &BASELINE).unwrap();
        for rule in Rule::ALL {
            let solo = check(rule, &values, &BASELINE).unwrap();
            assert_eq!(matrix.column(rule), solo.as_slice());
        }
    }

    #[test]
    fn evaluate_all_propagates_rule_errors() {
        let values = [1.0, f64::INFINITY];
        assert!(RuleEngine::evaluate_all(&values, &BASELINE).is_err());
    }
}
