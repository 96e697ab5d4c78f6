//! The eight control-chart pattern detectors.
//!
//! Each detector is a pure function of the weekly amounts and the fitted
//! baseline, returning a flag sequence of the same length where `true` at
//! index i means the pattern is confirmed to end at i. Run-tracking rules
//! (2–4) keep flagging every index while the run persists, not just the
//! index where the threshold is first met.
//!
//! Windowed rules (5–8) scan window starts in `0..len − window` with an
//! exclusive upper bound, so the final window of each size is never
//! examined; rule 8 places its flag one past the window's last element.
//! These offsets are part of the reproducible contract and must not be
//! "fixed".
//!
//! # References
//!
//! - Nelson, L.S. (1984). "The Shewhart Control Chart — Tests for Special
//!   Causes", *Journal of Quality Technology* 16(4).
//! - Western Electric (1956). *Statistical Quality Control Handbook*.

/// Rule 1: a single point on or beyond 3 sigma from the mean (outlier).
pub(crate) fn check_rule1(values: &[f64], mean: f64, sigma: f64) -> Vec<bool> {
    let upper = mean + 3.0 * sigma;
    let lower = mean - 3.0 * sigma;

    values.iter().map(|&v| v <= lower || v >= upper).collect()
}

/// Rule 2: nine or more points in a row on the same side of the mean (shift).
///
/// Points exactly on the mean neither extend nor reset the run.
pub(crate) fn check_rule2(values: &[f64], mean: f64) -> Vec<bool> {
    let mut flags = vec![false; values.len()];

    // +1 = above the mean, -1 = below, 0 = no run yet.
    let mut side: i8 = 0;
    let mut count: usize = 0;

    for (i, &v) in values.iter().enumerate() {
        if v > mean {
            if side == 1 {
                count += 1;
            } else {
                side = 1;
                count = 1;
            }
        } else if v < mean {
            if side == -1 {
                count += 1;
            } else {
                side = -1;
                count = 1;
            }
        }

        if count >= 9 {
            flags[i] = true;
        }
    }

    flags
}

/// Rule 3: six or more consecutive same-direction steps (trend).
///
/// Steps are value-to-previous-value comparisons; an equal step leaves the
/// direction and counter unchanged while the previous-value cursor still
/// advances.
pub(crate) fn check_rule3(values: &[f64]) -> Vec<bool> {
    let mut flags = vec![false; values.len()];
    let Some(&first) = values.first() else {
        return flags;
    };

    let mut previous = first;
    // +1 = increasing, -1 = decreasing, 0 = no run yet.
    let mut direction: i8 = 0;
    let mut count: usize = 0;

    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > previous {
            if direction == 1 {
                count += 1;
            } else {
                direction = 1;
                count = 1;
            }
        } else if v < previous {
            if direction == -1 {
                count += 1;
            } else {
                direction = -1;
                count = 1;
            }
        }

        if count >= 6 {
            flags[i] = true;
        }

        previous = v;
    }

    flags
}

/// Rule 4: fourteen or more points in a row alternating up and down
/// (bimodal, two or more factors in the data).
///
/// Two consecutive steps in the same direction reset the streak; equal
/// steps change nothing. The streak starts at 1 and resets to 0, so a
/// broken alternation needs one step more than a fresh one to reach the
/// threshold.
pub(crate) fn check_rule4(values: &[f64]) -> Vec<bool> {
    let mut flags = vec![false; values.len()];
    let Some(&first) = values.first() else {
        return flags;
    };

    let mut previous = first;
    // Direction of the last non-equal step: +1 up, -1 down, 0 none yet.
    let mut last_dir: i8 = 0;
    let mut streak: usize = 1;

    for (i, &v) in values.iter().enumerate().skip(1) {
        let dir: i8 = if v > previous {
            1
        } else if v < previous {
            -1
        } else {
            0
        };

        if dir != 0 {
            if dir == last_dir {
                streak = 0;
                last_dir = 0;
            } else {
                streak += 1;
                last_dir = dir;
            }
        }

        previous = v;

        if streak >= 14 {
            flags[i] = true;
        }
    }

    flags
}

/// Rule 5: two out of three consecutive points beyond 2 sigma, same side
/// (shift).
///
/// All three points must lie strictly on one side of the mean; the window's
/// last index is flagged.
pub(crate) fn check_rule5(values: &[f64], mean: f64, sigma: f64) -> Vec<bool> {
    let n = values.len();
    let mut flags = vec![false; n];
    if n < 3 {
        return flags;
    }

    let upper_2s = mean + 2.0 * sigma;
    let lower_2s = mean - 2.0 * sigma;

    for i in 0..n - 3 {
        let window = &values[i..i + 3];

        let hit = if window.iter().all(|&v| v > mean) {
            window.iter().filter(|&&v| v > upper_2s).count() >= 2
        } else if window.iter().all(|&v| v < mean) {
            window.iter().filter(|&&v| v < lower_2s).count() >= 2
        } else {
            false
        };

        if hit {
            flags[i + 2] = true;
        }
    }

    flags
}

/// Rule 6: four out of five consecutive points beyond 1 sigma, same side
/// (shift or trend).
pub(crate) fn check_rule6(values: &[f64], mean: f64, sigma: f64) -> Vec<bool> {
    let n = values.len();
    let mut flags = vec![false; n];
    if n < 5 {
        return flags;
    }

    let upper_1s = mean + sigma;
    let lower_1s = mean - sigma;

    for i in 0..n - 5 {
        let window = &values[i..i + 5];

        let hit = if window.iter().all(|&v| v > mean) {
            window.iter().filter(|&&v| v > upper_1s).count() >= 4
        } else if window.iter().all(|&v| v < mean) {
            window.iter().filter(|&&v| v < lower_1s).count() >= 4
        } else {
            false
        };

        if hit {
            flags[i + 4] = true;
        }
    }

    flags
}

/// Rule 7: fifteen points in a row strictly within 1 sigma of the mean
/// (stratification, reduced variation).
///
/// A point exactly on either 1-sigma boundary fails the window.
pub(crate) fn check_rule7(values: &[f64], mean: f64, sigma: f64) -> Vec<bool> {
    let n = values.len();
    let mut flags = vec![false; n];
    if n < 15 {
        return flags;
    }

    let upper_1s = mean + sigma;
    let lower_1s = mean - sigma;

    for i in 0..n - 15 {
        let within = values[i..i + 15]
            .iter()
            .all(|&v| v < upper_1s && v > lower_1s);

        if within {
            flags[i + 14] = true;
        }
    }

    flags
}

/// Rule 8: eight points in a row each at least 1 sigma from the mean
/// (bimodal spread).
///
/// Only distance from the mean is tested, not side consistency. The flag
/// lands at the index one past the window's last element.
pub(crate) fn check_rule8(values: &[f64], mean: f64, sigma: f64) -> Vec<bool> {
    let n = values.len();
    let mut flags = vec![false; n];
    if n < 8 {
        return flags;
    }

    for i in 0..n - 8 {
        let spread = values[i..i + 8].iter().all(|&v| (mean - v).abs() >= sigma);

        if spread {
            flags[i + 8] = true;
        }
    }

    flags
}
