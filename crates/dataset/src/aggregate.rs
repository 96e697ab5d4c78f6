use std::collections::BTreeMap;

use driftwatch_core::{DailyRecord, WeeklyPoint};
use tracing::debug;

/// Collapse daily records into one mean amount per week, ordered by
/// ascending week key.
pub fn weekly_means(records: &[DailyRecord]) -> Vec<WeeklyPoint> {
    let mut groups: BTreeMap<u32, (f64, usize)> = BTreeMap::new();

    for record in records {
        let entry = groups.entry(record.week).or_insert((0.0, 0));
        entry.0 += record.amount;
        entry.1 += 1;
    }

    let points: Vec<WeeklyPoint> = groups
        .into_iter()
        .map(|(week, (sum, count))| WeeklyPoint {
            week,
            amount: sum / count as f64,
        })
        .collect();

    debug!(records = records.len(), weeks = points.len(), "weekly aggregation");
    points
}
