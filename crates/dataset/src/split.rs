use driftwatch_core::DailyRecord;

/// Split the daily ledger into a training prefix and a test remainder.
///
/// The two slices are disjoint by construction. A `train_rows` beyond the
/// data length yields an empty test set rather than an error.
pub fn train_test_split(
    records: &[DailyRecord],
    train_rows: usize,
) -> (&[DailyRecord], &[DailyRecord]) {
    let cut = train_rows.min(records.len());
    records.split_at(cut)
}
