//! Streak calculation over the daily series.

use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

use crate::ledger::LedgerEntry;

/// Upper bound on the backward scan. Guarantees termination on any input;
/// kept as a constant rather than inferring deeper intent.
pub const STREAK_SCAN_CAP: usize = 365;

/// Count consecutive days up to and including `today` with at least one
/// habit completed.
///
/// The walk moves one day at a time with no gap skipping: a day with no
/// entry breaks the streak exactly like a zero-achievement day. The series
/// may include the live (uncommitted) today row.
pub fn current_streak(series: &[LedgerEntry], today: NaiveDate) -> u32 {
    let done_by_date: HashMap<NaiveDate, u32> =
        series.iter().map(|e| (e.date, e.done)).collect();

    let mut streak = 0;
    let mut day = today;
    for _ in 0..STREAK_SCAN_CAP {
        match done_by_date.get(&day) {
            Some(done) if *done > 0 => streak += 1,
            _ => break,
        }
        day = day - Duration::days(1);
    }
    streak
}
