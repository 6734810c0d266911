//! History ledger: committed daily summaries in a trailing window.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::achievement::calc_achievement;
use crate::record::HabitRecord;

/// The ledger keeps only this many chronologically-latest rows.
pub const WINDOW: usize = 7;

/// Demo history: (done, mood) for the six days before today.
const SEED_PATTERN: [(u32, u8); 6] = [(3, 6), (4, 7), (2, 5), (5, 8), (3, 7), (4, 6)];

/// A committed daily summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub done: u32,
    pub pct: f64,
    pub mood: u8,
}

impl LedgerEntry {
    pub fn new(date: NaiveDate, done: u32, mood: u8) -> Self {
        Self {
            date,
            done,
            pct: f64::from(done) / 5.0 * 100.0,
            mood,
        }
    }
}

/// Derive the live (uncommitted) ledger row for a check-in record.
pub fn today_row(record: &HabitRecord) -> LedgerEntry {
    let (done, pct) = calc_achievement(&record.habits);
    LedgerEntry {
        date: record.date,
        done,
        pct,
        mood: record.clamped_mood(),
    }
}

/// Chronologically ordered daily summaries, capped to [`WINDOW`] rows.
///
/// Chronological order is an invariant: upserts of new dates insert at the
/// sorted position, and eviction always drops the oldest rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Six synthetic days of history leading up to (but not including) `today`.
    pub fn seeded(today: NaiveDate) -> Self {
        let mut ledger = Self::new();
        let n = SEED_PATTERN.len() as i64;
        for (i, (done, mood)) in SEED_PATTERN.iter().enumerate() {
            let date = today - Duration::days(n - i as i64);
            ledger.upsert(LedgerEntry::new(date, *done, *mood));
        }
        ledger
    }

    /// Replace the row with the same date in place, or insert a new row at
    /// its chronological position, then evict down to the window.
    pub fn upsert(&mut self, entry: LedgerEntry) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.date == entry.date) {
            *existing = entry;
            return;
        }
        let idx = self.entries.partition_point(|e| e.date < entry.date);
        self.entries.insert(idx, entry);
        if self.entries.len() > WINDOW {
            let overflow = self.entries.len() - WINDOW;
            self.entries.drain(..overflow);
        }
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The chart/view series: committed rows with the live today row merged
    /// in. A committed row for the same date is overridden in the view only;
    /// the stored ledger is untouched until an explicit commit.
    pub fn chart_series(&self, today: LedgerEntry) -> Vec<LedgerEntry> {
        let mut series = self.entries.clone();
        if let Some(existing) = series.iter_mut().find(|e| e.date == today.date) {
            *existing = today;
        } else {
            let idx = series.partition_point(|e| e.date < today.date);
            series.insert(idx, today);
        }
        series
    }
}
