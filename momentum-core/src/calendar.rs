//! Month calendar grid with severity-banded day cells.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

use crate::ledger::LedgerEntry;

/// Band thresholds (achievement pct, upper bounds).
pub const BAND_LOW_MAX: f64 = 40.0;
pub const BAND_MEDIUM_MAX: f64 = 70.0;
pub const BAND_HIGH_MAX: f64 = 90.0;

/// Display grouping for a day's achievement percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBand {
    None,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl SeverityBand {
    pub fn from_pct(pct: f64) -> Self {
        if pct <= 0.0 {
            Self::None
        } else if pct < BAND_LOW_MAX {
            Self::Low
        } else if pct < BAND_MEDIUM_MAX {
            Self::Medium
        } else if pct < BAND_HIGH_MAX {
            Self::High
        } else {
            Self::VeryHigh
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very high",
        }
    }
}

/// One populated day in the grid. `mood` is absent when the day has no
/// ledger entry; `pct` is then 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayCell {
    pub day: u32,
    pub pct: f64,
    pub mood: Option<u8>,
}

impl DayCell {
    pub fn band(&self) -> SeverityBand {
        SeverityBand::from_pct(self.pct)
    }
}

/// Week-major month grid, Monday-first. Leading/trailing cells belonging to
/// adjacent months are `None`; the cell count is always a multiple of 7.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    cells: Vec<Option<DayCell>>,
}

impl MonthGrid {
    pub fn build(series: &[LedgerEntry], year: i32, month: u32) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let days = days_in_month(year, month)?;

        let by_date: HashMap<NaiveDate, &LedgerEntry> =
            series.iter().map(|e| (e.date, e)).collect();

        let lead = first.weekday().num_days_from_monday() as usize;
        let mut cells: Vec<Option<DayCell>> = vec![None; lead];

        for day in 1..=days {
            let date = NaiveDate::from_ymd_opt(year, month, day)?;
            let entry = by_date.get(&date);
            cells.push(Some(DayCell {
                day,
                pct: entry.map_or(0.0, |e| e.pct),
                mood: entry.map(|e| e.mood),
            }));
        }

        while cells.len() % 7 != 0 {
            cells.push(None);
        }

        Some(Self { year, month, cells })
    }

    pub fn cells(&self) -> &[Option<DayCell>] {
        &self.cells
    }

    /// Rows of seven, Monday to Sunday.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<DayCell>]> {
        self.cells.chunks(7)
    }
}

/// Step a (year, month) pair back by `back` months. Month navigation in
/// the UI is limited to the current month and the two preceding ones.
pub fn month_back(year: i32, month: u32, back: u32) -> (i32, u32) {
    let mut y = year;
    let mut m = month;
    for _ in 0..back {
        if m == 1 {
            y -= 1;
            m = 12;
        } else {
            m -= 1;
        }
    }
    (y, m)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((next - first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::LedgerEntry;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn banding_edges() {
        assert_eq!(SeverityBand::from_pct(0.0), SeverityBand::None);
        assert_eq!(SeverityBand::from_pct(39.9), SeverityBand::Low);
        assert_eq!(SeverityBand::from_pct(40.0), SeverityBand::Medium);
        assert_eq!(SeverityBand::from_pct(69.9), SeverityBand::Medium);
        assert_eq!(SeverityBand::from_pct(70.0), SeverityBand::High);
        assert_eq!(SeverityBand::from_pct(89.9), SeverityBand::High);
        assert_eq!(SeverityBand::from_pct(90.0), SeverityBand::VeryHigh);
        assert_eq!(SeverityBand::from_pct(100.0), SeverityBand::VeryHigh);
        assert_eq!(SeverityBand::from_pct(90.0).as_str(), "very high");
    }

    #[test]
    fn thirty_day_month_starting_wednesday() {
        // September 2021: 30 days, the 1st is a Wednesday.
        let grid = MonthGrid::build(&[], 2021, 9).unwrap();

        assert_eq!(grid.cells().len() % 7, 0);
        assert_eq!(grid.cells().len(), 35);

        // Monday and Tuesday of the first week are empty.
        let first_week: Vec<_> = grid.weeks().next().unwrap().to_vec();
        assert!(first_week[0].is_none());
        assert!(first_week[1].is_none());
        assert_eq!(first_week[2].unwrap().day, 1);

        // 2 leading + 30 days = 32; three trailing empties pad to 35.
        let trailing = grid.cells().iter().rev().take_while(|c| c.is_none()).count();
        assert_eq!(trailing, 3);
        assert_eq!(grid.cells()[31].unwrap().day, 30);
    }

    #[test]
    fn cells_pick_up_series_values() {
        let series = vec![LedgerEntry::new(date("2021-09-15"), 4, 8)];
        let grid = MonthGrid::build(&series, 2021, 9).unwrap();

        let cell = grid
            .cells()
            .iter()
            .flatten()
            .find(|c| c.day == 15)
            .copied()
            .unwrap();
        assert_eq!(cell.pct, 80.0);
        assert_eq!(cell.mood, Some(8));
        assert_eq!(cell.band(), SeverityBand::High);

        let empty_day = grid
            .cells()
            .iter()
            .flatten()
            .find(|c| c.day == 16)
            .copied()
            .unwrap();
        assert_eq!(empty_day.pct, 0.0);
        assert_eq!(empty_day.mood, None);
        assert_eq!(empty_day.band(), SeverityBand::None);
    }

    #[test]
    fn month_back_crosses_year_boundary() {
        assert_eq!(month_back(2026, 8, 0), (2026, 8));
        assert_eq!(month_back(2026, 8, 2), (2026, 6));
        assert_eq!(month_back(2026, 1, 1), (2025, 12));
        assert_eq!(month_back(2026, 2, 2), (2025, 12));
    }

    #[test]
    fn february_leap_year_has_29_days() {
        let grid = MonthGrid::build(&[], 2024, 2).unwrap();
        let days: Vec<u32> = grid.cells().iter().flatten().map(|c| c.day).collect();
        assert_eq!(days.len(), 29);
        assert_eq!(*days.last().unwrap(), 29);
    }
}
