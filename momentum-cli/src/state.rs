use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use momentum_core::{HabitRecord, Ledger, LedgerEntry, current_streak, today_row};

pub fn momentum_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".momentum"))
}

pub fn ensure_momentum_home() -> Result<PathBuf> {
    let dir = momentum_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Per-session state: the history ledger and today's editable record.
///
/// Owned by one interaction loop and passed explicitly to every
/// derivation; there is no ambient global state and nothing survives the
/// session.
#[derive(Debug, Clone)]
pub struct Session {
    pub ledger: Ledger,
    pub today: HabitRecord,
}

impl Session {
    /// Fresh session: six seeded demo days plus an empty record for today.
    pub fn start(date: NaiveDate) -> Self {
        Self {
            ledger: Ledger::seeded(date),
            today: HabitRecord::new(date),
        }
    }

    /// The chart series: committed rows with the live today row merged in.
    pub fn chart_series(&self) -> Vec<LedgerEntry> {
        self.ledger.chart_series(today_row(&self.today))
    }

    /// Streak including today's live values.
    pub fn streak(&self) -> u32 {
        current_streak(&self.chart_series(), self.today.date)
    }

    /// Commit today's derived row into the ledger (upsert-by-date).
    pub fn commit_today(&mut self) {
        self.ledger.upsert(today_row(&self.today));
    }
}

/// Append-only export of generated reports under ~/.momentum/reports/.
/// Write-only convenience artifact; nothing reads it back.
pub struct ReportLog {
    path: PathBuf,
}

impl ReportLog {
    pub fn open(date: NaiveDate) -> Result<Self> {
        let dir = ensure_momentum_home()?.join("reports");
        fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
        let path = dir.join(format!("{}.md", date.format("%Y-%m-%d")));
        Ok(Self { path })
    }

    pub fn append(&self, share: &str) -> Result<()> {
        use std::io::Write;
        let mut f = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("open {}", self.path.display()))?;
        writeln!(f, "{share}\n")?;
        Ok(())
    }
}
