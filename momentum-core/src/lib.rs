//! momentum-core: Core types and derivations for the Momentum habit tracker

pub mod achievement;
pub mod calendar;
pub mod habit;
pub mod ledger;
pub mod record;
pub mod report;
pub mod streak;
pub mod time;

pub use achievement::calc_achievement;
pub use calendar::{DayCell, MonthGrid, SeverityBand, month_back};
pub use habit::{CITIES, CoachPersona, HABITS, HabitDefinition, HabitStates, city_or_default};
pub use ledger::{Ledger, LedgerEntry, WINDOW, today_row};
pub use record::HabitRecord;
pub use report::{DogImage, REQUIRED_SECTIONS, ReportPayload, WeatherInfo, share_text};
pub use streak::{STREAK_SCAN_CAP, current_streak};
pub use time::today_in_tz;
