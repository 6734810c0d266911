//! The day's editable check-in record.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::habit::{CoachPersona, HabitStates, city_or_default};

/// One day's raw input: habit completion, mood, and environment choices.
///
/// Mutable until committed into the ledger. `mood` and `city` are stored as
/// given and normalized on read, so stale values can never fail a render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub date: NaiveDate,
    pub habits: HabitStates,
    pub mood: u8,
    pub city: String,
    pub persona: CoachPersona,
}

impl HabitRecord {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            habits: HabitStates::default(),
            mood: 7,
            city: "Seoul".to_string(),
            persona: CoachPersona::Mentor,
        }
    }

    pub fn with_habits(mut self, habits: HabitStates) -> Self {
        self.habits = habits;
        self
    }

    pub fn with_mood(mut self, mood: u8) -> Self {
        self.mood = mood;
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn with_persona(mut self, persona: CoachPersona) -> Self {
        self.persona = persona;
        self
    }

    /// Mood clamped to the 1-10 scale.
    pub fn clamped_mood(&self) -> u8 {
        self.mood.clamp(1, 10)
    }

    /// City selection, normalized to the fixed list.
    pub fn city(&self) -> &'static str {
        city_or_default(&self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn defaults_match_fresh_checkin() {
        let r = HabitRecord::new(date("2026-08-06"));
        assert_eq!(r.mood, 7);
        assert_eq!(r.city(), "Seoul");
        assert_eq!(r.persona, CoachPersona::Mentor);
        assert_eq!(r.habits, HabitStates::default());
    }

    #[test]
    fn mood_clamps_on_read() {
        let r = HabitRecord::new(date("2026-08-06")).with_mood(0);
        assert_eq!(r.clamped_mood(), 1);
        let r = r.with_mood(42);
        assert_eq!(r.clamped_mood(), 10);
    }

    #[test]
    fn stale_city_normalizes() {
        let r = HabitRecord::new(date("2026-08-06")).with_city("Gotham");
        assert_eq!(r.city(), "Seoul");
    }
}
