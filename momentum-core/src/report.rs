//! Report payload assembly and the share-text rendering.
//!
//! The payload here is the exact contract handed to the report generator;
//! assembly does no I/O and cannot fail.

use serde::{Deserialize, Serialize};

use crate::achievement::calc_achievement;
use crate::record::HabitRecord;

/// Weather enrichment as shown to the user and the report generator.
/// Values stay strings; the upstream API is not trusted for shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherInfo {
    pub city: String,
    pub temp_c: String,
    pub feels_like_c: String,
    pub description: String,
    pub humidity: String,
    pub wind_ms: String,
}

/// Random dog enrichment: image URL plus the breed inferred from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogImage {
    pub url: String,
    pub breed: String,
}

/// Section titles the report must contain, verbatim.
pub const REQUIRED_SECTIONS: [&str; 5] = [
    "컨디션 등급(S~D)",
    "습관 분석",
    "날씨 코멘트",
    "내일 미션",
    "오늘의 한마디",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Achievement {
    pub done: u32,
    pub total: u32,
    pub pct: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Instructions {
    pub language: &'static str,
    pub format: &'static str,
    pub required_sections: [&'static str; 5],
}

/// The structured condition-report input.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPayload {
    pub date: String,
    pub achievement: Achievement,
    pub mood_1to10: u8,
    pub habits_done: Vec<&'static str>,
    pub habits_missed: Vec<&'static str>,
    pub weather: Option<WeatherInfo>,
    pub dog: Option<DogImage>,
    pub instructions: Instructions,
}

impl ReportPayload {
    /// Assemble the payload from the day's record and the (independently
    /// nullable) enrichment fetches.
    pub fn assemble(
        record: &HabitRecord,
        weather: Option<WeatherInfo>,
        dog: Option<DogImage>,
    ) -> Self {
        let (done, pct) = calc_achievement(&record.habits);
        Self {
            date: record.date.format("%Y-%m-%d").to_string(),
            achievement: Achievement {
                done,
                total: 5,
                pct: (pct * 10.0).round() / 10.0,
            },
            mood_1to10: record.clamped_mood(),
            habits_done: record.habits.done_labels(),
            habits_missed: record.habits.missed_labels(),
            weather,
            dog,
            instructions: Instructions {
                language: "Korean",
                format: "Markdown",
                required_sections: REQUIRED_SECTIONS,
            },
        }
    }
}

/// Plain-text share block for a finished report.
pub fn share_text(
    record: &HabitRecord,
    weather: Option<&WeatherInfo>,
    dog: Option<&DogImage>,
    report: &str,
) -> String {
    let (done, pct) = calc_achievement(&record.habits);

    let mut lines = Vec::new();
    lines.push(format!("📊 Momentum - {}", record.date.format("%Y-%m-%d")));
    lines.push(format!(
        "도시: {} / 코치: {}",
        record.city(),
        record.persona.label()
    ));
    lines.push(format!(
        "달성률: {:.0}% ({}/5) / 기분: {}/10",
        pct,
        done,
        record.clamped_mood()
    ));
    if let Some(w) = weather {
        lines.push(format!("날씨: {} {}°C", w.description, w.temp_c));
    }
    if let Some(d) = dog {
        lines.push(format!("오늘의 강아지: {}", d.breed));
    }
    lines.push(String::new());
    lines.push(report.trim().to_string());

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::HabitStates;

    fn record() -> HabitRecord {
        let habits =
            HabitStates::from_partial([("wake", true), ("water", true), ("sleep", true)]);
        HabitRecord::new("2026-08-06".parse().unwrap())
            .with_habits(habits)
            .with_mood(8)
    }

    #[test]
    fn payload_splits_done_and_missed_labels() {
        let payload = ReportPayload::assemble(&record(), None, None);

        assert_eq!(payload.achievement.done, 3);
        assert_eq!(payload.achievement.total, 5);
        assert_eq!(payload.achievement.pct, 60.0);
        assert_eq!(payload.mood_1to10, 8);
        assert_eq!(payload.habits_done, vec!["기상 미션", "물 마시기", "수면"]);
        assert_eq!(payload.habits_missed, vec!["공부/독서", "운동하기"]);
    }

    #[test]
    fn payload_pct_rounds_to_one_decimal() {
        let habits = HabitStates::from_partial([("wake", true)]);
        let r = record().with_habits(habits);
        let payload = ReportPayload::assemble(&r, None, None);
        assert_eq!(payload.achievement.pct, 20.0);
    }

    #[test]
    fn failed_fetches_serialize_as_null() {
        let payload = ReportPayload::assemble(&record(), None, None);
        let json = serde_json::to_value(&payload).unwrap();

        assert!(json["weather"].is_null());
        assert!(json["dog"].is_null());
        assert_eq!(json["date"], "2026-08-06");
        assert_eq!(json["instructions"]["language"], "Korean");
        assert_eq!(json["instructions"]["required_sections"][0], "컨디션 등급(S~D)");
    }

    #[test]
    fn payload_carries_weather_when_present() {
        let weather = WeatherInfo {
            city: "Seoul".into(),
            temp_c: "2.3".into(),
            feels_like_c: "0.1".into(),
            description: "흐림".into(),
            humidity: "55".into(),
            wind_ms: "2.1".into(),
        };
        let payload = ReportPayload::assemble(&record(), Some(weather), None);
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["weather"]["description"], "흐림");
        assert_eq!(json["weather"]["temp_c"], "2.3");
    }

    #[test]
    fn share_text_includes_enrichments_when_present() {
        let weather = WeatherInfo {
            city: "Seoul".into(),
            temp_c: "2.3".into(),
            feels_like_c: "0.1".into(),
            description: "흐림".into(),
            humidity: "55".into(),
            wind_ms: "2.1".into(),
        };
        let dog = DogImage {
            url: "https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg".into(),
            breed: "Hound Afghan".into(),
        };

        let text = share_text(&record(), Some(&weather), Some(&dog), "## 리포트");
        assert!(text.contains("달성률: 60% (3/5) / 기분: 8/10"));
        assert!(text.contains("날씨: 흐림 2.3°C"));
        assert!(text.contains("오늘의 강아지: Hound Afghan"));
        assert!(text.ends_with("## 리포트"));
    }

    #[test]
    fn share_text_omits_missing_enrichments() {
        let text = share_text(&record(), None, None, "ok");
        assert!(!text.contains("날씨:"));
        assert!(!text.contains("강아지"));
    }
}
