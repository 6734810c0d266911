use chrono::NaiveDate;

use momentum_core::{
    CoachPersona, HabitRecord, HabitStates, Ledger, ReportPayload, WeatherInfo, current_streak,
    share_text, today_row,
};
use momentum_fetch::{FetchError, optional};

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn checked_in_record(today: NaiveDate) -> HabitRecord {
    HabitRecord::new(today)
        .with_habits(HabitStates::from_partial([
            ("wake", true),
            ("water", true),
            ("sleep", true),
        ]))
        .with_mood(8)
        .with_city("Busan")
        .with_persona(CoachPersona::GameMaster)
}

/// The whole seeded-session derivation chain: chart series, streak, and
/// the committed window after a generate-style upsert.
#[test]
fn seeded_session_series_and_streak() {
    let today = date("2026-08-06");
    let ledger = Ledger::seeded(today);
    let record = checked_in_record(today);

    // Live today row is merged into the view without touching the ledger.
    let series = ledger.chart_series(today_row(&record));
    assert_eq!(series.len(), 7);
    assert_eq!(series.last().unwrap().date, today);
    assert_eq!(series.last().unwrap().done, 3);
    assert_eq!(ledger.len(), 6);

    // Every seeded day has at least one habit done, so the live today row
    // extends the demo streak to the full week.
    assert_eq!(current_streak(&series, today), 7);
}

#[test]
fn generate_commits_before_fetch_and_is_idempotent_per_date() {
    let today = date("2026-08-06");
    let mut ledger = Ledger::seeded(today);
    let record = checked_in_record(today);

    // First generate click: commit then (failed) fetches.
    ledger.upsert(today_row(&record));
    let len_after_first = ledger.len();
    assert_eq!(len_after_first, 7);

    let weather: Option<WeatherInfo> = optional(
        "weather",
        Err(FetchError::Transport("connection refused".to_string())),
    );
    let dog = optional("dog", Err(FetchError::Status(503)));
    let payload = ReportPayload::assemble(&record, weather.clone(), dog.clone());

    let json = serde_json::to_value(&payload).unwrap();
    assert!(json["weather"].is_null());
    assert!(json["dog"].is_null());

    // Second click on the same date: upsert, not append.
    let record = record.with_mood(9);
    ledger.upsert(today_row(&record));
    assert_eq!(ledger.len(), len_after_first);
    let committed = ledger.entries().iter().find(|e| e.date == today).unwrap();
    assert_eq!(committed.mood, 9);
}

#[test]
fn payload_contract_for_partial_checkin() {
    let today = date("2026-08-06");
    let record = checked_in_record(today);
    let payload = ReportPayload::assemble(&record, None, None);

    assert_eq!(payload.achievement.done, 3);
    assert_eq!(payload.achievement.pct, 60.0);
    assert_eq!(payload.habits_done, vec!["기상 미션", "물 마시기", "수면"]);
    assert_eq!(payload.habits_missed, vec!["공부/독서", "운동하기"]);

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["date"], "2026-08-06");
    assert_eq!(json["mood_1to10"], 8);
    assert_eq!(json["achievement"]["total"], 5);
    assert_eq!(
        json["instructions"]["required_sections"]
            .as_array()
            .unwrap()
            .len(),
        5
    );
}

#[test]
fn share_text_reflects_successful_enrichments() {
    let today = date("2026-08-06");
    let record = checked_in_record(today);

    let weather = WeatherInfo {
        city: "Busan".into(),
        temp_c: "29.1".into(),
        feels_like_c: "33.0".into(),
        description: "맑음".into(),
        humidity: "70".into(),
        wind_ms: "3.4".into(),
    };
    let dog = momentum_core::DogImage {
        url: "https://images.dog.ceo/breeds/shiba/shiba-1.jpg".into(),
        breed: momentum_fetch::breed_from_url(
            "https://images.dog.ceo/breeds/shiba/shiba-1.jpg",
        )
        .unwrap(),
    };

    let text = share_text(&record, Some(&weather), Some(&dog), "## 컨디션 등급(S~D)\nA");
    assert!(text.contains("도시: Busan / 코치: 게임 마스터"));
    assert!(text.contains("날씨: 맑음 29.1°C"));
    assert!(text.contains("오늘의 강아지: Shiba"));
}
