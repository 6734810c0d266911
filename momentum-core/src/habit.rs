//! Fixed habit table, city list, and coach personas.
//!
//! The five tracked habits and the selectable cities/personas are static
//! for the process lifetime; everything else in the crate derives from them.

use serde::{Deserialize, Serialize};

/// One tracked daily habit. The set is fixed; only completion varies.
#[derive(Debug, Clone, Copy)]
pub struct HabitDefinition {
    pub key: &'static str,
    pub emoji: &'static str,
    pub label: &'static str,
}

pub const HABITS: [HabitDefinition; 5] = [
    HabitDefinition { key: "wake", emoji: "🌅", label: "기상 미션" },
    HabitDefinition { key: "water", emoji: "💧", label: "물 마시기" },
    HabitDefinition { key: "study", emoji: "📚", label: "공부/독서" },
    HabitDefinition { key: "workout", emoji: "🏃", label: "운동하기" },
    HabitDefinition { key: "sleep", emoji: "😴", label: "수면" },
];

pub const CITIES: [&str; 10] = [
    "Seoul", "Busan", "Incheon", "Daegu", "Daejeon",
    "Gwangju", "Suwon", "Ulsan", "Jeju", "Sejong",
];

/// Resolve a city selection, falling back to the first entry for anything
/// not in the list (stale or hand-edited selections must not fail).
pub fn city_or_default(name: &str) -> &'static str {
    CITIES.iter().copied().find(|c| *c == name).unwrap_or(CITIES[0])
}

/// Completion state for the five fixed habits.
///
/// A fixed-shape record rather than a map: every habit always has a value,
/// and unknown keys cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HabitStates {
    pub wake: bool,
    pub water: bool,
    pub study: bool,
    pub workout: bool,
    pub sleep: bool,
}

impl HabitStates {
    /// Total conversion from any partial `(key, done)` input.
    /// Missing keys stay false; unknown keys are ignored.
    pub fn from_partial<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut s = Self::default();
        for (key, done) in items {
            s.set(key, done);
        }
        s
    }

    pub fn get(&self, key: &str) -> bool {
        match key {
            "wake" => self.wake,
            "water" => self.water,
            "study" => self.study,
            "workout" => self.workout,
            "sleep" => self.sleep,
            _ => false,
        }
    }

    pub fn set(&mut self, key: &str, done: bool) {
        match key {
            "wake" => self.wake = done,
            "water" => self.water = done,
            "study" => self.study = done,
            "workout" => self.workout = done,
            "sleep" => self.sleep = done,
            _ => {}
        }
    }

    pub fn toggle(&mut self, key: &str) {
        let v = self.get(key);
        self.set(key, !v);
    }

    /// Labels of completed habits, in table order.
    pub fn done_labels(&self) -> Vec<&'static str> {
        HABITS
            .iter()
            .filter(|h| self.get(h.key))
            .map(|h| h.label)
            .collect()
    }

    /// Labels of missed habits, in table order.
    pub fn missed_labels(&self) -> Vec<&'static str> {
        HABITS
            .iter()
            .filter(|h| !self.get(h.key))
            .map(|h| h.label)
            .collect()
    }
}

/// Report-writing persona applied to the condition report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoachPersona {
    Sparta,
    Mentor,
    GameMaster,
}

const SPARTA_SYSTEM: &str = "너는 '스파르타 코치'다.\n\
- 말투는 짧고 단호하다. 변명은 차단한다.\n\
- 행동/습관의 빈틈을 정확히 지적하고, 내일의 구체적 실행을 요구한다.\n\
- 불필요한 장식은 최소화한다.";

const MENTOR_SYSTEM: &str = "너는 '따뜻한 멘토'다.\n\
- 공감/격려 중심. 오늘의 노력에서 의미를 찾아준다.\n\
- 하지만 현실적인 조언과 작은 다음 행동을 제시한다.\n\
- 다정하지만 과장된 칭찬은 피한다.";

const GAMEMASTER_SYSTEM: &str = "너는 '게임 마스터'다.\n\
- RPG 세계관으로 묘사한다(퀘스트/경험치/레벨/아이템/보스전 등).\n\
- 사용자의 하루를 한 판의 게임처럼 요약하고 내일 퀘스트를 제시한다.\n\
- 유쾌하지만 내용은 구체적이어야 한다.";

impl CoachPersona {
    pub const ALL: [CoachPersona; 3] =
        [CoachPersona::Sparta, CoachPersona::Mentor, CoachPersona::GameMaster];

    pub fn label(&self) -> &'static str {
        match self {
            CoachPersona::Sparta => "스파르타 코치",
            CoachPersona::Mentor => "따뜻한 멘토",
            CoachPersona::GameMaster => "게임 마스터",
        }
    }

    /// Short caption shown next to the persona selector.
    pub fn blurb(&self) -> &'static str {
        match self {
            CoachPersona::Sparta => "엄격하고 단호한 코치. 변명은 컷, 행동만 강조.",
            CoachPersona::Mentor => "공감과 격려 중심. 작은 성취를 칭찬하고 지속을 돕는 멘토.",
            CoachPersona::GameMaster => "RPG 세계관. 퀘스트/레벨/보상/보스전 같은 표현을 사용.",
        }
    }

    /// Fixed instruction preamble handed to the report generator.
    pub fn system_prompt(&self) -> &'static str {
        match self {
            CoachPersona::Sparta => SPARTA_SYSTEM,
            CoachPersona::Mentor => MENTOR_SYSTEM,
            CoachPersona::GameMaster => GAMEMASTER_SYSTEM,
        }
    }

    /// Parse a stored label. Unknown labels fall back to the mentor,
    /// mirroring the default selection.
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|p| p.label() == label)
            .unwrap_or(CoachPersona::Mentor)
    }

    /// Cycle to the next persona (UI selector).
    pub fn next(&self) -> Self {
        match self {
            CoachPersona::Sparta => CoachPersona::Mentor,
            CoachPersona::Mentor => CoachPersona::GameMaster,
            CoachPersona::GameMaster => CoachPersona::Sparta,
        }
    }
}
