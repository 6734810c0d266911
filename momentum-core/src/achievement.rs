//! Achievement derivation from a day's habit states.

use crate::habit::{HABITS, HabitStates};

/// Count completed habits and the resulting percentage.
///
/// Returns `(done, pct)` where pct is `done / 5 * 100.0`, unrounded.
pub fn calc_achievement(habits: &HabitStates) -> (u32, f64) {
    let done = HABITS.iter().filter(|h| habits.get(h.key)).count() as u32;
    let pct = f64::from(done) / HABITS.len() as f64 * 100.0;
    (done, pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_count_maps_to_twenty_percent_steps() {
        let keys = ["wake", "water", "study", "workout", "sleep"];
        for k in 0..=5usize {
            let habits =
                HabitStates::from_partial(keys.iter().take(k).map(|key| (*key, true)));
            let (done, pct) = calc_achievement(&habits);
            assert_eq!(done, k as u32);
            assert_eq!(pct, k as f64 * 20.0);
        }
    }

    #[test]
    fn all_false_is_zero() {
        let (done, pct) = calc_achievement(&HabitStates::default());
        assert_eq!(done, 0);
        assert_eq!(pct, 0.0);
    }
}
