/// Toggle coordinator
///
/// The one place where a habit's completion set and cached streak change.
/// The outcome carries both values so the store can write them as a pair.

use serde::Serialize;

use crate::domain::{current_streak, CompletionSet, DayKey, Habit};

/// New state produced by toggling a habit for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleOutcome {
    pub completed_dates: CompletionSet,
    pub streak: u32,
    /// Whether `today` is in the new set
    pub completed_today: bool,
}

/// Flip `today` in the habit's completion set and recompute the streak
///
/// Deterministic in `(habit.completed_dates, today)`. Applying it twice with
/// the same day returns to the starting set and streak.
pub fn toggle(habit: &Habit, today: DayKey) -> ToggleOutcome {
    let completed_today = !habit.completed_dates.contains(today);
    let completed_dates = if completed_today {
        habit.completed_dates.add(today)
    } else {
        habit.completed_dates.remove(today)
    };
    let streak = current_streak(&completed_dates, today);

    ToggleOutcome {
        completed_dates,
        streak,
        completed_today,
    }
}

impl Habit {
    /// Adopt a toggle outcome, updating both fields together
    pub fn apply_toggle(&mut self, outcome: ToggleOutcome) {
        self.completed_dates = outcome.completed_dates;
        self.streak = outcome.streak;
    }
}
