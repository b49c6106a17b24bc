/// Habit entity
///
/// A habit is a named thing the user wants to do every day. Its history is
/// the completion set; `streak` is a cached value that is only ever written
/// together with the set it was computed from (see `toggle`).

use chrono::{DateTime, Utc};
use crate::domain::{current_streak, CompletionSet, DayKey, HabitId, HabitName, StreakStats};

#[derive(Debug, Clone, PartialEq)]
pub struct Habit {
    /// Store-assigned identifier
    pub id: HabitId,
    /// Display name (e.g., "Morning Run", "Read for 30min")
    pub name: String,
    /// When this habit was created
    pub created_at: DateTime<Utc>,
    /// Days on which the habit was completed
    pub completed_dates: CompletionSet,
    /// Cached streak, as of the last write
    pub streak: u32,
}

impl Habit {
    /// A freshly created habit: no completions, streak 0
    pub fn new(id: HabitId, name: HabitName, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into_string(),
            created_at,
            completed_dates: CompletionSet::new(),
            streak: 0,
        }
    }

    /// Create a habit from existing data (used when loading from the store)
    pub fn from_existing(
        id: HabitId,
        name: String,
        created_at: DateTime<Utc>,
        completed_dates: CompletionSet,
        streak: u32,
    ) -> Self {
        Self {
            id,
            name,
            created_at,
            completed_dates,
            streak,
        }
    }

    /// Rename the habit; history and streak are left alone
    pub fn rename(&mut self, name: HabitName) {
        self.name = name.into_string();
    }

    /// Whether the habit has been completed on `today`
    pub fn is_completed_on(&self, today: DayKey) -> bool {
        self.completed_dates.contains(today)
    }

    /// The streak derived from history at read time
    ///
    /// Unlike the cached `streak` field this never goes stale when days pass
    /// without a toggle.
    pub fn current_streak(&self, today: DayKey) -> u32 {
        current_streak(&self.completed_dates, today)
    }

    pub fn stats(&self, today: DayKey) -> StreakStats {
        StreakStats::calculate(&self.completed_dates, today)
    }
}
