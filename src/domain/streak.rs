/// Streak calculation over a habit's completion set
///
/// A streak is the run of consecutive completed days ending at the most
/// recent completion, and it only counts as current while that completion
/// is today or yesterday. Yesterday is a grace period: a habit done
/// yesterday but not yet today keeps its streak until the day is over.

use crate::domain::{CompletionSet, DayKey, DomainError};

/// Current streak length for `completions` as seen on `today`
///
/// Pure and total. Completions later than `today` are not rejected; they
/// simply count as the most recent day.
pub fn current_streak(completions: &CompletionSet, today: DayKey) -> u32 {
    let Some(last) = completions.latest() else {
        return 0;
    };

    // Neither today nor yesterday: the streak has lapsed
    if last < today.day_before() {
        return 0;
    }

    let mut streak = 1;
    let mut current = last;
    loop {
        let previous = current.day_before();
        if !completions.contains(previous) {
            break;
        }
        streak += 1;
        current = previous;
    }

    streak
}

/// Current streak computed straight from raw day-key strings
///
/// Any malformed key, including `today`, fails with `MalformedDayKey`
/// rather than producing a misleading count.
pub fn current_streak_from_keys<I, S>(keys: I, today: &str) -> Result<u32, DomainError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let completions = CompletionSet::from_keys(keys)?;
    let today = DayKey::parse(today)?;
    Ok(current_streak(&completions, today))
}

/// Longest run of consecutive completed days anywhere in the history
pub fn longest_streak(completions: &CompletionSet) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<DayKey> = None;

    for day in completions.iter() {
        run = match previous {
            Some(prev) if day.day_before() == prev => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(day);
    }

    longest
}

/// Streak statistics for a habit, derived from its completion set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreakStats {
    /// Consecutive days ending today or yesterday
    pub current_streak: u32,
    /// Best run of consecutive days ever recorded
    pub longest_streak: u32,
    /// Number of distinct completed days
    pub total_completions: u32,
    /// Most recent completed day (None if never completed)
    pub last_completed: Option<DayKey>,
    /// Whether today is already in the set
    pub completed_today: bool,
}

impl StreakStats {
    pub fn calculate(completions: &CompletionSet, today: DayKey) -> Self {
        let current_streak = current_streak(completions, today);
        Self {
            current_streak,
            longest_streak: longest_streak(completions).max(current_streak),
            total_completions: completions.len() as u32,
            last_completed: completions.latest(),
            completed_today: completions.contains(today),
        }
    }

    /// Get a motivational message based on current streak status
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 => "Ready to start your streak! Every journey begins with a single step.".to_string(),
            1 => "Great start! One day down, keep the momentum going.".to_string(),
            2..=6 => format!("Nice work! {} days in a row. You're building a strong habit.", self.current_streak),
            7..=13 => format!("Excellent! {} days strong. You're in the groove now!", self.current_streak),
            14..=29 => format!("Amazing! {} days straight. This is becoming second nature.", self.current_streak),
            _ => format!("Incredible! {} days of consistency. Keep it going!", self.current_streak),
        }
    }
}
